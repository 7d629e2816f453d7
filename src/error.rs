//! Error types for fundamentals processing.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fundamentals operations.
pub type Result<T> = std::result::Result<T, FundamentalsError>;

/// Fatal errors that stop a tool run.
#[derive(Debug, Error)]
pub enum FundamentalsError {
    /// Filesystem error on a specific path
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON document could not be parsed
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Parsed JSON does not have the shape of a fundamentals document
    #[error("Unexpected structure in {path}: {detail}")]
    UnexpectedStructure { path: PathBuf, detail: String },

    /// CSV output error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Peer threshold is not a usable number
    #[error("Invalid peers threshold: {0}")]
    InvalidThreshold(f64),

    /// No symbol list found for a country
    #[error("File for country code '{country}' not found. Tried: {}, {}", .upper.display(), .lower.display())]
    CountryFileNotFound {
        country: String,
        upper: PathBuf,
        lower: PathBuf,
    },
}

impl FundamentalsError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// Buckets used for the end-of-run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    InvalidTotalAssets,
    NoValidHoldings,
    Other,
}

impl ErrorCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::InvalidTotalAssets => "Invalid TotalAssets",
            ErrorCategory::NoValidHoldings => "No valid holdings",
            ErrorCategory::Other => "Other Errors",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Problems found while validating a single fundamentals record.
///
/// None of these abort a run; each one degrades or skips a single row.
#[derive(Debug, Error)]
pub enum RecordIssue {
    #[error("TotalAssets is missing")]
    MissingTotalAssets,

    #[error("TotalAssets is not numeric: {0}")]
    InvalidTotalAssets(String),

    #[error("no holding code with a two-character country suffix")]
    NoValidHoldings,

    #[error("malformed Holdings: {0}")]
    MalformedHoldings(String),

    #[error("unreadable record: {0}")]
    Unreadable(#[from] FundamentalsError),
}

impl RecordIssue {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RecordIssue::MissingTotalAssets | RecordIssue::InvalidTotalAssets(_) => {
                ErrorCategory::InvalidTotalAssets
            }
            RecordIssue::NoValidHoldings => ErrorCategory::NoValidHoldings,
            RecordIssue::MalformedHoldings(_) | RecordIssue::Unreadable(_) => ErrorCategory::Other,
        }
    }
}
