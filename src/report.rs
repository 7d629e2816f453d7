//! Run reporting for per-record problems.
//!
//! Components never abort on a bad record; they hand it to a [`Reporter`]
//! and move on. [`ErrorSummary`] is the reporter the tools use: it logs each
//! problem and keeps the affected symbols grouped for the end-of-run summary.

use indexmap::IndexMap;
use std::fmt;
use tracing::{debug, warn};

use crate::error::ErrorCategory;

pub trait Reporter {
    /// Record a skipped or degraded record. `subject` is the symbol, or the
    /// file name when no symbol could be read.
    fn record(&mut self, category: ErrorCategory, subject: &str, detail: &str);
}

/// Affected symbols grouped by category, in first-seen order
#[derive(Debug, Default, Clone)]
pub struct ErrorSummary {
    buckets: IndexMap<ErrorCategory, Vec<String>>,
}

impl ErrorSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn subjects(&self, category: ErrorCategory) -> &[String] {
        self.buckets.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn categories(&self) -> impl Iterator<Item = (ErrorCategory, &[String])> {
        self.buckets.iter().map(|(category, subjects)| (*category, subjects.as_slice()))
    }
}

impl Reporter for ErrorSummary {
    fn record(&mut self, category: ErrorCategory, subject: &str, detail: &str) {
        match category {
            ErrorCategory::Other => warn!("⚠️ Error processing {}: {}", subject, detail),
            _ => debug!("{} [{}]: {}", subject, category, detail),
        }
        self.buckets
            .entry(category)
            .or_default()
            .push(subject.to_string());
    }
}

/// One `Category: A, B, C` line per category
impl fmt::Display for ErrorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (category, subjects) in self.categories() {
            writeln!(f, "{}: {}", category, subjects.join(", "))?;
        }
        Ok(())
    }
}
