//! Reading cached fundamentals files from disk.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use indicatif::ProgressBar;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::{ErrorCategory, FundamentalsError, RecordIssue, Result};
use crate::models::{EtfRecord, FundamentalsDocument, MarketCapEntry};
use crate::report::Reporter;

/// Symbol to holding codes, for ETFs that take part in overlap
pub type HoldingsMap = IndexMap<String, HashSet<String>>;

/// All ETF records found in a fundamentals directory
#[derive(Debug, Default, Clone)]
pub struct LoadedEtfs {
    pub records: Vec<EtfRecord>,
}

impl LoadedEtfs {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Holdings sets of every record with valid assets and holdings.
    /// A repeated symbol keeps the holdings of its last file.
    pub fn holdings_map(&self) -> HoldingsMap {
        let mut map = HoldingsMap::new();
        for record in self.records.iter().filter(|r| r.has_overlap_data()) {
            if map.insert(record.symbol.clone(), record.holdings_set()).is_some() {
                warn!("⚠️ Duplicate ETF symbol {}; keeping the last file's holdings", record.symbol);
            }
        }
        map
    }
}

/// `*.json` files directly inside `dir`, sorted by name
pub fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| FundamentalsError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| FundamentalsError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read one fundamentals file. The root must be a JSON object.
pub fn read_document(path: &Path) -> Result<FundamentalsDocument> {
    let contents = fs::read_to_string(path).map_err(|e| FundamentalsError::io(path, e))?;
    let value: Value = serde_json::from_str(&contents).map_err(|e| FundamentalsError::json(path, e))?;
    if !value.is_object() {
        return Err(FundamentalsError::UnexpectedStructure {
            path: path.to_path_buf(),
            detail: "top-level value is not an object".to_string(),
        });
    }
    serde_json::from_value(value).map_err(|e| FundamentalsError::json(path, e))
}

/// Upper-cased file stem, used when a document has no usable code
pub fn symbol_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Build the record for an ETF document.
///
/// `TotalAssets` is checked before holdings are looked at. Holdings may come
/// back empty; that is still a record. Unreadable `ETF_Data`, bad
/// `TotalAssets` and malformed entries under valid codes are errors here.
pub fn parse_etf(symbol: &str, document: &FundamentalsDocument) -> std::result::Result<EtfRecord, RecordIssue> {
    let etf = document
        .etf_data()
        .map_err(|e| RecordIssue::Unreadable(FundamentalsError::json(symbol, e)))?;
    let total_assets = etf.total_assets()?;

    Ok(EtfRecord {
        symbol: symbol.to_string(),
        total_assets: Some(total_assets),
        average_mkt_cap_mil: etf.average_mkt_cap_mil(),
        holdings: etf.valid_holdings()?,
    })
}

/// Load every ETF in `dir`. Bad files are reported and skipped.
pub fn load_etfs(dir: &Path, reporter: &mut dyn Reporter, progress: &ProgressBar) -> Result<LoadedEtfs> {
    let files = json_files(dir)?;
    info!("📂 Reading {} JSON files from {}", files.len(), dir.display());
    progress.set_length(files.len() as u64);

    let mut loaded = LoadedEtfs::default();
    for path in &files {
        progress.inc(1);

        let document = match read_document(path) {
            Ok(document) => document,
            Err(e) => {
                reporter.record(ErrorCategory::Other, &file_name(path), &e.to_string());
                continue;
            }
        };
        if !document.is_etf() {
            continue;
        }

        let symbol = match document.code() {
            Some(code) => code.to_string(),
            None => {
                let fallback = symbol_from_path(path);
                warn!("⚠️ {} has no General.Code; using {}", file_name(path), fallback);
                fallback
            }
        };

        match parse_etf(&symbol, &document) {
            Ok(record) => {
                if record.holdings.is_empty() {
                    let issue = RecordIssue::NoValidHoldings;
                    reporter.record(issue.category(), &symbol, &issue.to_string());
                }
                loaded.records.push(record);
            }
            Err(issue @ (RecordIssue::MissingTotalAssets | RecordIssue::InvalidTotalAssets(_))) => {
                reporter.record(issue.category(), &symbol, &issue.to_string());
                loaded.records.push(EtfRecord::without_assets(&symbol));
            }
            Err(issue) => reporter.record(issue.category(), &file_name(path), &issue.to_string()),
        }
    }
    progress.finish_and_clear();

    debug!("Loaded {} ETF records", loaded.len());
    Ok(loaded)
}

/// `MarketCapitalization` as an integer: JSON integers or digit strings with `,` separators
pub fn parse_market_cap(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.replace(',', "").trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Market caps of every non-fund symbol in `dir`, largest first
pub fn load_market_caps(dir: &Path, progress: &ProgressBar) -> Result<Vec<MarketCapEntry>> {
    let files = json_files(dir)?;
    info!("📂 Reading {} JSON files from {}", files.len(), dir.display());
    progress.set_length(files.len() as u64);

    let mut entries = Vec::new();
    for path in &files {
        progress.inc(1);
        let symbol = symbol_from_path(path);

        let document = match read_document(path) {
            Ok(document) => document,
            Err(e) => {
                error!("❌ Error processing file {}: {}", path.display(), e);
                continue;
            }
        };
        if document.is_fund() {
            info!("Skipping mutual fund: {}", symbol);
            continue;
        }

        let raw = match document.highlights() {
            Ok(highlights) => highlights.market_capitalization,
            Err(e) => {
                error!("❌ Error processing file {}: {}", path.display(), e);
                continue;
            }
        };

        match raw {
            None | Some(Value::Null) => warn!("Market cap not found for {}. Skipping.", symbol),
            Some(value) => match parse_market_cap(&value) {
                Some(0) => warn!("Market cap not found for {}. Skipping.", symbol),
                Some(cap) => entries.push(MarketCapEntry::new(&symbol, cap)),
                None => warn!("Market cap for {} is invalid ({}). Skipping.", symbol, value),
            },
        }
    }
    progress.finish_and_clear();

    sort_by_market_cap(&mut entries);
    Ok(entries)
}

/// Largest market cap first; equal caps keep their order
pub fn sort_by_market_cap(entries: &mut [MarketCapEntry]) {
    entries.sort_by(|a, b| b.market_cap.cmp(&a.market_cap));
}
