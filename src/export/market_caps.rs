//! Market-cap CSV exports.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::{FundamentalsError, Result};
use crate::loader::sort_by_market_cap;
use crate::models::{MarketCapCategory, MarketCapEntry};
use crate::utils::ensure_parent_dir;

pub const MARKET_CAP_HEADER: [&str; 2] = ["Symbol", "MarketCapitalization"];

/// Every category, each holding its entries largest first
pub fn categorize(entries: &[MarketCapEntry]) -> BTreeMap<MarketCapCategory, Vec<MarketCapEntry>> {
    let mut categories: BTreeMap<MarketCapCategory, Vec<MarketCapEntry>> = MarketCapCategory::ALL
        .into_iter()
        .map(|category| (category, Vec::new()))
        .collect();

    for entry in entries {
        categories.entry(entry.category()).or_default().push(entry.clone());
    }
    for bucket in categories.values_mut() {
        sort_by_market_cap(bucket);
    }
    categories
}

/// Symbols in one category, largest first
pub fn symbols_in(entries: &[MarketCapEntry], category: MarketCapCategory) -> Vec<String> {
    let mut selected: Vec<MarketCapEntry> = entries
        .iter()
        .filter(|entry| entry.category() == category)
        .cloned()
        .collect();
    sort_by_market_cap(&mut selected);
    selected.into_iter().map(|entry| entry.symbol).collect()
}

/// `['AAPL', 'MSFT']`, ready to paste into another script
pub fn format_symbol_list(symbols: &[String]) -> String {
    let quoted: Vec<String> = symbols.iter().map(|s| format!("'{}'", s)).collect();
    format!("[{}]", quoted.join(", "))
}

pub fn write_entries<W: Write>(writer: W, entries: &[MarketCapEntry]) -> Result<()> {
    let mut sorted = entries.to_vec();
    sort_by_market_cap(&mut sorted);

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(MARKET_CAP_HEADER)?;
    for entry in &sorted {
        csv_writer.write_record([entry.symbol.clone(), entry.market_cap.to_string()])?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_market_caps(path: &Path, entries: &[MarketCapEntry]) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|e| FundamentalsError::io(path, e))?;
    write_entries(file, entries)?;
    info!("💾 Market capitalization data saved to {}", path.display());
    Ok(())
}

/// Write `{category}_market_caps.csv` for every category into `dir`.
///
/// A failed category is logged and skipped. Returns the files written.
pub fn write_categories(
    dir: &Path,
    categories: &BTreeMap<MarketCapCategory, Vec<MarketCapEntry>>,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| FundamentalsError::io(dir, e))?;

    let mut written = Vec::new();
    for (category, entries) in categories {
        let path = dir.join(category.file_name());
        let result = File::create(&path)
            .map_err(|e| FundamentalsError::io(&path, e))
            .and_then(|file| write_entries(file, entries));
        match result {
            Ok(()) => {
                info!("💾 Saved {} market caps to {}", category, path.display());
                written.push(path);
            }
            Err(e) => error!("❌ Error writing {} market caps to CSV: {}", category, e),
        }
    }
    Ok(written)
}
