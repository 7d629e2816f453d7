//! Exchanges listed in a cached per-country symbol list.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{FundamentalsError, Result};

/// One row of `<COUNTRY>.json`. Only the exchange is read.
#[derive(Debug, Deserialize)]
pub struct ExchangeSymbol {
    #[serde(rename = "Exchange", default)]
    pub exchange: Option<String>,
}

/// `<COUNTRY>.json`, falling back to `<country>.json`
pub fn country_file(data_dir: &Path, country: &str) -> Result<PathBuf> {
    let upper = data_dir.join(format!("{}.json", country.to_uppercase()));
    if upper.is_file() {
        return Ok(upper);
    }
    let lower = data_dir.join(format!("{}.json", country.to_lowercase()));
    if lower.is_file() {
        return Ok(lower);
    }
    Err(FundamentalsError::CountryFileNotFound {
        country: country.to_string(),
        upper,
        lower,
    })
}

pub fn load_country_symbols(path: &Path) -> Result<Vec<ExchangeSymbol>> {
    let contents = fs::read_to_string(path).map_err(|e| FundamentalsError::io(path, e))?;
    serde_json::from_str(&contents).map_err(|e| FundamentalsError::json(path, e))
}

/// Sorted unique exchange names for a country
pub fn unique_exchanges(data_dir: &Path, country: &str) -> Result<Vec<String>> {
    let path = country_file(data_dir, country)?;
    debug!("Reading exchanges from {}", path.display());

    let exchanges: BTreeSet<String> = load_country_symbols(&path)?
        .into_iter()
        .filter_map(|symbol| symbol.exchange)
        .collect();
    Ok(exchanges.into_iter().collect())
}
