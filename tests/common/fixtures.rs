//! Fundamentals directories built on disk for tests

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use tempfile::TempDir;

use rust_fundamentals::loader::HoldingsMap;

/// A temporary fundamentals directory
pub struct FixtureDir {
    dir: TempDir,
}

impl FixtureDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path for an output file inside the fixture, in a directory that does not exist yet
    pub fn output(&self, name: &str) -> PathBuf {
        self.dir.path().join("out").join(name)
    }

    pub fn write_json(&self, file_name: &str, value: &Value) -> &Self {
        let text = serde_json::to_string_pretty(value).expect("Failed to serialize fixture");
        fs::write(self.dir.path().join(file_name), text).expect("Failed to write fixture");
        self
    }

    pub fn write_raw(&self, file_name: &str, contents: &str) -> &Self {
        fs::write(self.dir.path().join(file_name), contents).expect("Failed to write fixture");
        self
    }

    /// ETF file named after the lower-cased symbol
    pub fn add_etf(&self, symbol: &str, total_assets: Value, holdings: &[&str]) -> &Self {
        self.write_json(&format!("{}.json", symbol.to_lowercase()), &etf_document(symbol, total_assets, holdings))
    }

    pub fn add_stock(&self, symbol: &str, market_cap: Value) -> &Self {
        self.write_json(
            &format!("{}.json", symbol.to_lowercase()),
            &json!({
                "General": { "Type": "Common Stock", "Code": symbol },
                "Highlights": { "MarketCapitalization": market_cap }
            }),
        )
    }
}

/// ETF document with equal-weight holdings
pub fn etf_document(symbol: &str, total_assets: Value, holdings: &[&str]) -> Value {
    let mut holdings_map = Map::new();
    for code in holdings {
        holdings_map.insert(code.to_string(), json!({ "Code": code, "Assets_%": 1.5 }));
    }
    json!({
        "General": { "Type": "ETF", "Code": symbol, "Name": format!("{} Test Fund", symbol) },
        "ETF_Data": {
            "TotalAssets": total_assets,
            "Average_Mkt_Cap_Mil": "12345.67",
            "Holdings": Value::Object(holdings_map)
        }
    })
}

/// In-memory holdings map for analysis tests
pub fn holdings_map(entries: &[(&str, &[&str])]) -> HoldingsMap {
    let mut map = IndexMap::new();
    for (symbol, codes) in entries {
        let set: HashSet<String> = codes.iter().map(|c| c.to_string()).collect();
        map.insert(symbol.to_string(), set);
    }
    map
}

/// X, Y and Z from the overlap walkthrough: X ⊃ Y, Z disjoint
pub fn xyz_holdings() -> HoldingsMap {
    holdings_map(&[
        ("X", &["AAA.US", "BBB.US", "CCC.US"]),
        ("Y", &["AAA.US", "BBB.US"]),
        ("Z", &["ZZZ.US"]),
    ])
}
