use std::path::PathBuf;

pub mod etf;
pub mod fundamentals;
pub mod market_cap;

pub use etf::{EtfRecord, Holding};
pub use fundamentals::{EtfData, FundamentalsDocument, Highlights};
pub use market_cap::{MarketCapCategory, MarketCapEntry};

/// Default overlap threshold, in percentage points
pub const DEFAULT_PEERS_THRESHOLD: f64 = 80.0;

/// Configuration shared by the export tools
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub fundamentals_dir: PathBuf,
    pub exchanges_dir: PathBuf,
    pub etf_output_csv: PathBuf,
    pub market_caps_csv: PathBuf,
    pub market_cap_categories_dir: PathBuf,
    pub peers_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fundamentals_dir: PathBuf::from("data/fundamental_data"),
            exchanges_dir: PathBuf::from("data/exchanges"),
            etf_output_csv: PathBuf::from("data/etfs.csv"),
            market_caps_csv: PathBuf::from("data/market_caps.csv"),
            market_cap_categories_dir: PathBuf::from("market_cap_categories"),
            peers_threshold: DEFAULT_PEERS_THRESHOLD,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let path = |key: &str, default: PathBuf| lookup(key).map(PathBuf::from).unwrap_or(default);

        let peers_threshold = match lookup("PEERS_THRESHOLD") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|_| anyhow::anyhow!("PEERS_THRESHOLD must be a number, got '{}'", raw))?,
            None => defaults.peers_threshold,
        };

        Ok(Config {
            fundamentals_dir: path("FUNDAMENTALS_DIR", defaults.fundamentals_dir),
            exchanges_dir: path("EXCHANGES_DIR", defaults.exchanges_dir),
            etf_output_csv: path("ETF_OUTPUT_CSV", defaults.etf_output_csv),
            market_caps_csv: path("MARKET_CAPS_CSV", defaults.market_caps_csv),
            market_cap_categories_dir: path("MARKET_CAP_CATEGORIES_DIR", defaults.market_cap_categories_dir),
            peers_threshold,
        })
    }
}
