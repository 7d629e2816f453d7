pub mod etf_csv;
pub mod market_caps;

pub use etf_csv::{build_rows, write_etf_csv, EtfRow};
pub use market_caps::{categorize, write_categories, write_market_caps};
