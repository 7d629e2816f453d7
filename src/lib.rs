pub mod analysis;
pub mod error;
pub mod exchanges;
pub mod export;
pub mod loader;
pub mod models;
pub mod report;
pub mod utils;

pub use error::{ErrorCategory, FundamentalsError, RecordIssue, Result};
