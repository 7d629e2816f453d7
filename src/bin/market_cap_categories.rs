use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rust_fundamentals::{
    export::{categorize, write_categories},
    loader::load_market_caps,
    models::Config,
    utils::{init_logging, progress_bar},
};

#[derive(Parser, Debug)]
#[command(
    name = "market-cap-categories",
    version,
    about = "🗂️ Generate market cap category CSVs from fundamental data"
)]
struct Args {
    /// Directory containing the fundamentals JSON files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory to save the categorized market cap CSV files
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(env!("CARGO_CRATE_NAME"), args.verbose);

    let config = Config::from_env()?;
    let data_dir = args.data_dir.unwrap_or(config.fundamentals_dir);
    let output_dir = args.output_dir.unwrap_or(config.market_cap_categories_dir);

    info!("🚀 Starting market cap categorization...");
    let entries = load_market_caps(&data_dir, &progress_bar(0, "Reading JSON files"))
        .with_context(|| format!("Failed to read fundamentals from {}", data_dir.display()))?;

    let categories = categorize(&entries);
    for (category, bucket) in &categories {
        info!("   - {}: {} symbols", category, bucket.len());
    }

    let written = write_categories(&output_dir, &categories)
        .with_context(|| format!("Failed to prepare {}", output_dir.display()))?;
    info!("✅ Market cap categorization complete: {} files written", written.len());

    Ok(())
}
