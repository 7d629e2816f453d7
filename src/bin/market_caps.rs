//! Extract market capitalizations to CSV and optionally list one size bucket

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rust_fundamentals::{
    export::market_caps::{format_symbol_list, symbols_in, write_market_caps},
    loader::load_market_caps,
    models::{Config, MarketCapCategory},
    utils::{init_logging, progress_bar},
};

#[derive(Parser, Debug)]
#[command(name = "market-caps", version, about = "💰 Get and categorize market caps")]
struct Args {
    /// Directory where JSON files are located
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// CSV file to output market caps
    #[arg(long)]
    output_csv: Option<PathBuf>,

    /// Print the symbols in this category (nano, micro, small, mid, large, mega, unknown)
    #[arg(long)]
    market_cap: Option<MarketCapCategory>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(env!("CARGO_CRATE_NAME"), args.verbose);

    let config = Config::from_env()?;
    let data_dir = args.data_dir.unwrap_or(config.fundamentals_dir);
    let output_csv = args.output_csv.unwrap_or(config.market_caps_csv);

    info!("🚀 Starting market cap extraction...");
    let entries = load_market_caps(&data_dir, &progress_bar(0, "Reading JSON files"))
        .with_context(|| format!("Failed to read fundamentals from {}", data_dir.display()))?;
    write_market_caps(&output_csv, &entries)
        .with_context(|| format!("Failed to write {}", output_csv.display()))?;
    info!("✅ Market cap extraction complete: {} symbols", entries.len());

    if let Some(category) = args.market_cap {
        println!("{}", format_symbol_list(&symbols_in(&entries, category)));
    }

    Ok(())
}
