//! Export every ETF with its country mix, holdings and overlapping peers to CSV

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rust_fundamentals::{
    analysis::{OverlapMatrix, PeerFilter},
    export::{build_rows, write_etf_csv},
    loader::load_etfs,
    models::Config,
    report::ErrorSummary,
    utils::{init_logging, progress_bar},
};

#[derive(Parser, Debug)]
#[command(
    name = "etf-peers",
    version,
    about = "📊 Parse ETF JSON, create CSV, and filter peers by holdings overlap"
)]
struct Args {
    /// Minimum overlap required to keep a peer, e.g. 80.0 keeps peers >= 80.0% overlap [default: 80.0]
    #[arg(long)]
    peers: Option<f64>,

    /// Directory containing ETF JSON files
    #[arg(long)]
    json_dir: Option<PathBuf>,

    /// Path to the output CSV
    #[arg(long)]
    output_csv: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(env!("CARGO_CRATE_NAME"), args.verbose);

    let config = Config::from_env()?;
    let json_dir = args.json_dir.unwrap_or(config.fundamentals_dir);
    let output_csv = args.output_csv.unwrap_or(config.etf_output_csv);
    let filter = PeerFilter::new(args.peers.unwrap_or(config.peers_threshold))?;

    let start_time = Instant::now();
    let mut summary = ErrorSummary::new();

    let loaded = load_etfs(&json_dir, &mut summary, &progress_bar(0, "Reading JSON files"))
        .with_context(|| format!("Failed to read ETF files from {}", json_dir.display()))?;
    info!("📊 Found {} ETFs", loaded.len());

    let holdings = loaded.holdings_map();
    let matrix = OverlapMatrix::compute_with_progress(
        &holdings,
        &progress_bar(0, "Calculating overlap among ETFs"),
    );

    let rows = build_rows(&loaded.records, &matrix, &filter);
    write_etf_csv(&output_csv, &rows, filter.threshold())
        .with_context(|| format!("Failed to write {}", output_csv.display()))?;

    info!("⏱️ Finished in {:.1}s", start_time.elapsed().as_secs_f64());
    println!("Processed {} ETFs. Output saved to {}", rows.len(), output_csv.display());
    if !summary.is_empty() {
        println!("\nSummary of Errors:");
        print!("{}", summary);
    }

    Ok(())
}
