use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use rust_fundamentals::{
    exchanges::unique_exchanges,
    models::Config,
    utils::init_logging,
};

#[derive(Parser, Debug)]
#[command(name = "list-exchanges", version, about = "🏛️ List unique exchanges for a specific country")]
struct Args {
    /// Country code of the symbol list, e.g. 'US' or 'us'
    #[arg(long)]
    country: String,

    /// Directory containing the per-country symbol lists
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(env!("CARGO_CRATE_NAME"), args.verbose);

    let config = Config::from_env()?;
    let data_dir = args.data_dir.unwrap_or(config.exchanges_dir);

    let exchanges = unique_exchanges(&data_dir, &args.country)?;
    println!("Unique Exchanges in {}:", args.country.to_uppercase());
    for exchange in exchanges {
        println!("{}", exchange);
    }

    Ok(())
}
