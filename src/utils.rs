use std::fs;
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::error::{FundamentalsError, Result};

/// Filter used when `RUST_LOG` is unset: this crate and the calling binary only
pub fn default_filter(bin_target: &str, verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("{}={},{}={}", env!("CARGO_CRATE_NAME"), level, bin_target, level)
}

/// Install the global tracing subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(bin_target: &str, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(bin_target, verbose)));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    // A subscriber may already be installed when called twice in one process
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Progress bar in the shared tool style
pub fn progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>7}/{len:7} {msg} [{eta}]")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}

/// Float text that always carries a decimal point: `80` becomes `80.0`
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Percentage rounded to one decimal
pub fn format_percent(value: f64) -> String {
    format!("{:.1}", value)
}

/// Create the parent directory of `path` if it has one
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| FundamentalsError::io(parent, e))
        }
        _ => Ok(()),
    }
}
