//! ETF peer CSV: one row per ETF, largest total assets first.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::analysis::peers::{peers_display, PeerFilter};
use crate::analysis::{country_distribution, OverlapMatrix};
use crate::error::{FundamentalsError, Result};
use crate::models::EtfRecord;
use crate::utils::{ensure_parent_dir, format_float};

#[derive(Debug, Clone, PartialEq)]
pub struct EtfRow {
    pub symbol: String,
    pub total_assets: Option<f64>,
    pub average_mkt_cap_mil: Option<f64>,
    pub country_distribution: String,
    pub holdings: String,
    pub peers: String,
    pub num_peers: usize,
}

impl EtfRow {
    pub fn from_record(record: &EtfRecord, matrix: &OverlapMatrix, filter: &PeerFilter) -> Self {
        let peers = if record.has_overlap_data() {
            filter.peers_for(matrix, &record.symbol)
        } else {
            Vec::new()
        };

        EtfRow {
            symbol: record.symbol.clone(),
            total_assets: record.total_assets,
            average_mkt_cap_mil: record.average_mkt_cap_mil,
            country_distribution: country_distribution(record.holding_codes()),
            holdings: record
                .holdings
                .iter()
                .map(|h| h.display())
                .collect::<Vec<_>>()
                .join(","),
            peers: peers_display(&peers),
            num_peers: peers.len(),
        }
    }

    fn fields(&self) -> [String; 7] {
        [
            self.symbol.clone(),
            self.total_assets.map(format_float).unwrap_or_default(),
            self.average_mkt_cap_mil.map(format_float).unwrap_or_default(),
            self.country_distribution.clone(),
            self.holdings.clone(),
            self.peers.clone(),
            self.num_peers.to_string(),
        ]
    }
}

/// Rows for every record, sorted by total assets descending.
/// Missing assets sort as zero; the sort is stable.
pub fn build_rows(records: &[EtfRecord], matrix: &OverlapMatrix, filter: &PeerFilter) -> Vec<EtfRow> {
    let mut rows: Vec<EtfRow> = records
        .iter()
        .map(|record| EtfRow::from_record(record, matrix, filter))
        .collect();
    rows.sort_by(|a, b| {
        let a_assets = a.total_assets.unwrap_or(0.0);
        let b_assets = b.total_assets.unwrap_or(0.0);
        b_assets.total_cmp(&a_assets)
    });
    rows
}

pub fn header(threshold: f64) -> [String; 7] {
    let threshold = format_float(threshold);
    [
        "Symbol".to_string(),
        "Total Assets".to_string(),
        "Average Mkt Cap (Mil)".to_string(),
        "Country Holdings Distribution".to_string(),
        "Holdings Codes".to_string(),
        format!("Peers >= {}", threshold),
        format!("Num Peers >= {}", threshold),
    ]
}

pub fn write_rows<W: Write>(writer: W, rows: &[EtfRow], threshold: f64) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(header(threshold))?;
    for row in rows {
        csv_writer.write_record(row.fields())?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write all rows in one batch, creating the parent directory
pub fn write_etf_csv(path: &Path, rows: &[EtfRow], threshold: f64) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|e| FundamentalsError::io(path, e))?;
    write_rows(file, rows, threshold)
}
