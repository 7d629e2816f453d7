//! End-to-end ETF export: JSON directory in, CSV file out

use std::path::Path;

use pretty_assertions::assert_eq;
use serde_json::json;
use test_log::test;

use rust_fundamentals::{
    analysis::{OverlapMatrix, PeerFilter},
    export::{build_rows, write_etf_csv},
    loader::load_etfs,
    report::ErrorSummary,
    ErrorCategory,
};

use crate::common::fixtures::FixtureDir;
use crate::common::logging;
use indicatif::ProgressBar;

/// Run the full export and return the parsed CSV (header first)
fn export(dir: &Path, output: &Path, threshold: f64) -> (Vec<Vec<String>>, ErrorSummary) {
    let mut summary = ErrorSummary::new();
    let loaded = load_etfs(dir, &mut summary, &ProgressBar::hidden()).expect("load should succeed");
    let matrix = OverlapMatrix::compute(&loaded.holdings_map());
    let filter = PeerFilter::new(threshold).unwrap();

    let rows = build_rows(&loaded.records, &matrix, &filter);
    write_etf_csv(output, &rows, filter.threshold()).expect("write should succeed");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(output)
        .expect("output should exist");
    let records = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (records, summary)
}

fn fixture_with_degenerate_etfs() -> FixtureDir {
    let fixture = FixtureDir::new();
    fixture
        .add_etf("X", json!(300.0), &["AAA.US", "BBB.US", "CCC.US"])
        .add_etf("Y", json!("200"), &["AAA.US", "BBB.US"])
        .add_etf("Z", json!(100), &["ZZZ.US"])
        .add_etf("NOASSETS", json!("N/A"), &["AAA.US", "BBB.US"])
        .add_etf("NOHOLD", json!(50), &["BBBUS", "CCC.USA"])
        .add_stock("AAPL", json!(3_000_000_000_000i64))
        .write_raw("corrupt.json", "{\"General\": ");
    fixture
}

#[test]
fn test_xyz_export_rows() {
    logging::log_test_step("Exporting X/Y/Z fixture at 60%");
    let fixture = fixture_with_degenerate_etfs();
    let output = fixture.output("etfs.csv");

    let (csv, summary) = export(fixture.path(), &output, 60.0);

    assert_eq!(
        csv[0],
        vec![
            "Symbol",
            "Total Assets",
            "Average Mkt Cap (Mil)",
            "Country Holdings Distribution",
            "Holdings Codes",
            "Peers >= 60.0",
            "Num Peers >= 60.0",
        ]
    );

    // rows ordered by total assets; NOASSETS sorts as zero
    let symbols: Vec<&str> = csv[1..].iter().map(|row| row[0].as_str()).collect();
    assert_eq!(symbols, vec!["X", "Y", "Z", "NOHOLD", "NOASSETS"]);

    assert_eq!(
        csv[1],
        vec![
            "X",
            "300.0",
            "12345.67",
            "US(100.0)",
            "AAA.US(1.5),BBB.US(1.5),CCC.US(1.5)",
            "Y(66.7)",
            "1",
        ]
    );
    assert_eq!(csv[2][5], "X(66.7)");
    assert_eq!(csv[3][5..].to_vec(), vec!["", "0"]);

    assert_eq!(csv[4], vec!["NOHOLD", "50.0", "12345.67", "", "", "", "0"]);
    assert_eq!(csv[5], vec!["NOASSETS", "", "", "", "", "", "0"]);

    assert_eq!(summary.subjects(ErrorCategory::InvalidTotalAssets), ["NOASSETS"]);
    assert_eq!(summary.subjects(ErrorCategory::NoValidHoldings), ["NOHOLD"]);
    assert_eq!(summary.subjects(ErrorCategory::Other), ["corrupt.json"]);
}

#[test]
fn test_row_count_independent_of_threshold() {
    let fixture = fixture_with_degenerate_etfs();

    for (i, threshold) in [0.0, 60.0, 80.0, 100.0].into_iter().enumerate() {
        let output = fixture.output(&format!("etfs_{}.csv", i));
        let (csv, _) = export(fixture.path(), &output, threshold);
        // five ETF files, the stock and the corrupt file produce no rows
        assert_eq!(csv.len() - 1, 5, "threshold {}", threshold);
    }
}

#[test]
fn test_non_etf_files_are_ignored_silently() {
    let fixture = FixtureDir::new();
    fixture
        .add_stock("MSFT", json!(1))
        .write_json("fund.json", &json!({ "General": { "Type": "FUND", "Code": "VFIAX" } }));
    let output = fixture.output("etfs.csv");

    let (csv, summary) = export(fixture.path(), &output, 80.0);
    assert_eq!(csv.len(), 1);
    assert!(summary.is_empty());
}

#[test]
fn test_single_valid_holding_is_excluded_from_peers() {
    let fixture = FixtureDir::new();
    fixture
        .write_json(
            "solo.json",
            &json!({
                "General": { "Type": "ETF", "Code": "SOLO" },
                "ETF_Data": { "TotalAssets": 10, "Holdings": { "AAA.US": {}, "BBBUS": {} } }
            }),
        )
        .add_etf("PAIR", json!(20), &["AAA.US", "BBB.US"]);
    let output = fixture.output("etfs.csv");

    let (csv, summary) = export(fixture.path(), &output, 0.0);
    assert!(summary.is_empty());

    let pair = csv.iter().find(|row| row[0] == "PAIR").unwrap();
    let solo = csv.iter().find(|row| row[0] == "SOLO").unwrap();

    assert_eq!(solo[4], "AAA.US");
    assert_eq!(solo[3], "US(100.0)");
    // 50% overlap, but SOLO has one valid holding
    assert_eq!(pair[5..].to_vec(), vec!["", "0"]);
    assert_eq!(solo[5..].to_vec(), vec!["", "0"]);
}

#[test]
fn test_missing_input_directory_is_fatal() {
    let fixture = FixtureDir::new();
    let mut summary = ErrorSummary::new();
    let result = load_etfs(&fixture.path().join("missing"), &mut summary, &ProgressBar::hidden());
    assert!(result.is_err());
}
