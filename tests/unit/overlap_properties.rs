//! Overlap matrix properties

use pretty_assertions::assert_eq;
use test_log::test;

use rust_fundamentals::analysis::OverlapMatrix;

use crate::common::fixtures::{holdings_map, xyz_holdings};
use crate::common::logging;

fn sample_matrix() -> OverlapMatrix {
    OverlapMatrix::compute(&holdings_map(&[
        ("VTI", &["AAPL.US", "MSFT.US", "NVDA.US", "AMZN.US", "META.US"]),
        ("VOO", &["AAPL.US", "MSFT.US", "NVDA.US", "AMZN.US"]),
        ("QQQ", &["AAPL.US", "MSFT.US", "NVDA.US", "AVGO.US"]),
        ("EWJ", &["7203.JP", "6758.JP", "9984.JP"]),
        ("ONE", &["AAPL.US"]),
        ("DUP", &["7203.JP", "6758.JP", "9984.JP"]),
    ]))
}

#[test]
fn test_overlap_is_symmetric() {
    logging::log_test_step("Checking overlap symmetry for every pair");
    let matrix = sample_matrix();

    for a in matrix.symbols() {
        for b in matrix.symbols() {
            assert_eq!(matrix.overlap(a, b), matrix.overlap(b, a), "{} vs {}", a, b);
        }
    }
}

#[test]
fn test_overlap_is_a_percentage() {
    let matrix = sample_matrix();

    for a in matrix.symbols() {
        for (b, value) in matrix.row(a).unwrap() {
            assert!((0.0..=100.0).contains(&value), "{} vs {} = {}", a, b, value);
        }
    }
}

#[test]
fn test_disjoint_holdings_have_zero_overlap() {
    let matrix = sample_matrix();
    assert_eq!(matrix.overlap("VTI", "EWJ"), Some(0.0));
    assert_eq!(matrix.overlap("ONE", "DUP"), Some(0.0));
}

#[test]
fn test_identical_holdings_have_full_overlap() {
    let matrix = sample_matrix();
    assert_eq!(matrix.overlap("EWJ", "DUP"), Some(100.0));
}

#[test]
fn test_self_overlap_is_excluded() {
    let matrix = sample_matrix();
    assert_eq!(matrix.overlap("VTI", "VTI"), None);

    let row = matrix.row("VTI").unwrap();
    assert_eq!(row.len(), matrix.len() - 1);
    assert!(row.iter().all(|(symbol, _)| *symbol != "VTI"));
}

#[test]
fn test_xyz_walkthrough_values() {
    let matrix = OverlapMatrix::compute(&xyz_holdings());
    logging::log_test_data("X row", &matrix.row("X"));

    let xy = matrix.overlap("X", "Y").unwrap();
    assert_eq!(format!("{:.1}", xy), "66.7");
    assert_eq!(matrix.overlap("X", "Z"), Some(0.0));
    assert_eq!(matrix.overlap("Y", "Z"), Some(0.0));
}

#[test]
fn test_subset_overlap_value() {
    // 4 shared out of a 5-code union
    let matrix = sample_matrix();
    assert_eq!(matrix.overlap("VTI", "VOO"), Some(80.0));
    // 3 shared out of a 6-code union
    assert_eq!(matrix.overlap("VTI", "QQQ"), Some(50.0));
}
