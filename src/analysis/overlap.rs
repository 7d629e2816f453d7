//! Pairwise holdings overlap between ETFs.
//!
//! Overlap is the Jaccard similarity of two holdings sets as a percentage:
//! `|A ∩ B| / |A ∪ B| × 100`, and 0 when both sets are empty.
//!
//! Holding codes are interned to integer ids and every set is kept as a
//! sorted id vector, so each pair costs one linear merge. Only the upper
//! triangle of the matrix is stored.

use std::cmp::Ordering;
use std::collections::HashMap;

use indicatif::ProgressBar;
use tracing::info;

use crate::loader::HoldingsMap;

#[derive(Debug, Clone)]
pub struct OverlapMatrix {
    symbols: Vec<String>,
    index: HashMap<String, usize>,
    sizes: Vec<usize>,
    upper: Vec<f64>,
}

impl OverlapMatrix {
    pub fn compute(holdings: &HoldingsMap) -> Self {
        Self::compute_with_progress(holdings, &ProgressBar::hidden())
    }

    pub fn compute_with_progress(holdings: &HoldingsMap, progress: &ProgressBar) -> Self {
        let mut ids: HashMap<&str, u32> = HashMap::new();
        let mut sets: Vec<Vec<u32>> = Vec::with_capacity(holdings.len());
        for codes in holdings.values() {
            let mut set = Vec::with_capacity(codes.len());
            for code in codes {
                let next = ids.len() as u32;
                set.push(*ids.entry(code.as_str()).or_insert(next));
            }
            set.sort_unstable();
            sets.push(set);
        }

        let n = sets.len();
        let total_pairs = pair_count(n);
        info!("🔗 Calculating overlap among {} ETFs ({} pairs)", n, total_pairs);
        progress.set_length(total_pairs as u64);

        let mut upper = Vec::with_capacity(total_pairs);
        for i in 0..n {
            for j in (i + 1)..n {
                upper.push(sorted_overlap(&sets[i], &sets[j]));
            }
            progress.inc((n - i - 1) as u64);
        }
        progress.finish_and_clear();

        let symbols: Vec<String> = holdings.keys().cloned().collect();
        let index = symbols
            .iter()
            .enumerate()
            .map(|(i, symbol)| (symbol.clone(), i))
            .collect();

        OverlapMatrix {
            symbols,
            index,
            sizes: sets.iter().map(Vec::len).collect(),
            upper,
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Number of holdings the symbol was computed with
    pub fn holdings_count(&self, symbol: &str) -> Option<usize> {
        self.index.get(symbol).map(|&i| self.sizes[i])
    }

    /// Overlap of two distinct known symbols
    pub fn overlap(&self, a: &str, b: &str) -> Option<f64> {
        let i = *self.index.get(a)?;
        let j = *self.index.get(b)?;
        match i.cmp(&j) {
            Ordering::Equal => None,
            Ordering::Less => Some(self.upper[self.pair_index(i, j)]),
            Ordering::Greater => Some(self.upper[self.pair_index(j, i)]),
        }
    }

    /// Overlap with every other symbol, in load order
    pub fn row(&self, symbol: &str) -> Option<Vec<(&str, f64)>> {
        let i = *self.index.get(symbol)?;
        let row = (0..self.symbols.len())
            .filter(|&j| j != i)
            .map(|j| {
                let value = if i < j {
                    self.upper[self.pair_index(i, j)]
                } else {
                    self.upper[self.pair_index(j, i)]
                };
                (self.symbols[j].as_str(), value)
            })
            .collect();
        Some(row)
    }

    // Position of (i, j), i < j, in the row-major upper triangle
    fn pair_index(&self, i: usize, j: usize) -> usize {
        let n = self.symbols.len();
        i * (2 * n - i - 1) / 2 + (j - i - 1)
    }
}

fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Jaccard overlap of two sorted, duplicate-free id slices, in percent
fn sorted_overlap(a: &[u32], b: &[u32]) -> f64 {
    let (mut i, mut j, mut shared) = (0, 0, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                shared += 1;
                i += 1;
                j += 1;
            }
        }
    }
    overlap_percent(shared, a.len() + b.len() - shared)
}

pub fn overlap_percent(shared: usize, union: usize) -> f64 {
    if union == 0 {
        0.0
    } else {
        shared as f64 / union as f64 * 100.0
    }
}
