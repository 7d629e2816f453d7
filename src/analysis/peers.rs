use crate::analysis::overlap::OverlapMatrix;
use crate::error::{FundamentalsError, Result};
use crate::utils::format_percent;

/// Another ETF whose holdings overlap at or above the threshold
#[derive(Debug, Clone, PartialEq)]
pub struct Peer {
    pub symbol: String,
    pub overlap: f64,
}

impl Peer {
    /// `SYMBOL(66.7)`
    pub fn display(&self) -> String {
        format!("{}({})", self.symbol, format_percent(self.overlap))
    }
}

/// Keeps peers at or above an overlap threshold, best match first
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeerFilter {
    threshold: f64,
}

impl PeerFilter {
    pub fn new(threshold: f64) -> Result<Self> {
        if !threshold.is_finite() {
            return Err(FundamentalsError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Rank one overlap row.
    ///
    /// Entries below the threshold and peers with at most one holding are
    /// dropped. Equal overlaps are ordered by symbol.
    pub fn rank<'a, I, F>(&self, row: I, holdings_count: F) -> Vec<Peer>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
        F: Fn(&str) -> usize,
    {
        let mut peers: Vec<Peer> = row
            .into_iter()
            .filter(|&(symbol, overlap)| overlap >= self.threshold && holdings_count(symbol) > 1)
            .map(|(symbol, overlap)| Peer {
                symbol: symbol.to_string(),
                overlap,
            })
            .collect();

        peers.sort_by(|a, b| b.overlap.total_cmp(&a.overlap).then_with(|| a.symbol.cmp(&b.symbol)));
        peers
    }

    /// Peers of `symbol`. Unknown symbols and single-holding ETFs have none.
    pub fn peers_for(&self, matrix: &OverlapMatrix, symbol: &str) -> Vec<Peer> {
        if matrix.holdings_count(symbol).unwrap_or(0) <= 1 {
            return Vec::new();
        }
        match matrix.row(symbol) {
            Some(row) => self.rank(row, |peer| matrix.holdings_count(peer).unwrap_or(0)),
            None => Vec::new(),
        }
    }
}

/// `A(91.2),B(80.0)`
pub fn peers_display(peers: &[Peer]) -> String {
    peers.iter().map(Peer::display).collect::<Vec<_>>().join(",")
}
