use std::fmt;
use std::str::FromStr;

/// Symbol with its `Highlights.MarketCapitalization`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketCapEntry {
    pub symbol: String,
    pub market_cap: i64,
}

impl MarketCapEntry {
    pub fn new(symbol: &str, market_cap: i64) -> Self {
        Self {
            symbol: symbol.to_string(),
            market_cap,
        }
    }

    pub fn category(&self) -> MarketCapCategory {
        MarketCapCategory::for_market_cap(self.market_cap)
    }
}

/// Size buckets, smallest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarketCapCategory {
    Nano,
    Micro,
    Small,
    Mid,
    Large,
    Mega,
    Unknown,
}

const MILLION: i64 = 1_000_000;
const BILLION: i64 = 1_000_000_000;

impl MarketCapCategory {
    pub const ALL: [MarketCapCategory; 7] = [
        MarketCapCategory::Nano,
        MarketCapCategory::Micro,
        MarketCapCategory::Small,
        MarketCapCategory::Mid,
        MarketCapCategory::Large,
        MarketCapCategory::Mega,
        MarketCapCategory::Unknown,
    ];

    pub fn for_market_cap(cap: i64) -> Self {
        match cap {
            c if c < 0 => MarketCapCategory::Unknown,
            c if c < 50 * MILLION => MarketCapCategory::Nano,
            c if c < 300 * MILLION => MarketCapCategory::Micro,
            c if c < 2 * BILLION => MarketCapCategory::Small,
            c if c < 10 * BILLION => MarketCapCategory::Mid,
            c if c < 200 * BILLION => MarketCapCategory::Large,
            _ => MarketCapCategory::Mega,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarketCapCategory::Nano => "nano",
            MarketCapCategory::Micro => "micro",
            MarketCapCategory::Small => "small",
            MarketCapCategory::Mid => "mid",
            MarketCapCategory::Large => "large",
            MarketCapCategory::Mega => "mega",
            MarketCapCategory::Unknown => "unknown",
        }
    }

    /// `{name}_market_caps.csv`
    pub fn file_name(&self) -> String {
        format!("{}_market_caps.csv", self.name())
    }
}

impl fmt::Display for MarketCapCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MarketCapCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MarketCapCategory::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown market cap category '{}'", s))
    }
}
