use std::collections::HashSet;

/// A holding code with its optional `Assets_%` weight
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub code: String,
    pub weight: Option<String>,
}

impl Holding {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            weight: None,
        }
    }

    pub fn with_weight(code: &str, weight: &str) -> Self {
        Self {
            code: code.to_string(),
            weight: Some(weight.to_string()),
        }
    }

    /// `CODE(weight)` when the weight is known, the bare code otherwise
    pub fn display(&self) -> String {
        match &self.weight {
            Some(weight) => format!("{}({})", self.code, weight),
            None => self.code.clone(),
        }
    }
}

/// One ETF as loaded from its fundamentals file
#[derive(Debug, Clone, PartialEq)]
pub struct EtfRecord {
    pub symbol: String,
    pub total_assets: Option<f64>,
    pub average_mkt_cap_mil: Option<f64>,
    /// Valid holdings only, in document order
    pub holdings: Vec<Holding>,
}

impl EtfRecord {
    /// Row kept for an ETF whose `TotalAssets` could not be read
    pub fn without_assets(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            total_assets: None,
            average_mkt_cap_mil: None,
            holdings: Vec::new(),
        }
    }

    pub fn holding_codes(&self) -> impl Iterator<Item = &str> {
        self.holdings.iter().map(|h| h.code.as_str())
    }

    pub fn holdings_set(&self) -> HashSet<String> {
        self.holding_codes().map(str::to_string).collect()
    }

    /// Only records with assets and at least one valid holding take part in overlap
    pub fn has_overlap_data(&self) -> bool {
        self.total_assets.is_some() && !self.holdings.is_empty()
    }
}

/// Last `.`-separated segment of a holding code
pub fn country_suffix(code: &str) -> &str {
    code.rsplit('.').next().unwrap_or(code)
}

/// A code is kept only if it has a dot and a two-character country suffix.
pub fn is_valid_holding_code(code: &str) -> bool {
    code.contains('.') && country_suffix(code).chars().count() == 2
}
