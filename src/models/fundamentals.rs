//! Typed views over a cached fundamentals document.
//!
//! Only the sections the export tools read are modelled. Every section is
//! optional because the provider omits whole blocks depending on the
//! security type, and sometimes sends `[]` where an empty object is meant.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::RecordIssue;
use crate::models::etf::{is_valid_holding_code, Holding};

/// Security type string used for exchange-traded funds
pub const ETF_TYPE: &str = "ETF";

/// Security type string used for mutual funds
pub const FUND_TYPE: &str = "FUND";

/// One `<symbol>.json` file as written by the fundamentals fetcher
#[derive(Debug, Default, Deserialize)]
pub struct FundamentalsDocument {
    #[serde(rename = "General", default, deserialize_with = "object_or_empty_list")]
    pub general: Option<General>,
    #[serde(rename = "ETF_Data", default)]
    pub etf_data: Option<Value>,
    #[serde(rename = "Highlights", default)]
    pub highlights: Option<Value>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct General {
    #[serde(rename = "Type", default)]
    pub security_type: Option<String>,
    #[serde(rename = "Code", default)]
    pub code: Option<String>,
}

/// The `ETF_Data` block. Numeric fields arrive as numbers or strings.
#[derive(Debug, Default, Deserialize)]
pub struct EtfData {
    #[serde(rename = "TotalAssets", default)]
    pub total_assets: Option<Value>,
    #[serde(rename = "Average_Mkt_Cap_Mil", default)]
    pub average_mkt_cap_mil: Option<Value>,
    /// Raw `Holdings` block. Entries are only inspected for valid codes.
    #[serde(rename = "Holdings", default)]
    pub holdings: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Highlights {
    #[serde(rename = "MarketCapitalization", default)]
    pub market_capitalization: Option<Value>,
}

impl FundamentalsDocument {
    pub fn security_type(&self) -> Option<&str> {
        self.general.as_ref()?.security_type.as_deref()
    }

    pub fn is_etf(&self) -> bool {
        self.security_type() == Some(ETF_TYPE)
    }

    pub fn is_fund(&self) -> bool {
        self.security_type() == Some(FUND_TYPE)
    }

    /// `General.Code`, if present and non-blank
    pub fn code(&self) -> Option<&str> {
        self.general
            .as_ref()?
            .code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }

    /// Parse the `ETF_Data` block. A missing block yields an empty one.
    pub fn etf_data(&self) -> Result<EtfData, serde_json::Error> {
        match &self.etf_data {
            Some(Value::Array(items)) if items.is_empty() => Ok(EtfData::default()),
            Some(Value::Null) | None => Ok(EtfData::default()),
            Some(value) => EtfData::deserialize(value),
        }
    }

    pub fn highlights(&self) -> Result<Highlights, serde_json::Error> {
        match &self.highlights {
            Some(Value::Array(items)) if items.is_empty() => Ok(Highlights::default()),
            Some(Value::Null) | None => Ok(Highlights::default()),
            Some(value) => Highlights::deserialize(value),
        }
    }
}

impl EtfData {
    /// Validated `TotalAssets`
    pub fn total_assets(&self) -> Result<f64, RecordIssue> {
        match &self.total_assets {
            None | Some(Value::Null) => Err(RecordIssue::MissingTotalAssets),
            Some(value) => {
                parse_float(value).ok_or_else(|| RecordIssue::InvalidTotalAssets(value_text(value)))
            }
        }
    }

    pub fn average_mkt_cap_mil(&self) -> Option<f64> {
        self.average_mkt_cap_mil.as_ref().and_then(parse_float)
    }

    /// Holdings whose code carries a two-character country suffix, in document order.
    ///
    /// Entries under other codes are never looked at, whatever their shape.
    pub fn valid_holdings(&self) -> Result<Vec<Holding>, RecordIssue> {
        let entries = match &self.holdings {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) if items.is_empty() => return Ok(Vec::new()),
            Some(Value::Object(entries)) => entries,
            Some(other) => {
                return Err(RecordIssue::MalformedHoldings(format!(
                    "expected an object keyed by holding code, got {}",
                    value_kind(other)
                )))
            }
        };

        let mut holdings = Vec::new();
        for (code, info) in entries.iter().filter(|(code, _)| is_valid_holding_code(code)) {
            let info = info.as_object().ok_or_else(|| {
                RecordIssue::MalformedHoldings(format!("{} is {}, not an object", code, value_kind(info)))
            })?;
            holdings.push(Holding {
                code: code.clone(),
                weight: assets_percent(info),
            });
        }
        Ok(holdings)
    }
}

/// `Assets_%` rendered verbatim, or `None` when absent or null
fn assets_percent(info: &Map<String, Value>) -> Option<String> {
    match info.get("Assets_%")? {
        Value::Null => None,
        value => Some(value_text(value)),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Accepts JSON numbers and numeric strings; rejects non-finite values.
pub fn parse_float(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Text of a scalar without JSON quoting
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MapOrList<T> {
    Map(T),
    List(Vec<Value>),
}

fn object_or_empty_list<'de, D>(deserializer: D) -> Result<Option<General>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<MapOrList<General>>::deserialize(deserializer)? {
        Some(MapOrList::Map(general)) => Ok(Some(general)),
        Some(MapOrList::List(items)) if items.is_empty() => Ok(None),
        Some(MapOrList::List(_)) => Err(serde::de::Error::custom("expected General to be an object")),
        None => Ok(None),
    }
}
