use indexmap::IndexMap;

use crate::models::etf::country_suffix;
use crate::utils::format_percent;

/// Share of holdings per country suffix, as `(country, percent)`, largest first.
/// Countries with equal shares keep first-seen order.
pub fn country_shares<'a, I>(codes: I) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    let mut total = 0usize;
    for code in codes {
        *counts.entry(country_suffix(code)).or_default() += 1;
        total += 1;
    }
    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<(String, f64)> = counts
        .into_iter()
        .map(|(country, count)| (country.to_string(), count as f64 / total as f64 * 100.0))
        .collect();
    shares.sort_by(|a, b| b.1.total_cmp(&a.1));
    shares
}

/// `US(66.7),JP(33.3)`; empty input gives an empty string
pub fn country_distribution<'a, I>(codes: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    country_shares(codes)
        .iter()
        .map(|(country, share)| format!("{}({})", country, format_percent(*share)))
        .collect::<Vec<_>>()
        .join(",")
}
