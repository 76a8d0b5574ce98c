//! Company name and ticker extraction for SWOT and company-profile requests.

use regex::Regex;
use std::sync::LazyLock;

/// `$NKE`, `($NKE)` or `(NKE)`.
static TICKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(?\$([A-Za-z]{1,5})\b\)?|\(([A-Z]{1,5})\)").expect("ticker pattern is valid")
});

/// Request phrasing in front of the company name.
static LEADING_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:(?:please\s+)?(?:give me|show me|create|generate|run|build|get|do)\s+)?(?:an?\s+|the\s+)?(?:marketing\s+)?(?:swot(?:\s+analysis)?|company\s+profile|profile|analysis)\s+(?:for|of|on|about)\s+",
    )
    .expect("leading phrase pattern is valid")
});

/// A company named in a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRef {
    pub name: String,
    pub stock_symbol: Option<String>,
}

/// Pull the company name and optional ticker out of a free-text query.
///
/// Falls back to the ticker, then to the trimmed query, when nothing is left
/// after stripping.
pub fn extract_company(query: &str) -> CompanyRef {
    let stock_symbol = TICKER.captures(query).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_uppercase())
    });

    let without_ticker = TICKER.replace_all(query, "");
    let stripped = LEADING_PHRASE.replace(&without_ticker, "");
    let name = stripped
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | '?' | '!' | ':'))
        .to_string();

    let name = if !name.is_empty() {
        name
    } else if let Some(symbol) = &stock_symbol {
        symbol.clone()
    } else {
        query.trim().to_string()
    };

    CompanyRef { name, stock_symbol }
}
