//! Shared query parameter types for API handlers.

use std::str::FromStr;

use serde::Deserialize;

/// `?q=` search over a resource's name, used by the simple lists.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Parse an optional filter value. Blank or unparseable values do not
/// filter at all.
pub fn parse_filter<T: FromStr>(raw: Option<&str>) -> Option<T> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
}
