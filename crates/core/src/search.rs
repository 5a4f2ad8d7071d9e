//! Helpers for the free-text search and filter parameters accepted by list
//! endpoints.

/// Normalize an optional query-string value: trims it and treats a blank
/// value as absent, so `?tag=` behaves like no `tag` parameter at all.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Build an `ILIKE` pattern matching `term` anywhere in a column.
///
/// `%`, `_` and `\` in the user's input are escaped so they match literally.
pub fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// [`non_blank`] followed by [`contains_pattern`].
pub fn optional_contains(value: Option<&str>) -> Option<String> {
    non_blank(value).map(|v| contains_pattern(&v))
}
