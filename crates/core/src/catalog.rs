//! Display rules and field limits for the book catalog.

/// Maximum ISBN length (ISBN-13).
pub const ISBN_MAX_LENGTH: u64 = 13;

/// Display name of an author, e.g. `"Ursula Le Guin"`.
pub fn author_display(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}")
}

/// Display name of a book, e.g. `"Dune (1965)"`.
pub fn book_display(title: &str, publication_year: i32) -> String {
    format!("{title} ({publication_year})")
}

/// Strip the separators people commonly type into an ISBN.
///
/// `"978-0-00-000000-1"` and `"978 0000000001"` both normalize to the
/// digits-only form that is stored and checked for uniqueness.
pub fn normalize_isbn(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '-' | ' '))
        .collect::<String>()
        .to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_display_joins_names() {
        assert_eq!(author_display("Octavia", "Butler"), "Octavia Butler");
    }

    #[test]
    fn book_display_includes_year() {
        assert_eq!(book_display("Kindred", 1979), "Kindred (1979)");
    }

    #[test]
    fn isbn_separators_removed() {
        assert_eq!(normalize_isbn("978-0-00-000000-1"), "9780000000001");
        assert_eq!(normalize_isbn(" 978 0000000001 "), "9780000000001");
        assert_eq!(normalize_isbn("080442957x"), "080442957X");
    }
}
