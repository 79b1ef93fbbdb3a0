//! Listing search rules.
//!
//! A listing matches a query when the query is a case-insensitive substring
//! of its title, or when one of its tags equals the query exactly. The
//! PostgreSQL store expresses the same rule as
//! `title ILIKE '%q%' OR tags @> ARRAY[q]`; the in-memory store and the
//! client-side list filter call [`matches_query`] directly.

/// Escape character used in generated `LIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// Check whether a listing with the given title and tags matches `query`.
///
/// An empty query matches every listing, mirroring `ILIKE '%%'`.
///
/// # Examples
///
/// ```
/// use roehrenboerse_core::search::matches_query;
/// let tags = vec!["NOS".to_string()];
/// assert!(matches_query("ECC83 Telefunken", &tags, "telefunken"));
/// assert!(matches_query("ECC83 Telefunken", &tags, "NOS"));
/// assert!(!matches_query("ECC83 Telefunken", &tags, "nos"));
/// ```
pub fn matches_query(title: &str, tags: &[String], query: &str) -> bool {
    title_contains(title, query) || tags.iter().any(|t| t == query)
}

/// Case-insensitive substring test on the title.
pub fn title_contains(title: &str, query: &str) -> bool {
    title.to_lowercase().contains(&query.to_lowercase())
}

/// Build a `LIKE`/`ILIKE` pattern that matches `query` anywhere in a value.
///
/// Wildcards (`%`, `_`) and the escape character in the query are escaped
/// so they match literally. Use together with `ESCAPE '\'`.
///
/// # Examples
///
/// ```
/// use roehrenboerse_core::search::contains_pattern;
/// assert_eq!(contains_pattern("EL34"), "%EL34%");
/// assert_eq!(contains_pattern("100%"), "%100\\%%");
/// ```
pub fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
