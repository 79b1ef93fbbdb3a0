//! Tag parsing and normalization.
//!
//! Tags are stored as an ordered list. Order and duplicates are preserved;
//! only blank entries are removed.

/// Separator used when tags are entered as a single line of text.
pub const TAG_SEPARATOR: char = ',';

/// Split comma-separated tag text into trimmed, non-empty tags.
///
/// # Examples
///
/// ```
/// use roehrenboerse_core::tags::parse_tags;
/// assert_eq!(parse_tags("NOS,, tested"), vec!["NOS", "tested"]);
/// assert!(parse_tags(" , ").is_empty());
/// ```
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim every tag and drop the ones that end up empty.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
