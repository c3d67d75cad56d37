//! Game-name normalization shared by the resolver, the public API and the
//! title converter.
//!
//! Two forms exist:
//!
//! - [`normalize_name`]: lowercase, trimmed, internal whitespace collapsed to
//!   a single space. Used for duplicate detection and title matching.
//! - [`compact_name`]: lowercase ASCII letters and digits only. Used for the
//!   `gamename` field of the public API and by the title converter.

/// Lowercase, trim and collapse internal whitespace.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase and strip everything that is not an ASCII letter or digit.
pub fn compact_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Case-insensitive provider comparison (surrounding whitespace ignored).
pub fn same_provider(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Split a pasted block into trimmed, non-empty candidate lines.
pub fn candidate_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Title converter: compact every line of `text`.
///
/// Output lines line up with input lines. Lines that compact to nothing
/// (blank or punctuation only) become empty strings; trailing ones are
/// dropped.
pub fn convert_titles(text: &str) -> Vec<String> {
    let mut converted: Vec<String> = text.lines().map(compact_name).collect();
    while converted.last().is_some_and(String::is_empty) {
        converted.pop();
    }
    converted
}
