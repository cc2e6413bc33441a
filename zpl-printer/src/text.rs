//! Field text utilities
//!
//! Label printers are configured for UTF-8 (`^CI28`), so field limits count
//! characters rather than encoded bytes.

/// Number of characters in a field value
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to at most `max_chars` characters
///
/// Never splits a multi-byte character. Applying it twice with the same limit
/// gives the same result as applying it once.
pub fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
