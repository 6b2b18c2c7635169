/// Truncate a string to at most `max` characters.
///
/// Counts characters rather than bytes so multi-byte text never splits
/// mid-character. Returns the original slice when it is short enough.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((index, _)) => &s[..index],
        None => s,
    }
}
