// src/core/counter.rs

/// Counts the lines of `text` that are non-empty after trimming whitespace.
///
/// `\n`, `\r\n` and a lone `\r` all terminate a line. A trailing line without
/// a terminator is counted when it has content.
///
/// # Examples
///
/// ```
/// use count_loc::count_non_empty_lines;
///
/// assert_eq!(count_non_empty_lines("a\n\n b \n"), 2);
/// assert_eq!(count_non_empty_lines(""), 0);
/// ```
#[inline]
#[must_use]
pub fn count_non_empty_lines(text: &str) -> u64 {
    // `\r\n` splits into a line and an empty piece, which never counts.
    let count = text
        .split(['\n', '\r'])
        .filter(|line| !line.trim().is_empty())
        .count();
    u64::try_from(count).unwrap_or(u64::MAX)
}

/// Decodes file bytes as UTF-8, returning `None` for content that is not text.
#[inline]
#[must_use]
pub fn decode_text(bytes: Vec<u8>) -> Option<String> {
    String::from_utf8(bytes).ok()
}
