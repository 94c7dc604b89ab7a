//! Source text normalization applied before any pattern matching.

use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern"));

/// Strips block comments (`/* ... */`, including `/** ... */` doc comments).
///
/// Each comment is replaced by a single space. Newlines inside a comment are
/// kept after that space so line numbers derived from the normalized text
/// still match the original source; character offsets are not preserved.
///
/// # Example
///
/// ```
/// use http_from_source::normalizer::strip_block_comments;
///
/// assert_eq!(strip_block_comments("a/* note */b"), "a b");
/// ```
pub fn strip_block_comments(text: &str) -> String {
    BLOCK_COMMENT
        .replace_all(text, |caps: &regex::Captures| {
            let newlines = caps[0].matches('\n').count();
            let mut replacement = String::with_capacity(newlines + 1);
            replacement.push(' ');
            replacement.extend(std::iter::repeat('\n').take(newlines));
            replacement
        })
        .into_owned()
}

/// Returns at most `window` bytes of `text` immediately preceding `offset`.
///
/// The start is moved forward to the next character boundary, so the slice may
/// be slightly shorter than `window` for non-ASCII text.
pub fn lookback(text: &str, offset: usize, window: usize) -> &str {
    let end = offset.min(text.len());
    let mut start = end.saturating_sub(window);
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..end]
}

/// Counts the 1-based line on which `offset` lies.
pub fn line_number_at(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
