//! Text ↔ code-point buffer conversion and zero-width-space removal.
//!
//! The segmenter works on a dense `Vec<char>` so that dynamic-programming
//! indices address scalars, not bytes. UTF-8 stays at the edges: decode once
//! per call into a reusable buffer, re-encode only the final segment ranges.

use std::borrow::Cow;

/// Zero-width space, used in some Khmer corpora as an informal word break.
/// It carries no information for segmentation and is stripped up front.
pub const ZWSP: char = '\u{200B}';

/// Remove all zero-width spaces. Borrows when the input has none, which is
/// the common case on clean corpora.
pub fn strip_zwsp(text: &str) -> Cow<'_, str> {
    if text.contains(ZWSP) {
        Cow::Owned(text.chars().filter(|&c| c != ZWSP).collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Decode `text` into `out`, replacing its previous contents.
pub fn decode_into(text: &str, out: &mut Vec<char>) {
    out.clear();
    out.extend(text.chars());
}

/// Append the UTF-8 encoding of `cps[start..end]` to `out` without clearing
/// it first.
pub fn encode_range_into(cps: &[char], start: usize, end: usize, out: &mut String) {
    for &c in &cps[start..end] {
        out.push(c);
    }
}

/// Encode `cps[start..end]` as an owned string.
pub fn encode_range(cps: &[char], start: usize, end: usize) -> String {
    cps[start..end].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_zwsp_borrows_when_clean() {
        let text = "សួស្តី";
        assert!(matches!(strip_zwsp(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_strip_zwsp_removes_all() {
        let text = "សួ\u{200B}ស្តី\u{200B}";
        let cleaned = strip_zwsp(text);
        assert_eq!(cleaned.as_ref(), "សួស្តី");
    }

    #[test]
    fn test_decode_reuses_buffer() {
        let mut buf = vec!['x'; 32];
        decode_into("កខ", &mut buf);
        assert_eq!(buf, vec!['ក', 'ខ']);
    }

    #[test]
    fn test_encode_round_trip() {
        let text = "ខ្ញុំ123";
        let cps: Vec<char> = text.chars().collect();
        assert_eq!(encode_range(&cps, 0, cps.len()), text);

        let mut out = String::from("x");
        encode_range_into(&cps, 5, 8, &mut out);
        assert_eq!(out, "x123");
    }
}
