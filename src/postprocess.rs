//! Cleanup passes over the raw minimum-cost segmentation.
//!
//! The passes run in a fixed order and feed into each other: first stray
//! single consonants are snapped onto a neighbor, then orphaned
//! consonant+sign fragments are merged by position, and finally runs of
//! segments the dictionary cannot vouch for are coalesced into one chunk.

use crate::chars::{is_consonant, is_digit, is_separator, is_valid_single_word};
use crate::dictionary::Dictionary;

const BANTOC: char = '\u{17CB}';
const KAKABAT: char = '\u{17CE}';
const AHSDA: char = '\u{17CF}';
const VOWEL_I: char = '\u{17B7}';
const TOANDAKHIAT: char = '\u{17CD}';
const SAMYOK: char = '\u{17D0}';

fn starts_with_separator(seg: &str) -> bool {
    seg.chars().next().is_some_and(is_separator)
}

/// A lone consonant that is neither a word, a digit, nor a separator is
/// almost always debris from a typo or a broken cluster. Glue it onto the
/// previous segment unless it is fenced in by separators on both sides, in
/// which case it stands as its own (unknown) segment. Missing neighbors at
/// either boundary count as separators.
pub(crate) fn snap_stray_consonants(mut segments: Vec<String>, dict: &Dictionary) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(segments.len());

    for j in 0..segments.len() {
        let seg = std::mem::take(&mut segments[j]);

        let mut chars = seg.chars();
        let Some(first) = chars.next() else {
            continue;
        };
        let is_single = chars.next().is_none();

        let is_invalid_single = is_single
            && !is_valid_single_word(first)
            && !dict.contains(&seg)
            && !is_digit(first)
            && !is_separator(first);

        if !is_invalid_single {
            result.push(seg);
            continue;
        }

        let prev_is_sep = match result.last() {
            Some(prev) => starts_with_separator(prev),
            None => true,
        };
        let next_is_sep = match segments.get(j + 1) {
            Some(next) => starts_with_separator(next),
            None => true,
        };

        if prev_is_sep && next_is_sep {
            result.push(seg);
            continue;
        }

        match result.last_mut() {
            Some(prev) if !starts_with_separator(prev) => prev.push_str(&seg),
            _ => result.push(seg),
        }
    }

    result
}

/// Merge consonant+sign fragments the cost search left orphaned.
///
/// A two-code-point fragment ending in bantoc, kakabat or ahsda belongs to
/// the word before it, as does consonant + i-vowel + toandakhiat; a fragment
/// ending in samyok sannya starts the word after it. Fragments that are
/// dictionary words themselves are left alone.
pub(crate) fn merge_sign_orphans(mut segments: Vec<String>, dict: &Dictionary) -> Vec<String> {
    let n = segments.len();
    let mut merged: Vec<String> = Vec::with_capacity(n);
    let mut i = 0;

    while i < n {
        let curr = std::mem::take(&mut segments[i]);

        if dict.contains(&curr) {
            merged.push(curr);
            i += 1;
            continue;
        }

        let mut chars = curr.chars();
        let c0 = chars.next();
        let c1 = chars.next();
        let c2 = chars.next();
        let tail = chars.next();

        // Two code points: consonant + trailing sign.
        if let (Some(c0), Some(c1), None) = (c0, c1, c2) {
            if is_consonant(c0) {
                if matches!(c1, BANTOC | KAKABAT | AHSDA) {
                    if let Some(prev) = merged.last_mut() {
                        prev.push_str(&curr);
                        i += 1;
                        continue;
                    }
                }
                if c1 == SAMYOK && i + 1 < n {
                    let next = std::mem::take(&mut segments[i + 1]);
                    merged.push(curr + &next);
                    i += 2;
                    continue;
                }
            }
        }

        // Three code points: consonant + i vowel + toandakhiat.
        if let (Some(c0), Some(c1), Some(c2), None) = (c0, c1, c2, tail) {
            if is_consonant(c0) && c1 == VOWEL_I && c2 == TOANDAKHIAT {
                if let Some(prev) = merged.last_mut() {
                    prev.push_str(&curr);
                    i += 1;
                    continue;
                }
            }
        }

        merged.push(curr);
        i += 1;
    }

    merged
}

/// Whether the dictionary (or its own shape) vouches for a segment.
fn is_known_segment(seg: &str, dict: &Dictionary) -> bool {
    let mut chars = seg.chars();
    let Some(first) = chars.next() else {
        return true;
    };
    let is_single = chars.next().is_none();

    if is_digit(first) || dict.contains(seg) {
        return true;
    }
    if is_single && (is_valid_single_word(first) || is_separator(first)) {
        return true;
    }
    // Dotted multi-code-point segments are acronyms assembled upstream.
    !is_single && seg.contains('.')
}

/// Concatenate runs of unknown segments into single chunks, flushing the run
/// whenever a known segment (or end of input) arrives.
pub(crate) fn coalesce_unknowns(segments: Vec<String>, dict: &Dictionary) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(segments.len());
    let mut pending = String::new();

    for seg in segments {
        if seg.is_empty() {
            continue;
        }
        if is_known_segment(&seg, dict) {
            if !pending.is_empty() {
                result.push(std::mem::take(&mut pending));
            }
            result.push(seg);
        } else {
            pending.push_str(&seg);
        }
    }

    if !pending.is_empty() {
        result.push(pending);
    }

    result
}
