//! Orthographic variant generation for dictionary entries.
//!
//! Khmer typists spell some words in more than one valid way. Two families of
//! alternates are generated for every dictionary entry and indexed alongside
//! it with the same cost:
//!
//! 1. subscript ta (U+17D2 U+178F) ↔ subscript da (U+17D2 U+178D), rewritten
//!    wholesale in each direction;
//! 2. subscript ro (U+17D2 U+179A) reordered against an adjacent non-ro
//!    subscript, in both directions, applied to the base form and to the
//!    ta/da alternates.

use fxhash::FxHashSet;

const COENG: char = '\u{17D2}';
const TA: char = '\u{178F}';
const DA: char = '\u{178D}';
const RO: char = '\u{179A}';

/// All alternate spellings of `word`, deduplicated. The base form itself is
/// not included.
pub fn spelling_variants(word: &str) -> FxHashSet<String> {
    let mut variants = FxHashSet::default();
    let cps: Vec<char> = word.chars().collect();

    if let Some(v) = swap_subscript(&cps, TA, DA) {
        variants.insert(v);
    }
    if let Some(v) = swap_subscript(&cps, DA, TA) {
        variants.insert(v);
    }

    // Ro reordering runs over the base form and the ta/da alternates.
    let mut forms: Vec<Vec<char>> = Vec::with_capacity(1 + variants.len());
    forms.push(cps);
    forms.extend(variants.iter().map(|v| v.chars().collect::<Vec<char>>()));

    for form in &forms {
        if let Some(v) = reorder_coeng_ro(form, true) {
            variants.insert(v);
        }
        if let Some(v) = reorder_coeng_ro(form, false) {
            variants.insert(v);
        }
    }

    variants
}

/// Rewrite every (coeng, `from`) pair to (coeng, `to`). Returns the rewritten
/// form only when at least one pair matched.
fn swap_subscript(cps: &[char], from: char, to: char) -> Option<String> {
    let mut out = cps.to_vec();
    let mut modified = false;
    for i in 0..out.len().saturating_sub(1) {
        if out[i] == COENG && out[i + 1] == from {
            out[i + 1] = to;
            modified = true;
        }
    }
    modified.then(|| out.into_iter().collect())
}

/// Swap adjacent subscript pairs involving ro. With `ro_first`, rewrites
/// (coeng ro)(coeng other) to (coeng other)(coeng ro); otherwise the mirror.
/// A matched window is consumed whole; the scan otherwise advances one code
/// point at a time.
fn reorder_coeng_ro(cps: &[char], ro_first: bool) -> Option<String> {
    let mut out = cps.to_vec();
    let mut modified = false;
    let mut i = 0;
    while i + 3 < out.len() {
        let window_matches = if ro_first {
            out[i] == COENG && out[i + 1] == RO && out[i + 2] == COENG && out[i + 3] != RO
        } else {
            out[i] == COENG && out[i + 1] != RO && out[i + 2] == COENG && out[i + 3] == RO
        };
        if window_matches {
            out.swap(i, i + 2);
            out.swap(i + 1, i + 3);
            modified = true;
            i += 4;
        } else {
            i += 1;
        }
    }
    modified.then(|| out.into_iter().collect())
}
