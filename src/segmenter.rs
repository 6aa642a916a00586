//! Minimum-cost segmentation of a code-point buffer.
//!
//! A single left-to-right dynamic-programming sweep relaxes one transition
//! per admissible token kind at every reachable index: number/currency
//! groups, separators, dotted acronyms, dictionary matches of every length up
//! to the longest word, and script-aware cluster fallbacks for text the
//! dictionary does not know. Ties keep the earlier relaxation, so output is
//! deterministic for a fixed dictionary. Three cleanup passes then run over
//! the reconstructed path.
//!
//! Orthographic constraints are enforced by a repair mode: an index right
//! after a coeng, or sitting on a dependent vowel, must not start a token.
//! The only transition out of such an index is a heavily penalized
//! single-code-point step, which keeps arbitrarily broken input coverable.

use std::cell::RefCell;

use crate::chars::{
    is_coeng, is_consonant, is_currency_symbol, is_dependent_vowel, is_digit,
    is_independent_vowel, is_khmer_char, is_separator, is_sign, is_valid_single_word,
};
use crate::dictionary::Dictionary;
use crate::postprocess::{coalesce_unknowns, merge_sign_orphans, snap_stray_consonants};
use crate::transcode::{decode_into, encode_range, strip_zwsp};

/// Extra penalty on top of the unknown cost for a repair-mode step.
const REPAIR_PENALTY: f32 = 50.0;
/// Extra penalty for consuming a lone consonant that is not a word by itself.
const INVALID_SINGLE_PENALTY: f32 = 10.0;
const NUMBER_COST: f32 = 1.0;
const ACRONYM_COST: f32 = 1.0;
const SEPARATOR_COST: f32 = 0.1;

/// Per-thread scratch space. Segmentation is called once per input record,
/// potentially from many worker threads; reusing these buffers keeps the hot
/// path free of per-call allocation. Contents are reset on every call.
struct Scratch {
    cps: Vec<char>,
    dp_cost: Vec<f32>,
    dp_parent: Vec<i32>,
}

thread_local! {
    static SCRATCH: RefCell<Scratch> = RefCell::new(Scratch {
        cps: Vec::new(),
        dp_cost: Vec::new(),
        dp_parent: Vec::new(),
    });
}

/// The segmentation engine. Owns its dictionary; share one instance across
/// threads by reference, each call is independent.
pub struct Segmenter {
    dictionary: Dictionary,
}

impl Segmenter {
    pub fn new(dictionary: Dictionary) -> Self {
        Segmenter { dictionary }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Segment one record into word-like tokens. Zero-width spaces are
    /// stripped first; concatenating the result reproduces the stripped
    /// input exactly.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let cleaned = strip_zwsp(text);
        if cleaned.is_empty() {
            return Vec::new();
        }

        let segments = SCRATCH.with(|scratch| {
            let mut scratch = scratch.borrow_mut();
            let Scratch {
                cps,
                dp_cost,
                dp_parent,
            } = &mut *scratch;
            decode_into(&cleaned, cps);
            self.best_path(cps, dp_cost, dp_parent)
        });

        let segments = snap_stray_consonants(segments, &self.dictionary);
        let segments = merge_sign_orphans(segments, &self.dictionary);
        coalesce_unknowns(segments, &self.dictionary)
    }

    /// Run the sweep over `cps` and reconstruct the cheapest partition.
    fn best_path(
        &self,
        cps: &[char],
        dp_cost: &mut Vec<f32>,
        dp_parent: &mut Vec<i32>,
    ) -> Vec<String> {
        let n = cps.len();
        dp_cost.clear();
        dp_cost.resize(n + 1, f32::INFINITY);
        dp_parent.clear();
        dp_parent.resize(n + 1, -1);
        dp_cost[0] = 0.0;

        let max_word_length = self.dictionary.max_word_length();
        let unknown_cost = self.dictionary.unknown_cost();

        for i in 0..n {
            let here = dp_cost[i];
            if here.is_infinite() {
                continue;
            }
            let c = cps[i];

            // Repair mode: a segment must not start right after a coeng or
            // on a dependent vowel. Consume one code point and move on.
            if (i > 0 && is_coeng(cps[i - 1])) || is_dependent_vowel(c) {
                relax(dp_cost, dp_parent, i, i + 1, here + unknown_cost + REPAIR_PENALTY);
                continue;
            }

            // Number / currency group.
            let currency_start =
                is_currency_symbol(c) && cps.get(i + 1).is_some_and(|&d| is_digit(d));
            if is_digit(c) || currency_start {
                let len = number_length(cps, i);
                relax(dp_cost, dp_parent, i, i + len, here + NUMBER_COST);
            } else if is_separator(c) {
                relax(dp_cost, dp_parent, i, i + 1, here + SEPARATOR_COST);
            }

            // Acronym group (cluster-dot sequences like ស.ភ.ភ.ព.).
            if is_acronym_start(cps, i) {
                let len = acronym_length(cps, i);
                relax(dp_cost, dp_parent, i, i + len, here + ACRONYM_COST);
            }

            // Dictionary matches of every admissible length.
            let end_limit = (i + max_word_length).min(n);
            for j in (i + 1)..=end_limit {
                if let Some(word_cost) = self.dictionary.lookup_codepoints(cps, i, j) {
                    relax(dp_cost, dp_parent, i, j, here + word_cost);
                }
            }

            // Unknown fallback: a whole cluster for Khmer text, one code
            // point otherwise.
            if is_khmer_char(c) {
                let len = cluster_length(cps, i);
                let mut step = unknown_cost;
                if len == 1 && !is_valid_single_word(c) {
                    step += INVALID_SINGLE_PENALTY;
                }
                relax(dp_cost, dp_parent, i, i + len, here + step);
            } else {
                relax(dp_cost, dp_parent, i, i + 1, here + unknown_cost);
            }
        }

        // Walk the parent chain backwards and emit segments. The transition
        // set covers every index, so a missing parent means dictionary or
        // state corruption; recover what the tail walk produced instead of
        // aborting.
        let mut segments: Vec<String> = Vec::new();
        let mut cur = n;
        while cur > 0 {
            let parent = dp_parent[cur];
            if parent < 0 {
                eprintln!(
                    "[WARN] could not cover the input, stuck at code point {cur} of {n}; returning partial segmentation"
                );
                break;
            }
            let parent = parent as usize;
            segments.push(encode_range(cps, parent, cur));
            cur = parent;
        }
        segments.reverse();
        segments
    }
}

#[inline]
fn relax(dp_cost: &mut [f32], dp_parent: &mut [i32], from: usize, to: usize, cost: f32) {
    if to < dp_cost.len() && cost < dp_cost[to] {
        dp_cost[to] = cost;
        dp_parent[to] = from as i32;
    }
}

/// Whether a Khmer cluster may begin here (base consonant or independent
/// vowel).
#[inline]
fn is_cluster_start(c: char) -> bool {
    is_consonant(c) || is_independent_vowel(c)
}

/// Length of the cluster starting at `start`: the base code point, then any
/// number of coeng+consonant pairs, dependent vowels and signs. Non-cluster
/// starts count as length 1.
fn cluster_length(cps: &[char], start: usize) -> usize {
    if !is_cluster_start(cps[start]) {
        return 1;
    }

    let mut i = start + 1;
    while i < cps.len() {
        let c = cps[i];
        if is_coeng(c) {
            if i + 1 < cps.len() && is_consonant(cps[i + 1]) {
                i += 2;
                continue;
            }
            break;
        }
        if is_dependent_vowel(c) || is_sign(c) {
            i += 1;
            continue;
        }
        break;
    }
    i - start
}

/// Length of the digit group starting at `start`. A comma, dot or space
/// continues the group only when a digit follows it immediately, which keeps
/// thousand separators and decimal points inside one token.
fn number_length(cps: &[char], start: usize) -> usize {
    if !is_digit(cps[start]) {
        return 0;
    }

    let mut i = start + 1;
    while i < cps.len() {
        let c = cps[i];
        if is_digit(c) {
            i += 1;
            continue;
        }
        if matches!(c, ',' | '.' | ' ') && cps.get(i + 1).is_some_and(|&d| is_digit(d)) {
            i += 2;
            continue;
        }
        break;
    }
    i - start
}

/// Whether a cluster starting at `start` is immediately followed by a dot. A
/// dot with no cluster in front of it never starts an acronym.
fn is_acronym_start(cps: &[char], start: usize) -> bool {
    if !is_cluster_start(cps[start]) {
        return false;
    }
    let dot = start + cluster_length(cps, start);
    cps.get(dot) == Some(&'.')
}

/// Length of the acronym run at `start`: cluster-dot pairs consumed as long
/// as each cluster is followed by its dot.
fn acronym_length(cps: &[char], start: usize) -> usize {
    let mut i = start;
    while i < cps.len() && is_cluster_start(cps[i]) {
        let dot = i + cluster_length(cps, i);
        if cps.get(dot) == Some(&'.') {
            i = dot + 1;
        } else {
            break;
        }
    }
    i - start
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cps(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn segmenter(words: &str, freq: Option<&str>) -> Segmenter {
        Segmenter::new(Dictionary::from_content(words, freq))
    }

    #[test]
    fn test_cluster_length_base_only() {
        assert_eq!(cluster_length(&cps("កខ"), 0), 1);
    }

    #[test]
    fn test_cluster_length_with_subscript_and_vowel() {
        // ស ្រ ី: base, coeng+consonant pair, dependent vowel.
        let text = cps("ស\u{17D2}\u{179A}ីក");
        assert_eq!(cluster_length(&text, 0), 4);
    }

    #[test]
    fn test_cluster_length_trailing_coeng_stops() {
        // Coeng not followed by a consonant ends the cluster.
        let text = cps("ក\u{17D2} ");
        assert_eq!(cluster_length(&text, 0), 1);
    }

    #[test]
    fn test_cluster_length_non_start_is_one() {
        assert_eq!(cluster_length(&cps("។ក"), 0), 1);
        assert_eq!(cluster_length(&cps("៥៥"), 0), 1);
    }

    #[test]
    fn test_number_length_plain_and_khmer_digits() {
        assert_eq!(number_length(&cps("12345x"), 0), 5);
        assert_eq!(number_length(&cps("១២៣៤៥"), 0), 5);
    }

    #[test]
    fn test_number_length_grouped() {
        assert_eq!(number_length(&cps("1,234.56"), 0), 8);
        assert_eq!(number_length(&cps("១ ០០០ ០០០"), 0), 9);
        // Trailing separator without a digit stays outside the group.
        assert_eq!(number_length(&cps("123."), 0), 3);
        assert_eq!(number_length(&cps("12, x"), 0), 2);
    }

    #[test]
    fn test_acronym_detection() {
        let text = cps("ស.ភ.ភ.ព.បាន");
        assert!(is_acronym_start(&text, 0));
        assert_eq!(acronym_length(&text, 0), 8);

        // A lone dot is not an acronym.
        let text = cps(".ក");
        assert!(!is_acronym_start(&text, 0));

        let text = cps("ក ។");
        assert!(!is_acronym_start(&text, 0));
    }

    #[test]
    fn test_dictionary_word_wins() {
        let seg = segmenter("សួស្តី\n", Some(r#"{"សួស្តី": 100}"#));
        assert_eq!(seg.segment("សួស្តី"), vec!["សួស្តី"]);
    }

    #[test]
    fn test_empty_input() {
        let seg = segmenter("", None);
        assert!(seg.segment("").is_empty());
        // Nothing but zero-width spaces is empty after the pre-clean.
        assert!(seg.segment("\u{200B}\u{200B}").is_empty());
    }

    #[test]
    fn test_zwsp_stripped_before_segmentation() {
        let seg = segmenter("សួស្តី\n", None);
        assert_eq!(seg.segment("សួ\u{200B}ស្តី"), vec!["សួស្តី"]);
    }

    #[test]
    fn test_coverage_on_messy_input() {
        let seg = segmenter("ការ\nសួស្តី\n", None);
        for text in [
            "សួស្តីការ",
            "ក្ ",     // orphan coeng before a space
            " ាក",     // leading dependent vowel
            "abcកខគ12", // mixed scripts
            "៛25",
        ] {
            let joined: String = seg.segment(text).concat();
            assert_eq!(joined, text, "coverage broken for {text:?}");
        }
    }

    #[test]
    fn test_repair_mode_is_deterministic() {
        let seg = segmenter("", None);
        let a = seg.segment("ក្ ក្ ា");
        let b = seg.segment("ក្ ក្ ា");
        assert_eq!(a, b);
    }

    #[test]
    fn test_separator_gets_own_segment() {
        let seg = segmenter("សួស្តី\nបង\n", Some(r#"{"សួស្តី": 50, "បង": 50}"#));
        assert_eq!(seg.segment("សួស្តី បង"), vec!["សួស្តី", " ", "បង"]);
    }

    #[test]
    fn test_number_grouping_end_to_end() {
        let seg = segmenter("", None);
        assert_eq!(seg.segment("១២៣៤៥"), vec!["១២៣៤៥"]);
        assert_eq!(seg.segment("1,234.56"), vec!["1,234.56"]);
    }

    #[test]
    fn test_scratch_reuse_across_calls() {
        let seg = segmenter("សួស្តី\n", None);
        // A long call followed by a short one must not see stale state.
        let long_input = "សួស្តី".repeat(40);
        let _ = seg.segment(&long_input);
        assert_eq!(seg.segment("សួស្តី"), vec!["សួស្តី"]);
        assert!(seg.segment("").is_empty());
    }
}
