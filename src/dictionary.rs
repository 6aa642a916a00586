//! Dictionary model: word list and frequency table in, costed prefix index
//! out.
//!
//! Loading runs in five steps: read the word list and expand every entry with
//! its spelling variants, drop entries that can never be legitimate words,
//! turn corpus frequencies into unigram log-probability costs, recompute the
//! maximum word length, and index everything into the trie. The result is
//! immutable and freely shared across worker threads.

use std::fs;
use std::path::Path;

use fxhash::{FxHashMap, FxHashSet};

use crate::chars::is_valid_single_word;
use crate::trie::Trie;
use crate::variants::spelling_variants;

const REPETITION_MARK: char = '\u{17D7}';
const COENG: char = '\u{17D2}';
const INDEP_OR: char = '\u{17AC}'; // ឬ, "or"

/// Scalars used when no frequency table is available.
const FALLBACK_DEFAULT_COST: f32 = 10.0;
const FALLBACK_UNKNOWN_COST: f32 = 20.0;

/// Corpus counts are clamped up to this floor so that rare words and
/// unseen-but-listed words cost the same.
const MIN_FREQ_FLOOR: f64 = 5.0;

/// The loaded dictionary: accepted words, per-word costs, and the trie used
/// by the segmenter's inner loop.
pub struct Dictionary {
    trie: Trie,
    words: FxHashSet<String>,
    costs: FxHashMap<String, f32>,
    max_word_length: usize,
    default_cost: f32,
    unknown_cost: f32,
}

impl Dictionary {
    /// Load from a newline-delimited word list and a `{word: count}` JSON
    /// frequency table. Unreadable files degrade instead of failing: a
    /// missing word list yields an empty but usable dictionary, a missing
    /// frequency table falls back to flat default costs. Logs what it loaded.
    pub fn load(dict_path: &Path, freq_path: &Path) -> Dictionary {
        let words_content = match fs::read_to_string(dict_path) {
            Ok(content) => content,
            Err(err) => {
                eprintln!(
                    "[WARN] could not read word list {}: {err}",
                    dict_path.display()
                );
                String::new()
            }
        };

        let freq_content = match fs::read_to_string(freq_path) {
            Ok(content) => Some(content),
            Err(err) => {
                eprintln!(
                    "[WARN] could not read frequency table {}: {err}; using default costs",
                    freq_path.display()
                );
                None
            }
        };

        let dict = Dictionary::from_content(&words_content, freq_content.as_deref());
        eprintln!(
            "[INFO] loaded {} words, {} with frequencies, max length {} code points",
            dict.words.len(),
            dict.costs.len(),
            dict.max_word_length
        );
        dict
    }

    /// Build from in-memory text. This is the primitive behind [`Dictionary::load`]
    /// and the entry point for tests and embedders with their own data
    /// sources.
    pub fn from_content(word_list: &str, freq_json: Option<&str>) -> Dictionary {
        let accepted = collect_words(word_list);
        let (costs, default_cost, unknown_cost) = calculate_costs(freq_json, &accepted);

        let mut max_word_length = 0;
        let mut trie = Trie::new();
        let mut cps = Vec::new();
        for word in &accepted {
            cps.clear();
            cps.extend(word.chars());
            max_word_length = max_word_length.max(cps.len());

            let cost = costs.get(word).copied().unwrap_or(default_cost);
            trie.insert(&cps, cost);
        }

        Dictionary {
            trie,
            words: accepted,
            costs,
            max_word_length,
            default_cost,
            unknown_cost,
        }
    }

    /// Number of accepted words, variants included.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Longest accepted word, in code points. Bounds the segmenter's match
    /// window.
    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    /// Cost assigned to accepted words without an explicit frequency.
    pub fn default_cost(&self) -> f32 {
        self.default_cost
    }

    /// Per-code-point penalty for text no dictionary path explains.
    pub fn unknown_cost(&self) -> f32 {
        self.unknown_cost
    }

    /// Exact membership check on the UTF-8 form.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Cost of `word`: its unigram cost, the default cost for accepted words
    /// without one, or the unknown cost for anything else.
    pub fn get_word_cost(&self, word: &str) -> f32 {
        if let Some(&cost) = self.costs.get(word) {
            return cost;
        }
        if self.words.contains(word) {
            return self.default_cost;
        }
        self.unknown_cost
    }

    /// Trie lookup over `cps[start..end]`. `Some(cost)` iff that exact range
    /// is an accepted word.
    #[inline]
    pub fn lookup_codepoints(&self, cps: &[char], start: usize, end: usize) -> Option<f32> {
        self.trie.lookup(cps, start, end)
    }
}

/// Read the word list, expand variants, and drop invalid entries.
fn collect_words(word_list: &str) -> FxHashSet<String> {
    let mut accepted: FxHashSet<String> = FxHashSet::default();

    for line in word_list.lines() {
        let word = line.trim();
        if word.is_empty() {
            continue;
        }

        // Single-character entries are only real words on the allow-list.
        let mut chars = word.chars();
        if let (Some(first), None) = (chars.next(), chars.next()) {
            if !is_valid_single_word(first) {
                continue;
            }
        }

        for variant in spelling_variants(word) {
            accepted.insert(variant);
        }
        accepted.insert(word.to_string());
    }

    // Entries that survive insertion but can never be legitimate words:
    // anything carrying the repetition mark, anything starting with a bare
    // coeng, and compounds glued together with ឬ whose parts are all known
    // words themselves (the compound is redundant and blocks splitting).
    let mut to_remove: Vec<String> = Vec::new();
    for word in &accepted {
        if word.contains(REPETITION_MARK) || word.starts_with(COENG) {
            to_remove.push(word.clone());
            continue;
        }
        if word.contains(INDEP_OR) && word.chars().nth(1).is_some() {
            let decomposable = word
                .split(INDEP_OR)
                .all(|part| part.is_empty() || accepted.contains(part));
            if decomposable {
                to_remove.push(word.clone());
            }
        }
    }
    for word in &to_remove {
        accepted.remove(word);
    }
    // Upstream word lists ship the repetition mark as a standalone entry.
    accepted.remove("\u{17D7}");

    accepted
}

/// Turn the frequency table into per-word costs plus the two shared scalars.
/// Returns flat fallback costs when the table is missing, malformed at the
/// top level, or empty. Individual non-numeric values only skip their key.
fn calculate_costs(
    freq_json: Option<&str>,
    accepted: &FxHashSet<String>,
) -> (FxHashMap<String, f32>, f32, f32) {
    let mut costs: FxHashMap<String, f32> = FxHashMap::default();
    let mut default_cost = FALLBACK_DEFAULT_COST;
    let mut unknown_cost = FALLBACK_UNKNOWN_COST;

    let Some(freq_json) = freq_json else {
        return (costs, default_cost, unknown_cost);
    };

    let raw: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(freq_json) {
        Ok(map) => map,
        Err(err) => {
            eprintln!("[WARN] frequency table is not a JSON object: {err}; using default costs");
            return (costs, default_cost, unknown_cost);
        }
    };

    let mut effective: FxHashMap<String, f64> = FxHashMap::default();
    let mut total_tokens = 0.0f64;

    for (word, value) in &raw {
        let Some(count) = value.as_f64() else {
            continue;
        };
        let eff = count.max(MIN_FREQ_FLOOR);
        effective.insert(word.clone(), eff);

        // Variants count as aliases of the base form, not extra mass.
        for variant in spelling_variants(word) {
            effective.entry(variant).or_insert(eff);
        }
        total_tokens += eff;
    }

    if total_tokens > 0.0 {
        let min_prob = MIN_FREQ_FLOOR / total_tokens;
        default_cost = -min_prob.log10() as f32;
        unknown_cost = default_cost + 5.0;

        for (word, count) in effective {
            if !accepted.contains(&word) {
                continue;
            }
            let prob = count / total_tokens;
            if prob > 0.0 {
                costs.insert(word, -prob.log10() as f32);
            }
        }
    }

    (costs, default_cost, unknown_cost)
}
