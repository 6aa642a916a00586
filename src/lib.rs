//! # khmercut
//!
//! A fast Khmer word segmenter.
//!
//! Khmer is written without spaces between words, so tokenization is a search
//! problem: this crate loads a word list and a word-frequency table into a
//! code-point trie, derives unigram log-probability costs, and finds the
//! minimum-cost partition of each input line with a dynamic-programming
//! sweep, followed by a few orthography-aware cleanup passes.
//!
//! ## Quick Start
//!
//! ```rust
//! use khmercut::{Dictionary, Segmenter};
//!
//! // Build a dictionary from in-memory data (use `Dictionary::load` for
//! // word-list and frequency files on disk).
//! let words = "ខ្ញុំ\nស្រលាញ់\nកម្ពុជា";
//! let freqs = r#"{"ខ្ញុំ": 900, "ស្រលាញ់": 400, "កម្ពុជា": 800}"#;
//! let dictionary = Dictionary::from_content(words, Some(freqs));
//!
//! let segmenter = Segmenter::new(dictionary);
//! let segments = segmenter.segment("ខ្ញុំស្រលាញ់កម្ពុជា");
//! assert_eq!(segments, vec!["ខ្ញុំ", "ស្រលាញ់", "កម្ពុជា"]);
//! ```
//!
//! ## Concurrency
//!
//! A [`Segmenter`] is immutable after construction and safe to share across
//! threads by reference; per-call working memory lives in thread-local
//! scratch buffers. The bundled CLI drives one call per input line on a
//! rayon thread pool.

pub mod chars;
pub mod dictionary;
mod postprocess;
pub mod segmenter;
pub mod transcode;
pub mod trie;
pub mod variants;

// Re-export the main types for convenience
pub use dictionary::Dictionary;
pub use segmenter::Segmenter;
pub use trie::Trie;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline() {
        let words = "សួស្តី\nខ្ញុំ\nស្រលាញ់\nកម្ពុជា\nបង";
        let freqs = r#"{"សួស្តី": 500, "ខ្ញុំ": 900, "ស្រលាញ់": 400, "កម្ពុជា": 800, "បង": 600}"#;
        let segmenter = Segmenter::new(Dictionary::from_content(words, Some(freqs)));

        assert_eq!(
            segmenter.segment("ខ្ញុំស្រលាញ់កម្ពុជា"),
            vec!["ខ្ញុំ", "ស្រលាញ់", "កម្ពុជា"]
        );
        assert_eq!(segmenter.segment("សួស្តី បង"), vec!["សួស្តី", " ", "បង"]);
    }

    #[test]
    fn test_segmenter_is_shareable_across_threads() {
        let dictionary = Dictionary::from_content("សួស្តី\n", None);
        let segmenter = Segmenter::new(dictionary);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..16 {
                        assert_eq!(segmenter.segment("សួស្តី"), vec!["សួស្តី"]);
                    }
                });
            }
        });
    }
}
