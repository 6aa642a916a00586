//! Prefix tree over code points for dictionary lookups.
//!
//! The segmenter probes every candidate word length at every input position,
//! so lookups are the hottest operation in the whole pipeline. Children are
//! stored in a dense 128-slot array for the main Khmer block (U+1780–U+17FF),
//! indexed by `cp − 0x1780`, with a hash map fallback for the long tail
//! (ASCII digits, punctuation inside acronyms, anything else a dictionary may
//! contain). Each node exclusively owns its children; the tree is built once
//! at load time and never mutated afterwards, so sharing it across threads
//! needs no synchronization.

use fxhash::FxHashMap;

const KHMER_BLOCK_START: u32 = 0x1780;
const KHMER_BLOCK_LEN: usize = 128;

/// A single trie node. `cost` is only meaningful while `is_word` is set.
pub struct TrieNode {
    khmer_children: [Option<Box<TrieNode>>; KHMER_BLOCK_LEN],
    other_children: FxHashMap<char, Box<TrieNode>>,
    is_word: bool,
    cost: f32,
}

impl TrieNode {
    fn new() -> Self {
        TrieNode {
            khmer_children: std::array::from_fn(|_| None),
            other_children: FxHashMap::default(),
            is_word: false,
            cost: 0.0,
        }
    }

    #[inline]
    fn khmer_slot(c: char) -> Option<usize> {
        let cp = c as u32;
        if (KHMER_BLOCK_START..KHMER_BLOCK_START + KHMER_BLOCK_LEN as u32).contains(&cp) {
            Some((cp - KHMER_BLOCK_START) as usize)
        } else {
            None
        }
    }

    #[inline]
    fn get_child(&self, c: char) -> Option<&TrieNode> {
        match Self::khmer_slot(c) {
            Some(idx) => self.khmer_children[idx].as_deref(),
            None => self.other_children.get(&c).map(Box::as_ref),
        }
    }

    fn get_or_create_child(&mut self, c: char) -> &mut TrieNode {
        let child: &mut Box<TrieNode> = match Self::khmer_slot(c) {
            Some(idx) => self.khmer_children[idx].get_or_insert_with(|| Box::new(TrieNode::new())),
            None => self
                .other_children
                .entry(c)
                .or_insert_with(|| Box::new(TrieNode::new())),
        };
        child
    }
}

/// The dictionary's prefix index.
pub struct Trie {
    root: TrieNode,
    word_count: usize,
}

impl Trie {
    pub fn new() -> Self {
        Trie {
            root: TrieNode::new(),
            word_count: 0,
        }
    }

    /// Number of distinct words inserted.
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Insert a word given as code points, marking the terminal node with its
    /// cost. Re-inserting a word overwrites its cost.
    pub fn insert(&mut self, cps: &[char], cost: f32) {
        let mut node = &mut self.root;
        for &c in cps {
            node = node.get_or_create_child(c);
        }
        if !node.is_word {
            self.word_count += 1;
        }
        node.is_word = true;
        node.cost = cost;
    }

    /// Walk `cps[start..end]`; `Some(cost)` iff the walk completes on a word
    /// terminal. Allocation-free.
    #[inline]
    pub fn lookup(&self, cps: &[char], start: usize, end: usize) -> Option<f32> {
        let mut node = &self.root;
        for &c in &cps[start..end] {
            node = node.get_child(c)?;
        }
        if node.is_word {
            Some(node.cost)
        } else {
            None
        }
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}
