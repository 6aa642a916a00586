//! Character classification for Khmer Unicode characters.
//!
//! Khmer script lives in U+1780–U+17FF (plus the U+19E0–U+19FF symbol block).
//! Segmentation needs to know, per scalar, whether it is a base consonant, an
//! independent or dependent vowel, a diacritic sign, the coeng subscript
//! marker, a digit, a currency symbol, or a separator. All predicates here are
//! total over `char`.

use once_cell::sync::Lazy;

const CONSONANT: u16 = 1 << 0;
const INDEP_VOWEL: u16 = 1 << 1;
const DEP_VOWEL: u16 = 1 << 2;
const SIGN: u16 = 1 << 3;
const COENG: u16 = 1 << 4;
const DIGIT: u16 = 1 << 5;
const CURRENCY: u16 = 1 << 6;
const SEPARATOR: u16 = 1 << 7;
const VALID_SINGLE: u16 = 1 << 8;

/// Everything below U+1800 is answered by this table; the handful of
/// classified scalars above it (curly quotes, Khmer symbol block) are handled
/// by explicit range checks in the predicates.
const TABLE_LEN: usize = 0x1800;

/// Single-character words that are real Khmer words on their own.
///
/// Fifteen consonants and eight independent vowels; every other
/// single-character entry is noise and gets filtered at dictionary load.
const VALID_SINGLE_CHARS: &[char] = &[
    // consonants
    '\u{1780}', // ក
    '\u{1781}', // ខ
    '\u{1782}', // គ
    '\u{1784}', // ង
    '\u{1785}', // ច
    '\u{1786}', // ឆ
    '\u{1789}', // ញ
    '\u{178A}', // ដ
    '\u{178F}', // ត
    '\u{1791}', // ទ
    '\u{1796}', // ព
    '\u{179A}', // រ
    '\u{179B}', // ល
    '\u{179F}', // ស
    '\u{17A1}', // ឡ
    // independent vowels
    '\u{17A3}', '\u{17A4}', '\u{17A6}', '\u{17A7}', '\u{17A9}', '\u{17AA}',
    '\u{17AC}', // ឬ
    '\u{17AD}', // ឮ
];

/// ASCII punctuation treated as separators, alongside the Khmer punctuation
/// range and quote-like marks.
const ASCII_SEPARATORS: &[char] = &[
    '!', '?', '.', ',', ';', ':', '"', '\'', '(', ')', '[', ']', '{', '}',
    '-', '/', '$', '%',
];

static CHAR_TABLE: Lazy<Box<[u16; TABLE_LEN]>> = Lazy::new(|| {
    let mut table = Box::new([0u16; TABLE_LEN]);

    for cp in 0x1780..=0x17A2 {
        table[cp] |= CONSONANT;
    }
    for cp in 0x17A3..=0x17B3 {
        table[cp] |= INDEP_VOWEL;
    }
    for cp in 0x17B6..=0x17C5 {
        table[cp] |= DEP_VOWEL;
    }
    for cp in 0x17C6..=0x17D1 {
        table[cp] |= SIGN;
    }
    table[0x17D3] |= SIGN;
    table[0x17DD] |= SIGN;
    table[0x17D2] |= COENG;

    for cp in 0x30..=0x39 {
        table[cp] |= DIGIT;
    }
    for cp in 0x17E0..=0x17E9 {
        table[cp] |= DIGIT;
    }

    table[0x24] |= CURRENCY; // $
    table[0x17DB] |= CURRENCY; // riel

    // Khmer punctuation; note the riel sign is also a separator.
    for cp in 0x17D4..=0x17DB {
        table[cp] |= SEPARATOR;
    }
    for &c in ASCII_SEPARATORS {
        table[c as usize] |= SEPARATOR;
    }
    for c in [' ', '\t', '\r', '\n', '\u{00AB}', '\u{00BB}', '\u{02DD}'] {
        table[c as usize] |= SEPARATOR;
    }

    for &c in VALID_SINGLE_CHARS {
        table[c as usize] |= VALID_SINGLE;
    }

    table
});

#[inline]
fn flags(c: char) -> u16 {
    let cp = c as usize;
    if cp < TABLE_LEN {
        CHAR_TABLE[cp]
    } else {
        0
    }
}

/// Base consonant, U+1780–U+17A2.
#[inline]
pub fn is_consonant(c: char) -> bool {
    flags(c) & CONSONANT != 0
}

/// Independent vowel, U+17A3–U+17B3.
#[inline]
pub fn is_independent_vowel(c: char) -> bool {
    flags(c) & INDEP_VOWEL != 0
}

/// Dependent vowel, U+17B6–U+17C5. Attaches to a preceding consonant and can
/// never start a segment.
#[inline]
pub fn is_dependent_vowel(c: char) -> bool {
    flags(c) & DEP_VOWEL != 0
}

/// Diacritic sign, U+17C6–U+17D1, U+17D3 or U+17DD.
#[inline]
pub fn is_sign(c: char) -> bool {
    flags(c) & SIGN != 0
}

/// The coeng subscript marker U+17D2.
#[inline]
pub fn is_coeng(c: char) -> bool {
    flags(c) & COENG != 0
}

/// ASCII or Khmer digit.
#[inline]
pub fn is_digit(c: char) -> bool {
    flags(c) & DIGIT != 0
}

/// `$` or the riel sign U+17DB.
#[inline]
pub fn is_currency_symbol(c: char) -> bool {
    flags(c) & CURRENCY != 0
}

/// Any scalar in the Khmer block or the Khmer symbols block.
#[inline]
pub fn is_khmer_char(c: char) -> bool {
    let cp = c as u32;
    (0x1780..=0x17FF).contains(&cp) || (0x19E0..=0x19FF).contains(&cp)
}

/// Khmer punctuation (U+17D4–U+17DB), common ASCII punctuation, guillemets
/// and curly quotes, and whitespace.
#[inline]
pub fn is_separator(c: char) -> bool {
    let cp = c as usize;
    if cp < TABLE_LEN {
        CHAR_TABLE[cp] & SEPARATOR != 0
    } else {
        matches!(c, '\u{201C}' | '\u{201D}')
    }
}

/// Whether the character may stand alone as a dictionary word.
#[inline]
pub fn is_valid_single_word(c: char) -> bool {
    flags(c) & VALID_SINGLE != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consonants() {
        assert!(is_consonant('ក')); // U+1780
        assert!(is_consonant('អ')); // U+17A2
        assert!(!is_consonant('ឣ')); // U+17A3 is an independent vowel
    }

    #[test]
    fn test_vowels() {
        assert!(is_independent_vowel('ឥ'));
        assert!(is_dependent_vowel('ា')); // U+17B6
        assert!(is_dependent_vowel('ៅ')); // U+17C5
        assert!(!is_dependent_vowel('ំ')); // U+17C6 is a sign
    }

    #[test]
    fn test_signs_and_coeng() {
        assert!(is_sign('ំ')); // U+17C6
        assert!(is_sign('៑')); // U+17D1
        assert!(is_sign('\u{17D3}'));
        assert!(is_sign('\u{17DD}'));
        assert!(!is_sign('\u{17D2}'));
        assert!(is_coeng('\u{17D2}'));
    }

    #[test]
    fn test_digits() {
        assert!(is_digit('0'));
        assert!(is_digit('9'));
        assert!(is_digit('០')); // U+17E0
        assert!(is_digit('៩')); // U+17E9
        assert!(!is_digit('a'));
    }

    #[test]
    fn test_currency_overlaps_separator() {
        // The riel sign is both a currency symbol and a separator.
        assert!(is_currency_symbol('៛'));
        assert!(is_separator('៛'));
        assert!(is_currency_symbol('$'));
        assert!(is_separator('$'));
        assert!(!is_currency_symbol('€'));
    }

    #[test]
    fn test_separators() {
        assert!(is_separator('។')); // U+17D4
        assert!(is_separator(' '));
        assert!(is_separator('\t'));
        assert!(is_separator('\n'));
        assert!(is_separator('«'));
        assert!(is_separator('\u{201C}'));
        assert!(is_separator('\u{201D}'));
        assert!(is_separator('%'));
        assert!(is_separator('ៗ')); // repetition mark sits in the punctuation range
        assert!(!is_separator('ក'));
        assert!(!is_separator('\u{17DD}'));
    }

    #[test]
    fn test_khmer_ranges() {
        assert!(is_khmer_char('ក'));
        assert!(is_khmer_char('ៗ'));
        assert!(is_khmer_char('\u{19E0}'));
        assert!(is_khmer_char('\u{19FF}'));
        assert!(!is_khmer_char('a'));
        assert!(!is_khmer_char('\u{1800}'));
    }

    #[test]
    fn test_valid_single_words() {
        assert!(is_valid_single_word('ក'));
        assert!(is_valid_single_word('ស'));
        assert!(is_valid_single_word('ឬ'));
        assert!(!is_valid_single_word('ឈ')); // consonant not on the allow-list
        assert!(!is_valid_single_word('ា')); // dependent vowel
    }
}
