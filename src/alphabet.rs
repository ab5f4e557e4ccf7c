//! Turkish alphabet tables and letter-level phonology.
//!
//! This module centralizes every letter-level decision the analyzer makes:
//! vowel classification (front/back, rounded/unrounded), voiced/voiceless
//! consonants, the voicing and devoicing maps, and ASCII diacritic folding
//! used for tolerant matching.
//!
//! The tables are exposed through a process-wide [`ALPHABET`] singleton so
//! the hot analysis loop never rebuilds them.
//!
//! # Examples
//!
//! ```
//! use morfo::alphabet::ALPHABET;
//!
//! assert!(ALPHABET.is_vowel('ü'));
//! assert!(ALPHABET.is_front('ü'));
//! assert_eq!(ALPHABET.devoice('b'), 'p');
//! assert_eq!(ALPHABET.fold('ş'), 's');
//! ```

use lazy_static::lazy_static;

lazy_static! {
    /// Shared Turkish alphabet instance.
    pub static ref ALPHABET: TurkishAlphabet = TurkishAlphabet::new();
}

/// Letter classification and transformation tables for Turkish.
///
/// Circumflexed vowels (â, î, û) are accepted as input and classified with
/// their plain counterparts, except that î harmonizes as a front vowel.
#[derive(Debug, Clone, Default)]
pub struct TurkishAlphabet;

impl TurkishAlphabet {
    /// Create a new alphabet instance. Prefer [`ALPHABET`] outside tests.
    pub fn new() -> Self {
        TurkishAlphabet
    }

    /// Check if a character is a Turkish vowel.
    pub fn is_vowel(&self, c: char) -> bool {
        matches!(
            c,
            'a' | 'e' | 'ı' | 'i' | 'o' | 'ö' | 'u' | 'ü' | 'â' | 'î' | 'û'
        )
    }

    /// Check if a vowel is front (palatal harmony class).
    pub fn is_front(&self, c: char) -> bool {
        matches!(c, 'e' | 'i' | 'ö' | 'ü' | 'î')
    }

    /// Check if a vowel is rounded (labial harmony class).
    pub fn is_rounded(&self, c: char) -> bool {
        matches!(c, 'o' | 'ö' | 'u' | 'ü' | 'û')
    }

    /// Check if a consonant is voiceless (fıstıkçı şahap).
    pub fn is_voiceless(&self, c: char) -> bool {
        matches!(c, 'ç' | 'f' | 'h' | 'k' | 'p' | 's' | 'ş' | 't')
    }

    /// Check if a consonant is a voiceless stop. These are the consonants
    /// that voice between vowels (kitap → kitabı).
    pub fn is_voiceless_stop(&self, c: char) -> bool {
        matches!(c, 'ç' | 'k' | 'p' | 't')
    }

    /// Voice a stop consonant, as happens when a vowel-initial suffix
    /// attaches. `previous` is the letter before `c` in the stem; a `k`
    /// after `n` voices to `g` rather than `ğ` (renk → rengi).
    pub fn voice(&self, c: char, previous: Option<char>) -> char {
        match c {
            'p' => 'b',
            'ç' => 'c',
            't' => 'd',
            'g' => 'ğ',
            'k' if previous == Some('n') => 'g',
            'k' => 'ğ',
            _ => c,
        }
    }

    /// Devoice a consonant, as happens when it ends up before a voiceless
    /// letter (kebap-çı, not kebap-cı).
    pub fn devoice(&self, c: char) -> char {
        match c {
            'b' => 'p',
            'c' => 'ç',
            'd' => 't',
            'g' => 'k',
            'ğ' => 'k',
            _ => c,
        }
    }

    /// Fold a character to its ASCII base form (ş → s, ı → i, â → a).
    /// Characters outside the Turkish-specific set are returned unchanged.
    pub fn fold(&self, c: char) -> char {
        match c {
            'ç' => 'c',
            'ğ' => 'g',
            'ı' => 'i',
            'ö' => 'o',
            'ş' => 's',
            'ü' => 'u',
            'â' => 'a',
            'î' => 'i',
            'û' => 'u',
            _ => c,
        }
    }

    /// Fold a whole string to its ASCII base form.
    pub fn fold_str(&self, s: &str) -> String {
        s.chars().map(|c| self.fold(c)).collect()
    }

    /// Check if the sequence contains at least one vowel.
    pub fn contains_vowel(&self, s: &str) -> bool {
        s.chars().any(|c| self.is_vowel(c))
    }

    /// Get the last vowel of the sequence, if any.
    pub fn last_vowel(&self, s: &str) -> Option<char> {
        s.chars().rev().find(|&c| self.is_vowel(c))
    }

    /// Get the last character of the sequence, if any.
    pub fn last_char(&self, s: &str) -> Option<char> {
        s.chars().next_back()
    }

    /// Get the first character of the sequence, if any.
    pub fn first_char(&self, s: &str) -> Option<char> {
        s.chars().next()
    }

    /// Check whether `surface` is a prefix of `tail` and return the number
    /// of bytes of `tail` it covers. With `ascii_tolerant`, characters are
    /// compared in their folded forms, so the covered byte length can
    /// differ from `surface.len()`.
    pub fn prefix_byte_len(
        &self,
        tail: &str,
        surface: &str,
        ascii_tolerant: bool,
    ) -> Option<usize> {
        if !ascii_tolerant {
            return if tail.starts_with(surface) {
                Some(surface.len())
            } else {
                None
            };
        }
        let mut consumed = 0;
        let mut tail_chars = tail.char_indices();
        for sc in surface.chars() {
            match tail_chars.next() {
                Some((i, tc)) if self.fold(tc) == self.fold(sc) => {
                    consumed = i + tc.len_utf8();
                }
                _ => return None,
            }
        }
        Some(consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vowel_classification() {
        for v in ['a', 'e', 'ı', 'i', 'o', 'ö', 'u', 'ü'] {
            assert!(ALPHABET.is_vowel(v), "{v} should be a vowel");
        }
        assert!(!ALPHABET.is_vowel('k'));

        assert!(ALPHABET.is_front('e'));
        assert!(ALPHABET.is_front('ü'));
        assert!(!ALPHABET.is_front('a'));
        assert!(!ALPHABET.is_front('u'));

        assert!(ALPHABET.is_rounded('o'));
        assert!(ALPHABET.is_rounded('ü'));
        assert!(!ALPHABET.is_rounded('ı'));
    }

    #[test]
    fn test_circumflex_vowels() {
        assert!(ALPHABET.is_vowel('â'));
        assert!(ALPHABET.is_front('î'));
        assert!(!ALPHABET.is_front('â'));
        assert!(ALPHABET.is_rounded('û'));
    }

    #[test]
    fn test_voicing() {
        assert_eq!(ALPHABET.voice('p', Some('a')), 'b');
        assert_eq!(ALPHABET.voice('ç', Some('a')), 'c');
        assert_eq!(ALPHABET.voice('t', Some('a')), 'd');
        assert_eq!(ALPHABET.voice('k', Some('a')), 'ğ');
        // renk → rengi
        assert_eq!(ALPHABET.voice('k', Some('n')), 'g');
        assert_eq!(ALPHABET.voice('l', Some('a')), 'l');
    }

    #[test]
    fn test_devoicing() {
        assert_eq!(ALPHABET.devoice('b'), 'p');
        assert_eq!(ALPHABET.devoice('c'), 'ç');
        assert_eq!(ALPHABET.devoice('d'), 't');
        assert_eq!(ALPHABET.devoice('ğ'), 'k');
        assert_eq!(ALPHABET.devoice('m'), 'm');
    }

    #[test]
    fn test_voiceless_sets() {
        for c in ['ç', 'f', 'h', 'k', 'p', 's', 'ş', 't'] {
            assert!(ALPHABET.is_voiceless(c));
        }
        for c in ['ç', 'k', 'p', 't'] {
            assert!(ALPHABET.is_voiceless_stop(c));
        }
        assert!(!ALPHABET.is_voiceless_stop('s'));
        assert!(!ALPHABET.is_voiceless('b'));
    }

    #[test]
    fn test_folding() {
        assert_eq!(ALPHABET.fold_str("çağrışım"), "cagrisim");
        assert_eq!(ALPHABET.fold_str("kitap"), "kitap");
    }

    #[test]
    fn test_sequence_helpers() {
        assert!(ALPHABET.contains_vowel("lar"));
        assert!(!ALPHABET.contains_vowel("str"));
        assert_eq!(ALPHABET.last_vowel("kitap"), Some('a'));
        assert_eq!(ALPHABET.last_vowel("krt"), None);
        assert_eq!(ALPHABET.last_char("araba"), Some('a'));
        assert_eq!(ALPHABET.first_char("ev"), Some('e'));
    }

    #[test]
    fn test_prefix_byte_len_exact() {
        assert_eq!(ALPHABET.prefix_byte_len("kitaplar", "kitap", false), Some(5));
        assert_eq!(ALPHABET.prefix_byte_len("kitaplar", "kitab", false), None);
    }

    #[test]
    fn test_prefix_byte_len_tolerant() {
        // "kıtap" folds to "kitap"; the dotless ı is two bytes.
        let consumed = ALPHABET.prefix_byte_len("kıtaplar", "kitap", true);
        assert_eq!(consumed, Some("kıtap".len()));
        assert_eq!(ALPHABET.prefix_byte_len("kitaplar", "çitap", true), None);
    }
}
