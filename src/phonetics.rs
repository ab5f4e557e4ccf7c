//! Phonetic attributes and the attribute calculator.
//!
//! Suffix allomorph selection in Turkish depends on a handful of properties
//! of the text produced so far: whether it ends in a vowel or a consonant,
//! the harmony class of its last vowel, and whether its final consonant is
//! voiceless. This module derives those properties as a compact
//! [`AttributeSet`] via [`morphemic_attributes`], the pure function at the
//! bottom of the whole analyzer.
//!
//! # Examples
//!
//! ```
//! use morfo::phonetics::{morphemic_attributes, AttributeSet, PhoneticAttribute};
//!
//! let attrs = morphemic_attributes("kitap", AttributeSet::new());
//! assert!(attrs.contains(PhoneticAttribute::LastLetterConsonant));
//! assert!(attrs.contains(PhoneticAttribute::LastVowelBack));
//! assert!(attrs.contains(PhoneticAttribute::LastLetterVoiceless));
//! ```

use std::fmt;

use crate::alphabet::ALPHABET;

/// A phonological tag derived from a letter sequence.
///
/// The first group describes the sequence itself; the `Expects*` and
/// `CannotTerminate` tags are attachment constraints carried by stems and
/// realized suffixes, consumed by graph conditions and the accept check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PhoneticAttribute {
    /// The sequence ends with a vowel.
    LastLetterVowel = 0,
    /// The sequence ends with a consonant.
    LastLetterConsonant,
    /// The last vowel is front (e, i, ö, ü).
    LastVowelFrontal,
    /// The last vowel is back (a, ı, o, u).
    LastVowelBack,
    /// The last vowel is rounded (o, ö, u, ü).
    LastVowelRounded,
    /// The last vowel is unrounded (a, e, ı, i).
    LastVowelUnrounded,
    /// The sequence ends with a voiceless consonant.
    LastLetterVoiceless,
    /// The sequence ends with a voiceless stop (ç, k, p, t).
    LastLetterVoicelessStop,
    /// The sequence starts with a vowel.
    FirstLetterVowel,
    /// The sequence starts with a consonant.
    FirstLetterConsonant,
    /// The sequence contains no vowel at all.
    HasNoVowel,
    /// The next morpheme must start with a vowel.
    ExpectsVowel,
    /// The next morpheme must start with a consonant.
    ExpectsConsonant,
    /// The analysis may not end here.
    CannotTerminate,
}

impl PhoneticAttribute {
    /// All attributes, in bit order.
    pub const ALL: [PhoneticAttribute; 14] = [
        PhoneticAttribute::LastLetterVowel,
        PhoneticAttribute::LastLetterConsonant,
        PhoneticAttribute::LastVowelFrontal,
        PhoneticAttribute::LastVowelBack,
        PhoneticAttribute::LastVowelRounded,
        PhoneticAttribute::LastVowelUnrounded,
        PhoneticAttribute::LastLetterVoiceless,
        PhoneticAttribute::LastLetterVoicelessStop,
        PhoneticAttribute::FirstLetterVowel,
        PhoneticAttribute::FirstLetterConsonant,
        PhoneticAttribute::HasNoVowel,
        PhoneticAttribute::ExpectsVowel,
        PhoneticAttribute::ExpectsConsonant,
        PhoneticAttribute::CannotTerminate,
    ];
}

/// A small copyable set of [`PhoneticAttribute`] values.
///
/// Backed by a single `u32`, so snapshots are free to copy and cheap to use
/// as cache keys.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AttributeSet(u32);

impl AttributeSet {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        AttributeSet(0)
    }

    /// Create a set from a list of attributes.
    pub fn from_attrs(attrs: &[PhoneticAttribute]) -> Self {
        let mut set = AttributeSet::new();
        for &a in attrs {
            set.add(a);
        }
        set
    }

    /// Add an attribute to the set.
    pub fn add(&mut self, attr: PhoneticAttribute) {
        self.0 |= 1 << attr as u32;
    }

    /// Remove an attribute from the set.
    pub fn remove(&mut self, attr: PhoneticAttribute) {
        self.0 &= !(1 << attr as u32);
    }

    /// Check if the set contains an attribute.
    pub fn contains(&self, attr: PhoneticAttribute) -> bool {
        self.0 & (1 << attr as u32) != 0
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Return a copy with the attribute added.
    pub fn with(mut self, attr: PhoneticAttribute) -> Self {
        self.add(attr);
        self
    }

    /// Return a copy with the attribute removed.
    pub fn without(mut self, attr: PhoneticAttribute) -> Self {
        self.remove(attr);
        self
    }

    /// Iterate over the attributes in the set.
    pub fn iter(&self) -> impl Iterator<Item = PhoneticAttribute> + '_ {
        PhoneticAttribute::ALL
            .iter()
            .copied()
            .filter(|&a| self.contains(a))
    }
}

impl fmt::Debug for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Compute the phonetic attributes of `seq` as attached after a predecessor
/// with attributes `predecessor`.
///
/// An empty sequence inherits the predecessor set unchanged. A sequence
/// containing a vowel is self-describing: every tag is derived from the
/// sequence alone. A vowel-less sequence inherits the predecessor's vowel
/// tags, is forced to consonant finality, and drops any pending
/// `ExpectsConsonant` expectation. Voicing tags are always recomputed from
/// the trailing letter, never inherited.
pub fn morphemic_attributes(seq: &str, predecessor: AttributeSet) -> AttributeSet {
    use PhoneticAttribute::*;

    if seq.is_empty() {
        return predecessor;
    }

    let mut attrs = AttributeSet::new();
    // last() and first() exist: seq is non-empty.
    let last = ALPHABET.last_char(seq).unwrap_or('x');
    let first = ALPHABET.first_char(seq).unwrap_or('x');

    if ALPHABET.contains_vowel(seq) {
        if ALPHABET.is_vowel(last) {
            attrs.add(LastLetterVowel);
        } else {
            attrs.add(LastLetterConsonant);
        }
        let last_vowel = ALPHABET.last_vowel(seq).unwrap_or('a');
        if ALPHABET.is_front(last_vowel) {
            attrs.add(LastVowelFrontal);
        } else {
            attrs.add(LastVowelBack);
        }
        if ALPHABET.is_rounded(last_vowel) {
            attrs.add(LastVowelRounded);
        } else {
            attrs.add(LastVowelUnrounded);
        }
        if ALPHABET.is_vowel(first) {
            attrs.add(FirstLetterVowel);
        } else {
            attrs.add(FirstLetterConsonant);
        }
    } else {
        attrs = predecessor;
        attrs.add(HasNoVowel);
        attrs.remove(LastLetterVowel);
        attrs.add(LastLetterConsonant);
        attrs.add(FirstLetterConsonant);
        attrs.remove(FirstLetterVowel);
        attrs.remove(ExpectsConsonant);
    }

    if ALPHABET.is_voiceless(last) {
        attrs.add(LastLetterVoiceless);
        if ALPHABET.is_voiceless_stop(last) {
            attrs.add(LastLetterVoicelessStop);
        }
    } else {
        attrs.remove(LastLetterVoiceless);
        attrs.remove(LastLetterVoicelessStop);
    }

    attrs
}

#[cfg(test)]
mod tests {
    use super::PhoneticAttribute::*;
    use super::*;

    #[test]
    fn test_attribute_set_basics() {
        let mut set = AttributeSet::new();
        assert!(set.is_empty());

        set.add(LastLetterVowel);
        set.add(LastVowelBack);
        assert!(set.contains(LastLetterVowel));
        assert!(!set.contains(LastVowelFrontal));

        set.remove(LastLetterVowel);
        assert!(!set.contains(LastLetterVowel));

        let attrs: Vec<_> = set.iter().collect();
        assert_eq!(attrs, vec![LastVowelBack]);
    }

    #[test]
    fn test_epsilon_inherits_predecessor() {
        let pred = AttributeSet::from_attrs(&[LastLetterVowel, LastVowelFrontal, CannotTerminate]);
        assert_eq!(morphemic_attributes("", pred), pred);
    }

    #[test]
    fn test_vowel_sequence_is_self_describing() {
        // Predecessor tags must not leak into a vowel-bearing sequence.
        let pred = AttributeSet::from_attrs(&[LastVowelFrontal, LastVowelRounded]);
        let attrs = morphemic_attributes("lar", pred);

        assert!(attrs.contains(LastLetterConsonant));
        assert!(attrs.contains(LastVowelBack));
        assert!(attrs.contains(LastVowelUnrounded));
        assert!(attrs.contains(FirstLetterConsonant));
        assert!(!attrs.contains(LastVowelFrontal));
        assert!(!attrs.contains(LastVowelRounded));
    }

    #[test]
    fn test_vowel_final_sequence() {
        let attrs = morphemic_attributes("araba", AttributeSet::new());
        assert!(attrs.contains(LastLetterVowel));
        assert!(attrs.contains(LastVowelBack));
        assert!(attrs.contains(LastVowelUnrounded));
        assert!(attrs.contains(FirstLetterVowel));
    }

    #[test]
    fn test_consonant_only_sequence_inherits_vowel_tags() {
        let pred = AttributeSet::from_attrs(&[
            LastLetterVowel,
            LastVowelFrontal,
            LastVowelRounded,
            ExpectsConsonant,
        ]);
        let attrs = morphemic_attributes("t", pred);

        // Vowel harmony tags survive, finality flips to consonant.
        assert!(attrs.contains(LastVowelFrontal));
        assert!(attrs.contains(LastVowelRounded));
        assert!(attrs.contains(LastLetterConsonant));
        assert!(!attrs.contains(LastLetterVowel));
        assert!(attrs.contains(HasNoVowel));
        // A satisfied consonant expectation is dropped.
        assert!(!attrs.contains(ExpectsConsonant));
    }

    #[test]
    fn test_voicing_recomputed_not_inherited() {
        let pred = AttributeSet::from_attrs(&[LastLetterVoiceless, LastLetterVoicelessStop]);
        let attrs = morphemic_attributes("lar", pred);
        assert!(!attrs.contains(LastLetterVoiceless));
        assert!(!attrs.contains(LastLetterVoicelessStop));

        let attrs = morphemic_attributes("kitap", AttributeSet::new());
        assert!(attrs.contains(LastLetterVoiceless));
        assert!(attrs.contains(LastLetterVoicelessStop));

        // Voiceless but not a stop.
        let attrs = morphemic_attributes("ses", AttributeSet::new());
        assert!(attrs.contains(LastLetterVoiceless));
        assert!(!attrs.contains(LastLetterVoicelessStop));
    }

    #[test]
    fn test_front_rounded_vowel() {
        let attrs = morphemic_attributes("üzüm", AttributeSet::new());
        assert!(attrs.contains(LastVowelFrontal));
        assert!(attrs.contains(LastVowelRounded));
        assert!(attrs.contains(LastLetterConsonant));
    }
}
