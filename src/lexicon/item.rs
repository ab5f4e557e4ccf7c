//! Dictionary item types.
//!
//! A [`DictionaryItem`] is read-only stem data: the lemma, its part of
//! speech, the pronunciation the stem index actually works from, and a set
//! of [`RootAttribute`] tags describing the stem's phonological behavior.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Primary part of speech categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimaryPos {
    /// Nouns
    Noun,
    /// Adjectives
    Adjective,
    /// Verbs
    Verb,
    /// Adverbs
    Adverb,
    /// Pronouns
    Pronoun,
    /// Numerals
    Numeral,
    /// Determiners
    Determiner,
    /// Postpositions
    Postposition,
    /// Conjunctions
    Conjunction,
    /// Interjections
    Interjection,
    /// Question particle (mı, mi)
    Question,
    /// Punctuation
    Punctuation,
    /// Unknown or unclassified
    Unknown,
}

impl PrimaryPos {
    /// Short form used in item ids and analysis output.
    pub fn short_form(&self) -> &'static str {
        match self {
            PrimaryPos::Noun => "Noun",
            PrimaryPos::Adjective => "Adj",
            PrimaryPos::Verb => "Verb",
            PrimaryPos::Adverb => "Adv",
            PrimaryPos::Pronoun => "Pron",
            PrimaryPos::Numeral => "Num",
            PrimaryPos::Determiner => "Det",
            PrimaryPos::Postposition => "Postp",
            PrimaryPos::Conjunction => "Conj",
            PrimaryPos::Interjection => "Interj",
            PrimaryPos::Question => "Ques",
            PrimaryPos::Punctuation => "Punc",
            PrimaryPos::Unknown => "Unk",
        }
    }
}

/// Secondary part of speech, mostly used to distinguish pronoun classes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecondaryPos {
    /// No secondary classification.
    #[default]
    None,
    /// Personal pronouns (ben, sen, o, ...)
    PersonalPronoun,
    /// Demonstrative pronouns (bu, şu, o)
    DemonstrativePronoun,
    /// Quantifier pronouns (hepsi, birbiri, ...)
    QuantifierPronoun,
    /// Proper nouns
    ProperNoun,
}

impl SecondaryPos {
    /// Short form appended to item ids when present.
    pub fn short_form(&self) -> Option<&'static str> {
        match self {
            SecondaryPos::None => None,
            SecondaryPos::PersonalPronoun => Some("Pers"),
            SecondaryPos::DemonstrativePronoun => Some("Demons"),
            SecondaryPos::QuantifierPronoun => Some("Quant"),
            SecondaryPos::ProperNoun => Some("Prop"),
        }
    }
}

/// Phonological and structural tags on a dictionary root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RootAttribute {
    /// Final stop voices before vowel-initial suffixes (kitap → kitabı).
    Voicing = 0,
    /// Final stop resists voicing even between vowels (hukuk → hukuku).
    NoVoicing,
    /// Final consonant doubles before vowel-initial suffixes (sır → sırrı).
    Doubling,
    /// Last stem vowel drops before vowel-initial suffixes (ağız → ağzı).
    LastVowelDrop,
    /// Trailing vowel drops before vowel-initial suffixes (anla → anlıyor).
    ProgressiveVowelDrop,
    /// Suffixes harmonize front despite a back last vowel (saat → saati).
    InverseHarmony,
    /// Compound noun carrying a fused third person possessive
    /// (zeytinyağı); declines from the bare compound root.
    CompoundP3sg,
    /// Irregular root resolved through the special-root table.
    Special,
    /// Ephemeral item added at runtime for unknown-word analysis.
    Runtime,
    /// Placeholder item; analyses report its reference item instead.
    Dummy,
}

impl RootAttribute {
    /// All attributes, in bit order.
    pub const ALL: [RootAttribute; 10] = [
        RootAttribute::Voicing,
        RootAttribute::NoVoicing,
        RootAttribute::Doubling,
        RootAttribute::LastVowelDrop,
        RootAttribute::ProgressiveVowelDrop,
        RootAttribute::InverseHarmony,
        RootAttribute::CompoundP3sg,
        RootAttribute::Special,
        RootAttribute::Runtime,
        RootAttribute::Dummy,
    ];
}

/// A small copyable set of [`RootAttribute`] values.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RootAttributes(u16);

impl RootAttributes {
    /// Create an empty set.
    pub fn new() -> Self {
        RootAttributes(0)
    }

    /// Create a set from a list of attributes.
    pub fn from_attrs(attrs: &[RootAttribute]) -> Self {
        let mut set = RootAttributes::new();
        for &a in attrs {
            set.add(a);
        }
        set
    }

    /// Add an attribute.
    pub fn add(&mut self, attr: RootAttribute) {
        self.0 |= 1 << attr as u16;
    }

    /// Check membership.
    pub fn contains(&self, attr: RootAttribute) -> bool {
        self.0 & (1 << attr as u16) != 0
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate over members in bit order.
    pub fn iter(&self) -> impl Iterator<Item = RootAttribute> + '_ {
        RootAttribute::ALL.iter().copied().filter(|&a| self.contains(a))
    }
}

impl fmt::Debug for RootAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// A single dictionary entry.
///
/// Identity is lemma + part of speech; `root` and `pronunciation` default to
/// the lemma but may differ (verb lemmas carry the -mek/-mak infinitive, the
/// root does not).
///
/// # Examples
///
/// ```
/// use morfo::lexicon::{DictionaryItem, PrimaryPos, RootAttribute};
///
/// let item = DictionaryItem::new("kitap", PrimaryPos::Noun)
///     .with_attribute(RootAttribute::Voicing);
///
/// assert_eq!(item.id(), "kitap_Noun");
/// assert!(item.has_attribute(RootAttribute::Voicing));
/// ```
#[derive(Clone, Debug)]
pub struct DictionaryItem {
    /// Dictionary headword.
    pub lemma: String,
    /// Stem the analyzer attaches suffixes to.
    pub root: String,
    /// Pronunciation of the root; stem surfaces are generated from this.
    pub pronunciation: String,
    /// Primary part of speech.
    pub pos: PrimaryPos,
    /// Secondary part of speech.
    pub secondary_pos: SecondaryPos,
    /// Root attribute tags.
    pub attributes: RootAttributes,
    /// Reference item for Dummy placeholders and derived forms.
    pub reference: Option<Arc<DictionaryItem>>,
    /// Bare root of a CompoundP3sg item (zeytinyağı → zeytinyağ).
    pub compound_root: Option<String>,
}

impl DictionaryItem {
    /// Create an item whose root and pronunciation equal the lemma.
    pub fn new<S: Into<String>>(lemma: S, pos: PrimaryPos) -> Self {
        let lemma = lemma.into();
        DictionaryItem {
            root: lemma.clone(),
            pronunciation: lemma.clone(),
            lemma,
            pos,
            secondary_pos: SecondaryPos::None,
            attributes: RootAttributes::new(),
            reference: None,
            compound_root: None,
        }
    }

    /// Set the root, also used as pronunciation unless overridden later.
    pub fn with_root<S: Into<String>>(mut self, root: S) -> Self {
        let root = root.into();
        self.pronunciation = root.clone();
        self.root = root;
        self
    }

    /// Set the pronunciation.
    pub fn with_pronunciation<S: Into<String>>(mut self, pronunciation: S) -> Self {
        self.pronunciation = pronunciation.into();
        self
    }

    /// Set the secondary part of speech.
    pub fn with_secondary_pos(mut self, secondary_pos: SecondaryPos) -> Self {
        self.secondary_pos = secondary_pos;
        self
    }

    /// Add a root attribute.
    pub fn with_attribute(mut self, attr: RootAttribute) -> Self {
        self.attributes.add(attr);
        self
    }

    /// Add several root attributes.
    pub fn with_attributes(mut self, attrs: &[RootAttribute]) -> Self {
        for &a in attrs {
            self.attributes.add(a);
        }
        self
    }

    /// Set the reference item.
    pub fn with_reference(mut self, reference: Arc<DictionaryItem>) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Set the bare compound root of a CompoundP3sg item.
    pub fn with_compound_root<S: Into<String>>(mut self, root: S) -> Self {
        self.compound_root = Some(root.into());
        self
    }

    /// The identity string, `lemma_Pos` or `lemma_Pos_SecondaryPos`.
    pub fn id(&self) -> String {
        match self.secondary_pos.short_form() {
            Some(sec) => format!("{}_{}_{}", self.lemma, self.pos.short_form(), sec),
            None => format!("{}_{}", self.lemma, self.pos.short_form()),
        }
    }

    /// Check a root attribute.
    pub fn has_attribute(&self, attr: RootAttribute) -> bool {
        self.attributes.contains(attr)
    }

    /// Check if this is an ephemeral runtime item.
    pub fn is_runtime(&self) -> bool {
        self.has_attribute(RootAttribute::Runtime)
    }
}

impl PartialEq for DictionaryItem {
    fn eq(&self, other: &Self) -> bool {
        self.lemma == other.lemma
            && self.pos == other.pos
            && self.secondary_pos == other.secondary_pos
    }
}

impl Eq for DictionaryItem {}

impl Hash for DictionaryItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lemma.hash(state);
        self.pos.hash(state);
        self.secondary_pos.hash(state);
    }
}

impl fmt::Display for DictionaryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_ids() {
        let item = DictionaryItem::new("kitap", PrimaryPos::Noun);
        assert_eq!(item.id(), "kitap_Noun");

        let item = DictionaryItem::new("ben", PrimaryPos::Pronoun)
            .with_secondary_pos(SecondaryPos::PersonalPronoun);
        assert_eq!(item.id(), "ben_Pron_Pers");
    }

    #[test]
    fn test_root_defaults_to_lemma() {
        let item = DictionaryItem::new("demek", PrimaryPos::Verb).with_root("de");
        assert_eq!(item.lemma, "demek");
        assert_eq!(item.root, "de");
        assert_eq!(item.pronunciation, "de");
    }

    #[test]
    fn test_attributes() {
        let item = DictionaryItem::new("sır", PrimaryPos::Noun)
            .with_attributes(&[RootAttribute::Doubling, RootAttribute::Voicing]);
        assert!(item.has_attribute(RootAttribute::Doubling));
        assert!(item.has_attribute(RootAttribute::Voicing));
        assert!(!item.has_attribute(RootAttribute::Dummy));
    }

    #[test]
    fn test_identity_ignores_attributes() {
        let a = DictionaryItem::new("kitap", PrimaryPos::Noun);
        let b = DictionaryItem::new("kitap", PrimaryPos::Noun)
            .with_attribute(RootAttribute::Voicing);
        assert_eq!(a, b);
    }

    #[test]
    fn test_root_attributes_set() {
        let set = RootAttributes::from_attrs(&[RootAttribute::Runtime, RootAttribute::Dummy]);
        let members: Vec<_> = set.iter().collect();
        assert_eq!(members, vec![RootAttribute::Runtime, RootAttribute::Dummy]);
    }
}
