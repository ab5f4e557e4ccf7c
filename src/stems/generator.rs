//! Expansion of dictionary items into stem transitions.

use std::sync::Arc;

use ahash::AHashMap;
use lazy_static::lazy_static;

use crate::alphabet::ALPHABET;
use crate::error::{MorfoError, Result};
use crate::lexicon::{DictionaryItem, PrimaryPos, RootAttribute};
use crate::morphotactics::Morphotactics;
use crate::phonetics::{morphemic_attributes, AttributeSet, PhoneticAttribute};
use crate::stems::StemTransition;

/// State key for the modified stems of verbs with in-stem vowel drop
/// (kavur → kavr).
pub const VERB_LAST_VOWEL_DROP_STATE: &str = "verb_last_vowel_drop_S";
/// State key for the full form of fused-possessive compounds (zeytinyağı).
pub const NOUN_COMPOUND_P3SG_STATE: &str = "noun_compound_p3sg_S";
/// State key for the bare root of fused-possessive compounds (zeytinyağ).
pub const NOUN_COMPOUND_STATE: &str = "noun_compound_S";

/// A fixed stem of an irregular root.
struct SpecialStem {
    surface: &'static str,
    state_key: &'static str,
    cannot_terminate: bool,
    expects_vowel: bool,
    expects_consonant: bool,
}

const fn bare(surface: &'static str, state_key: &'static str) -> SpecialStem {
    SpecialStem {
        surface,
        state_key,
        cannot_terminate: false,
        expects_vowel: false,
        expects_consonant: false,
    }
}

/// A bare stem restricted to consonant-initial suffixation; its partner
/// stem covers the vowel-initial side (su/suy).
const fn pre_consonant(surface: &'static str, state_key: &'static str) -> SpecialStem {
    SpecialStem {
        surface,
        state_key,
        cannot_terminate: false,
        expects_vowel: false,
        expects_consonant: true,
    }
}

const fn oblique(surface: &'static str, state_key: &'static str, expects_vowel: bool) -> SpecialStem {
    SpecialStem {
        surface,
        state_key,
        cannot_terminate: true,
        expects_vowel,
        expects_consonant: false,
    }
}

/// Irregular roots, keyed by item id. Each entry maps to fixed stems and
/// the dedicated states their suffixation is wired from.
static SPECIAL_ROOT_TABLE: &[(&str, &[SpecialStem])] = &[
    // Personal pronouns with oblique stems (ben → bana).
    (
        "ben_Pron_Pers",
        &[
            bare("ben", "pron_pers_S"),
            oblique("ban", "pron_pers_mod_S", true),
        ],
    ),
    (
        "sen_Pron_Pers",
        &[
            bare("sen", "pron_pers_S"),
            oblique("san", "pron_pers_mod_S", true),
        ],
    ),
    (
        "o_Pron_Pers",
        &[
            bare("o", "pron_pers_S"),
            oblique("on", "pron_pers_mod_S", false),
        ],
    ),
    // Demonstratives decline from an n-extended stem (bu → bunda).
    (
        "bu_Pron_Demons",
        &[
            bare("bu", "pron_demons_S"),
            oblique("bun", "pron_demons_mod_S", false),
        ],
    ),
    (
        "şu_Pron_Demons",
        &[
            bare("şu", "pron_demons_S"),
            oblique("şun", "pron_demons_mod_S", false),
        ],
    ),
    (
        "o_Pron_Demons",
        &[
            bare("o", "pron_demons_S"),
            oblique("on", "pron_demons_mod_S", false),
        ],
    ),
    // Quantifier pronouns.
    (
        "birbiri_Pron_Quant",
        &[
            bare("birbiri", "pron_quant_S"),
            oblique("birbir", "pron_quant_mod_S", false),
        ],
    ),
    (
        "hepsi_Pron_Quant",
        &[
            bare("hepsi", "pron_quant_S"),
            oblique("hep", "pron_quant_mod_S", false),
        ],
    ),
    (
        "kimi_Pron_Quant",
        &[
            bare("kimi", "pron_quant_S"),
            oblique("kim", "pron_quant_mod_S", false),
        ],
    ),
    (
        "çoğu_Pron_Quant",
        &[
            bare("çoğu", "pron_quant_S"),
            oblique("çok", "pron_quant_mod_S", false),
        ],
    ),
    // The two vowel-raising verbs (de-mek → diyor) and the copula root.
    (
        "demek_Verb",
        &[
            bare("de", "verb_de_ye_S"),
            oblique("di", "verb_de_ye_mod_S", false),
        ],
    ),
    (
        "yemek_Verb",
        &[
            bare("ye", "verb_de_ye_S"),
            oblique("yi", "verb_de_ye_mod_S", false),
        ],
    ),
    ("imek_Verb", &[bare("i", "verb_imek_S")]),
    // su takes a y-extended stem before vowels (suyu).
    (
        "su_Noun",
        &[
            pre_consonant("su", "noun_su_S"),
            oblique("suy", "noun_su_mod_S", true),
        ],
    ),
];

lazy_static! {
    static ref SPECIAL_ROOTS: AHashMap<&'static str, &'static [SpecialStem]> =
        SPECIAL_ROOT_TABLE.iter().copied().collect();
}

/// Expands dictionary items into [`StemTransition`] values against a wired
/// morphotactics graph.
pub struct StemTransitionGenerator {
    graph: Arc<Morphotactics>,
}

impl StemTransitionGenerator {
    /// Create a generator over a graph.
    pub fn new(graph: Arc<Morphotactics>) -> Self {
        StemTransitionGenerator { graph }
    }

    /// Generate the stem transitions of an item.
    ///
    /// Fails only on configuration errors: an empty pronunciation, a
    /// `Special` item missing from the irregular-root table, or a referenced
    /// graph state that was never wired.
    pub fn generate(&self, item: &Arc<DictionaryItem>) -> Result<Vec<StemTransition>> {
        if item.pronunciation.is_empty() {
            return Err(MorfoError::lexicon(format!(
                "item '{}' has an empty pronunciation",
                item.id()
            )));
        }
        if item.has_attribute(RootAttribute::Special) {
            return self.generate_special(item);
        }
        if item.has_attribute(RootAttribute::CompoundP3sg) {
            return self.generate_compound(item);
        }
        let modifying = [
            RootAttribute::Voicing,
            RootAttribute::Doubling,
            RootAttribute::LastVowelDrop,
            RootAttribute::ProgressiveVowelDrop,
        ];
        if modifying.iter().any(|&a| item.has_attribute(a)) {
            self.generate_modified(item)
        } else {
            Ok(vec![self.plain(item)?])
        }
    }

    fn plain(&self, item: &Arc<DictionaryItem>) -> Result<StemTransition> {
        Ok(StemTransition {
            surface: item.pronunciation.clone(),
            item: Arc::clone(item),
            attributes: self.root_attributes(item, &item.pronunciation),
            state: self.graph.root_state_for(item)?,
        })
    }

    /// Phonetic attributes of a stem surface, with the inverse-harmony flip
    /// applied when the item calls for it (saat → saati).
    fn root_attributes(&self, item: &DictionaryItem, surface: &str) -> AttributeSet {
        let mut attrs = morphemic_attributes(surface, AttributeSet::new());
        if item.has_attribute(RootAttribute::InverseHarmony) {
            attrs.add(PhoneticAttribute::LastVowelFrontal);
            attrs.remove(PhoneticAttribute::LastVowelBack);
        }
        attrs
    }

    fn generate_modified(&self, item: &Arc<DictionaryItem>) -> Result<Vec<StemTransition>> {
        let pronunciation = &item.pronunciation;
        let root_state = self.graph.root_state_for(item)?;
        let mut modified_state = root_state;
        let mut chars: Vec<char> = pronunciation.chars().collect();

        for attr in item.attributes.iter() {
            match attr {
                RootAttribute::Voicing => {
                    let last = chars[chars.len() - 1];
                    let previous = chars.len().checked_sub(2).map(|i| chars[i]);
                    let index = chars.len() - 1;
                    chars[index] = ALPHABET.voice(last, previous);
                }
                RootAttribute::Doubling => {
                    chars.push(chars[chars.len() - 1]);
                }
                RootAttribute::LastVowelDrop => {
                    if let Some(index) = chars.iter().rposition(|&c| ALPHABET.is_vowel(c)) {
                        chars.remove(index);
                    }
                    if item.pos == PrimaryPos::Verb {
                        modified_state = self.graph.state_by_key(VERB_LAST_VOWEL_DROP_STATE)?.id;
                    }
                }
                RootAttribute::ProgressiveVowelDrop => {
                    if chars.last().copied().is_some_and(|c| ALPHABET.is_vowel(c)) {
                        chars.pop();
                    }
                }
                _ => {}
            }
        }

        let modified: String = chars.into_iter().collect();
        if modified == *pronunciation || modified.is_empty() {
            return Ok(vec![self.plain(item)?]);
        }

        let original_attrs = self
            .root_attributes(item, pronunciation)
            .with(PhoneticAttribute::ExpectsConsonant);
        let modified_attrs = self
            .root_attributes(item, &modified)
            .with(PhoneticAttribute::ExpectsVowel)
            .with(PhoneticAttribute::CannotTerminate);

        Ok(vec![
            StemTransition {
                surface: pronunciation.clone(),
                item: Arc::clone(item),
                attributes: original_attrs,
                state: root_state,
            },
            StemTransition {
                surface: modified,
                item: Arc::clone(item),
                attributes: modified_attrs,
                state: modified_state,
            },
        ])
    }

    fn generate_compound(&self, item: &Arc<DictionaryItem>) -> Result<Vec<StemTransition>> {
        let compound_root = item
            .compound_root
            .as_ref()
            .filter(|root| !root.is_empty())
            .ok_or_else(|| {
                MorfoError::lexicon(format!(
                    "compound item '{}' is missing its bare root",
                    item.id()
                ))
            })?;
        let full_state = self.graph.state_by_key(NOUN_COMPOUND_P3SG_STATE)?.id;
        let root_state = self.graph.state_by_key(NOUN_COMPOUND_STATE)?.id;
        Ok(vec![
            StemTransition {
                surface: item.pronunciation.clone(),
                item: Arc::clone(item),
                attributes: self.root_attributes(item, &item.pronunciation),
                state: full_state,
            },
            StemTransition {
                surface: compound_root.clone(),
                item: Arc::clone(item),
                attributes: self
                    .root_attributes(item, compound_root)
                    .with(PhoneticAttribute::CannotTerminate),
                state: root_state,
            },
        ])
    }

    fn generate_special(&self, item: &Arc<DictionaryItem>) -> Result<Vec<StemTransition>> {
        let id = item.id();
        let stems = SPECIAL_ROOTS
            .get(id.as_str())
            .ok_or_else(|| MorfoError::unknown_special_root(&id))?;
        stems
            .iter()
            .map(|stem| {
                let mut attrs = morphemic_attributes(stem.surface, AttributeSet::new());
                if stem.cannot_terminate {
                    attrs.add(PhoneticAttribute::CannotTerminate);
                }
                if stem.expects_vowel {
                    attrs.add(PhoneticAttribute::ExpectsVowel);
                }
                if stem.expects_consonant {
                    attrs.add(PhoneticAttribute::ExpectsConsonant);
                }
                Ok(StemTransition {
                    surface: stem.surface.to_string(),
                    item: Arc::clone(item),
                    attributes: attrs,
                    state: self.graph.state_by_key(stem.state_key)?.id,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::SecondaryPos;
    use crate::morphotactics::MorphotacticsBuilder;
    use crate::phonetics::PhoneticAttribute::*;

    fn test_graph() -> Arc<Morphotactics> {
        let mut b = MorphotacticsBuilder::new();
        let noun = b.morpheme("Noun", "noun");
        let verb = b.morpheme("Verb", "verb");
        let pron = b.morpheme("Pron", "pronoun");

        let noun_s = b.state("noun_S", &noun).unwrap();
        let verb_s = b.state("verb_S", &verb).unwrap();
        b.state("verb_last_vowel_drop_S", &verb).unwrap();
        b.state("noun_compound_p3sg_S", &noun).unwrap();
        b.state("noun_compound_S", &noun).unwrap();
        b.state("pron_pers_S", &pron).unwrap();
        b.state("pron_pers_mod_S", &pron).unwrap();
        b.root_state(PrimaryPos::Noun, SecondaryPos::None, noun_s);
        b.root_state(PrimaryPos::Verb, SecondaryPos::None, verb_s);
        Arc::new(b.build().unwrap())
    }

    #[test]
    fn test_plain_item_single_transition() {
        let graph = test_graph();
        let generator = StemTransitionGenerator::new(Arc::clone(&graph));
        let item = Arc::new(DictionaryItem::new("el", PrimaryPos::Noun));

        let transitions = generator.generate(&item).unwrap();
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].surface, "el");
        assert!(transitions[0].attributes.contains(LastVowelFrontal));
    }

    #[test]
    fn test_voicing_pair() {
        let graph = test_graph();
        let generator = StemTransitionGenerator::new(graph);
        let item = Arc::new(
            DictionaryItem::new("kitap", PrimaryPos::Noun).with_attribute(RootAttribute::Voicing),
        );

        let transitions = generator.generate(&item).unwrap();
        assert_eq!(transitions.len(), 2);
        assert_eq!(transitions[0].surface, "kitap");
        assert!(transitions[0].attributes.contains(ExpectsConsonant));
        assert_eq!(transitions[1].surface, "kitab");
        assert!(transitions[1].attributes.contains(ExpectsVowel));
        assert!(transitions[1].attributes.contains(CannotTerminate));
    }

    #[test]
    fn test_voicing_nk_exception() {
        let graph = test_graph();
        let generator = StemTransitionGenerator::new(graph);
        let item = Arc::new(
            DictionaryItem::new("renk", PrimaryPos::Noun).with_attribute(RootAttribute::Voicing),
        );

        let transitions = generator.generate(&item).unwrap();
        assert_eq!(transitions[1].surface, "reng");
    }

    #[test]
    fn test_doubling_pair() {
        let graph = test_graph();
        let generator = StemTransitionGenerator::new(graph);
        let item = Arc::new(
            DictionaryItem::new("sır", PrimaryPos::Noun).with_attribute(RootAttribute::Doubling),
        );

        let transitions = generator.generate(&item).unwrap();
        assert_eq!(transitions.len(), 2);
        assert_eq!(transitions[0].surface, "sır");
        assert_eq!(transitions[1].surface, "sırr");
        // Both pairs feed valid graph states.
        assert_eq!(transitions[0].state, transitions[1].state);
    }

    #[test]
    fn test_last_vowel_drop() {
        let graph = test_graph();
        let generator = StemTransitionGenerator::new(Arc::clone(&graph));
        let item = Arc::new(
            DictionaryItem::new("ağız", PrimaryPos::Noun)
                .with_attribute(RootAttribute::LastVowelDrop),
        );
        let transitions = generator.generate(&item).unwrap();
        assert_eq!(transitions[1].surface, "ağz");

        // Verbs continue from the dedicated state.
        let item = Arc::new(
            DictionaryItem::new("kavurmak", PrimaryPos::Verb)
                .with_root("kavur")
                .with_attribute(RootAttribute::LastVowelDrop),
        );
        let transitions = generator.generate(&item).unwrap();
        assert_eq!(transitions[1].surface, "kavr");
        assert_eq!(
            transitions[1].state,
            graph.state_by_key(VERB_LAST_VOWEL_DROP_STATE).unwrap().id
        );
    }

    #[test]
    fn test_progressive_vowel_drop() {
        let graph = test_graph();
        let generator = StemTransitionGenerator::new(graph);
        let item = Arc::new(
            DictionaryItem::new("anlamak", PrimaryPos::Verb)
                .with_root("anla")
                .with_attribute(RootAttribute::ProgressiveVowelDrop),
        );
        let transitions = generator.generate(&item).unwrap();
        assert_eq!(transitions[1].surface, "anl");
        assert!(transitions[1].attributes.contains(ExpectsVowel));
    }

    #[test]
    fn test_inverse_harmony_single_flipped() {
        let graph = test_graph();
        let generator = StemTransitionGenerator::new(graph);
        let item = Arc::new(
            DictionaryItem::new("saat", PrimaryPos::Noun)
                .with_attribute(RootAttribute::InverseHarmony),
        );
        let transitions = generator.generate(&item).unwrap();
        assert_eq!(transitions.len(), 1);
        assert!(transitions[0].attributes.contains(LastVowelFrontal));
        assert!(!transitions[0].attributes.contains(LastVowelBack));
    }

    #[test]
    fn test_special_root_pair() {
        let graph = test_graph();
        let generator = StemTransitionGenerator::new(Arc::clone(&graph));
        let item = Arc::new(
            DictionaryItem::new("ben", PrimaryPos::Pronoun)
                .with_secondary_pos(SecondaryPos::PersonalPronoun)
                .with_attribute(RootAttribute::Special),
        );
        let transitions = generator.generate(&item).unwrap();
        assert_eq!(transitions.len(), 2);
        assert_eq!(transitions[0].surface, "ben");
        assert_eq!(transitions[1].surface, "ban");
        assert!(transitions[1].attributes.contains(CannotTerminate));
        assert_eq!(
            transitions[1].state,
            graph.state_by_key("pron_pers_mod_S").unwrap().id
        );
    }

    #[test]
    fn test_unknown_special_root_is_error() {
        let graph = test_graph();
        let generator = StemTransitionGenerator::new(graph);
        let item = Arc::new(
            DictionaryItem::new("falan", PrimaryPos::Pronoun)
                .with_attribute(RootAttribute::Special),
        );
        assert!(generator.generate(&item).is_err());
    }

    #[test]
    fn test_compound_pair() {
        let graph = test_graph();
        let generator = StemTransitionGenerator::new(graph);
        let item = Arc::new(
            DictionaryItem::new("zeytinyağı", PrimaryPos::Noun)
                .with_attribute(RootAttribute::CompoundP3sg)
                .with_compound_root("zeytinyağ"),
        );
        let transitions = generator.generate(&item).unwrap();
        assert_eq!(transitions.len(), 2);
        assert_eq!(transitions[0].surface, "zeytinyağı");
        assert_eq!(transitions[1].surface, "zeytinyağ");
        assert!(transitions[1].attributes.contains(CannotTerminate));
    }
}
