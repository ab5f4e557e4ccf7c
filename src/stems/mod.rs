//! Stem transitions: the analysis entry points derived from dictionary
//! items.
//!
//! A dictionary item usually yields a single stem surface, but stems with
//! phonological alternations (voicing, doubling, vowel drop) yield an
//! original/modified pair, and a small closed class of irregular roots
//! (personal pronouns, `demek`/`yemek`, `su`) yields fixed stems wired to
//! dedicated graph states. The [`StemTransitionIndex`] keys all of them by
//! exact surface for prefix lookup, with an optional diacritics-folded view
//! for ASCII-tolerant matching.

pub mod generator;
pub mod index;

pub use generator::StemTransitionGenerator;
pub use index::StemTransitionIndex;

use std::fmt;
use std::sync::Arc;

use crate::lexicon::DictionaryItem;
use crate::morphotactics::StateId;
use crate::phonetics::AttributeSet;

/// A concrete, phonetically realized analysis start point.
#[derive(Clone, Debug)]
pub struct StemTransition {
    /// The stem surface; never empty.
    pub surface: String,
    /// The owning dictionary item.
    pub item: Arc<DictionaryItem>,
    /// Phonetic attributes of the surface, including attachment
    /// expectations of modified stems.
    pub attributes: AttributeSet,
    /// The graph state analyses continue from.
    pub state: StateId,
}

impl StemTransition {
    /// Check whether `other` denotes the same index entry: the same item
    /// instance with identical surface, attributes and target state.
    pub fn same_entry(&self, other: &StemTransition) -> bool {
        Arc::ptr_eq(&self.item, &other.item)
            && self.surface == other.surface
            && self.attributes == other.attributes
            && self.state == other.state
    }
}

impl fmt::Display for StemTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.surface, self.item.id())
    }
}
