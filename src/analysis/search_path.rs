//! Partial analysis paths.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;

use crate::lexicon::DictionaryItem;
use crate::morphotactics::{MorphemeState, StateId};
use crate::phonetics::{AttributeSet, PhoneticAttribute};
use crate::stems::StemTransition;

/// One consumed surface on a path: the realized text and the state it led
/// to. The first record of every path is the stem itself.
#[derive(Clone, Debug)]
pub struct SurfaceRecord {
    /// The consumed input text. Empty for epsilon moves.
    pub surface: String,
    /// The state this record led to.
    pub state: Arc<MorphemeState>,
}

/// An immutable snapshot of a partial analysis.
///
/// Paths never share mutable structure; extension copies the whole record
/// list. Prefix duplication is the price of aliasing-free advancement, and
/// paths are short.
#[derive(Clone)]
pub struct SearchPath {
    tail: String,
    stem: Arc<StemTransition>,
    records: Vec<SurfaceRecord>,
    state: Arc<MorphemeState>,
    attributes: AttributeSet,
}

impl SearchPath {
    /// Create a seed path from a stem transition. `tail` is the input
    /// remainder after the stem surface and `state` is the resolved target
    /// state of the stem.
    pub fn initial(stem: Arc<StemTransition>, tail: String, state: Arc<MorphemeState>) -> Self {
        let records = vec![SurfaceRecord {
            surface: stem.surface.clone(),
            state: Arc::clone(&state),
        }];
        let attributes = stem.attributes;
        SearchPath {
            tail,
            stem,
            records,
            state,
            attributes,
        }
    }

    /// Copy this path extended by one consumed surface. `consumed` is the
    /// byte length of `tail` covered by the surface (zero for epsilon
    /// moves).
    pub fn advanced(
        &self,
        surface: String,
        consumed: usize,
        target: Arc<MorphemeState>,
        attributes: AttributeSet,
    ) -> SearchPath {
        let mut records = self.records.clone();
        records.push(SurfaceRecord {
            surface,
            state: Arc::clone(&target),
        });
        SearchPath {
            tail: self.tail[consumed..].to_string(),
            stem: Arc::clone(&self.stem),
            records,
            state: target,
            attributes,
        }
    }

    /// The remaining input.
    pub fn tail(&self) -> &str {
        &self.tail
    }

    /// The current phonetic attributes.
    pub fn attributes(&self) -> AttributeSet {
        self.attributes
    }

    /// The seed stem transition.
    pub fn stem(&self) -> &Arc<StemTransition> {
        &self.stem
    }

    /// The dictionary item this path is rooted at.
    pub fn item(&self) -> &Arc<DictionaryItem> {
        &self.stem.item
    }

    /// The consumed surface records, stem first.
    pub fn records(&self) -> &[SurfaceRecord] {
        &self.records
    }

    /// The current state.
    pub fn current_state(&self) -> &Arc<MorphemeState> {
        &self.state
    }

    /// The morpheme id of the most recent record.
    pub fn previous_morpheme_id(&self) -> &str {
        &self.state.morpheme.id
    }

    /// Check whether the path took any suffix with an overt surface.
    pub fn contains_suffix_with_surface(&self) -> bool {
        self.records[1..].iter().any(|r| !r.surface.is_empty())
    }

    /// Check whether the path crossed a derivation boundary.
    pub fn contains_derivation(&self) -> bool {
        self.records.iter().any(|r| r.state.derivative)
    }

    /// Check whether the path is a complete, legal analysis: nothing left
    /// to consume, a terminal state, and no termination ban in effect.
    pub fn accepts(&self) -> bool {
        self.tail.is_empty()
            && self.state.terminal
            && !self.attributes.contains(PhoneticAttribute::CannotTerminate)
    }

    /// The highest number of times any single state occurs in this path's
    /// history. Used by the anti-cycle guard.
    pub fn max_state_repeat(&self) -> usize {
        let mut counts: AHashMap<StateId, usize> = AHashMap::new();
        let mut max = 0;
        for record in &self.records {
            let count = counts.entry(record.state.id).or_insert(0);
            *count += 1;
            max = max.max(*count);
        }
        max
    }
}

impl fmt::Debug for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.stem.surface, self.stem.item.id())?;
        for record in &self.records[1..] {
            write!(f, "+{}({})", record.surface, record.state.key)?;
        }
        write!(f, " tail:'{}'", self.tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{PrimaryPos, SecondaryPos};
    use crate::morphotactics::MorphotacticsBuilder;
    use crate::phonetics::morphemic_attributes;

    fn fixture() -> (Arc<StemTransition>, Arc<MorphemeState>, Arc<MorphemeState>) {
        let mut b = MorphotacticsBuilder::new();
        let noun = b.morpheme("Noun", "noun");
        let a3pl = b.morpheme("A3pl", "third person plural");
        let noun_s = b.state("noun_S", &noun).unwrap();
        let a3pl_st = b.terminal_state("a3pl_ST", &a3pl).unwrap();
        b.root_state(PrimaryPos::Noun, SecondaryPos::None, noun_s);
        let graph = b.build().unwrap();

        let item = Arc::new(DictionaryItem::new("ev", PrimaryPos::Noun));
        let stem = Arc::new(StemTransition {
            surface: "ev".to_string(),
            item,
            attributes: morphemic_attributes("ev", AttributeSet::new()),
            state: noun_s,
        });
        (
            stem,
            Arc::clone(graph.state(noun_s)),
            Arc::clone(graph.state(a3pl_st)),
        )
    }

    #[test]
    fn test_initial_path() {
        let (stem, noun_s, _) = fixture();
        let path = SearchPath::initial(stem, "ler".to_string(), noun_s);

        assert_eq!(path.tail(), "ler");
        assert_eq!(path.records().len(), 1);
        assert!(!path.contains_suffix_with_surface());
        assert!(!path.accepts()); // tail left, non-terminal state
    }

    #[test]
    fn test_advanced_is_a_copy() {
        let (stem, noun_s, a3pl_st) = fixture();
        let path = SearchPath::initial(stem, "ler".to_string(), noun_s);
        let attrs = morphemic_attributes("ler", path.attributes());
        let next = path.advanced("ler".to_string(), 3, a3pl_st, attrs);

        // Parent untouched.
        assert_eq!(path.tail(), "ler");
        assert_eq!(path.records().len(), 1);

        assert_eq!(next.tail(), "");
        assert_eq!(next.records().len(), 2);
        assert!(next.contains_suffix_with_surface());
        assert!(next.accepts());
        assert_eq!(next.previous_morpheme_id(), "A3pl");
    }

    #[test]
    fn test_state_repeat_counting() {
        let (stem, noun_s, _) = fixture();
        let path = SearchPath::initial(stem, String::new(), Arc::clone(&noun_s));
        assert_eq!(path.max_state_repeat(), 1);

        let looped = path
            .advanced(String::new(), 0, Arc::clone(&noun_s), path.attributes())
            .advanced(String::new(), 0, noun_s, path.attributes());
        assert_eq!(looped.max_state_repeat(), 3);
    }
}
