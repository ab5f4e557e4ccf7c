//! The mutable stem-prefix index.
//!
//! Stem transitions are keyed by their exact surface in a hash multi-map;
//! [`StemTransitionIndex::prefix_matches`] probes every non-empty prefix of
//! the input. A diacritics-folded view used for ASCII-tolerant matching is
//! built lazily on first use and invalidated by any mutation.
//!
//! Reads are safe against each other; `add_item`/`remove_item` are expected
//! to be serialized by the caller under a single-writer discipline. The
//! interior `RwLock`s make a racing read see a consistent map, not a torn
//! one.

use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;
use rayon::prelude::*;

use crate::alphabet::ALPHABET;
use crate::error::Result;
use crate::lexicon::{DictionaryItem, Lexicon};
use crate::morphotactics::Morphotactics;
use crate::stems::generator::StemTransitionGenerator;
use crate::stems::StemTransition;

type SurfaceMap = AHashMap<String, Vec<Arc<StemTransition>>>;

/// Prefix-searchable index of stem transitions.
pub struct StemTransitionIndex {
    generator: StemTransitionGenerator,
    map: RwLock<SurfaceMap>,
    folded: RwLock<Option<SurfaceMap>>,
}

impl StemTransitionIndex {
    /// Create an empty index over a graph.
    pub fn new(graph: Arc<Morphotactics>) -> Self {
        StemTransitionIndex {
            generator: StemTransitionGenerator::new(graph),
            map: RwLock::new(AHashMap::new()),
            folded: RwLock::new(None),
        }
    }

    /// Build an index from a whole lexicon. Transition generation is
    /// parallelized; insertion stays serial.
    pub fn bootstrap(graph: Arc<Morphotactics>, lexicon: &Lexicon) -> Result<Self> {
        let index = StemTransitionIndex::new(graph);
        let items: Vec<&Arc<DictionaryItem>> = lexicon.items().collect();
        let generated: Vec<Vec<StemTransition>> = items
            .par_iter()
            .map(|item| index.generator.generate(item))
            .collect::<Result<_>>()?;
        {
            let mut map = index.map.write();
            for transitions in generated {
                for transition in transitions {
                    map.entry(transition.surface.clone())
                        .or_default()
                        .push(Arc::new(transition));
                }
            }
        }
        Ok(index)
    }

    /// Generate and register the transitions of an item.
    pub fn add_item(&self, item: &Arc<DictionaryItem>) -> Result<()> {
        let transitions = self.generator.generate(item)?;
        let mut map = self.map.write();
        for transition in transitions {
            map.entry(transition.surface.clone())
                .or_default()
                .push(Arc::new(transition));
        }
        *self.folded.write() = None;
        Ok(())
    }

    /// Generate the transitions of an item and remove their index entries.
    ///
    /// Matching is by item instance plus full transition equality, so a
    /// distinct item sharing a surface is never evicted.
    pub fn remove_item(&self, item: &Arc<DictionaryItem>) -> Result<()> {
        let transitions = self.generator.generate(item)?;
        let mut map = self.map.write();
        for transition in transitions {
            if let Some(entries) = map.get_mut(&transition.surface) {
                entries.retain(|entry| !entry.same_entry(&transition));
                if entries.is_empty() {
                    map.remove(&transition.surface);
                }
            }
        }
        *self.folded.write() = None;
        Ok(())
    }

    /// Return all transitions registered under any non-empty prefix of
    /// `input`. With `ascii_tolerant`, stems whose folded surface equals a
    /// folded prefix match as well. Order is stable for a fixed index.
    pub fn prefix_matches(&self, input: &str, ascii_tolerant: bool) -> Vec<Arc<StemTransition>> {
        let mut out = Vec::new();
        {
            let map = self.map.read();
            for (i, c) in input.char_indices() {
                let end = i + c.len_utf8();
                if let Some(entries) = map.get(&input[..end]) {
                    extend_unique(&mut out, entries);
                }
            }
        }
        if ascii_tolerant {
            self.ensure_folded();
            let folded = self.folded.read();
            if let Some(folded) = folded.as_ref() {
                let folded_input = ALPHABET.fold_str(input);
                for (i, c) in folded_input.char_indices() {
                    let end = i + c.len_utf8();
                    if let Some(entries) = folded.get(&folded_input[..end]) {
                        extend_unique(&mut out, entries);
                    }
                }
            }
        }
        out
    }

    /// Snapshot of every registered transition.
    pub fn transitions(&self) -> Vec<Arc<StemTransition>> {
        let map = self.map.read();
        let mut out: Vec<Arc<StemTransition>> =
            map.values().flatten().map(Arc::clone).collect();
        out.sort_by(|a, b| a.surface.cmp(&b.surface));
        out
    }

    /// Number of registered transitions.
    pub fn len(&self) -> usize {
        self.map.read().values().map(Vec::len).sum()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    fn ensure_folded(&self) {
        if self.folded.read().is_some() {
            return;
        }
        let map = self.map.read();
        let mut folded: SurfaceMap = AHashMap::with_capacity(map.len());
        for (surface, entries) in map.iter() {
            folded
                .entry(ALPHABET.fold_str(surface))
                .or_default()
                .extend(entries.iter().map(Arc::clone));
        }
        drop(map);
        *self.folded.write() = Some(folded);
    }
}

fn extend_unique(out: &mut Vec<Arc<StemTransition>>, entries: &[Arc<StemTransition>]) {
    for entry in entries {
        if !out.iter().any(|existing| Arc::ptr_eq(existing, entry)) {
            out.push(Arc::clone(entry));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{PrimaryPos, RootAttribute, SecondaryPos};
    use crate::morphotactics::MorphotacticsBuilder;

    fn test_graph() -> Arc<Morphotactics> {
        let mut b = MorphotacticsBuilder::new();
        let noun = b.morpheme("Noun", "noun");
        let noun_s = b.state("noun_S", &noun).unwrap();
        b.root_state(PrimaryPos::Noun, SecondaryPos::None, noun_s);
        Arc::new(b.build().unwrap())
    }

    fn item(lemma: &str) -> Arc<DictionaryItem> {
        Arc::new(DictionaryItem::new(lemma, PrimaryPos::Noun))
    }

    #[test]
    fn test_prefix_matches() {
        let index = StemTransitionIndex::new(test_graph());
        index.add_item(&item("el")).unwrap();
        index.add_item(&item("elma")).unwrap();
        index.add_item(&item("erik")).unwrap();

        let matches = index.prefix_matches("elmalar", false);
        let surfaces: Vec<&str> = matches.iter().map(|t| t.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["el", "elma"]);

        assert!(index.prefix_matches("armut", false).is_empty());
    }

    #[test]
    fn test_shared_surface_keeps_both_items() {
        let graph = test_graph();
        let index = StemTransitionIndex::new(graph);
        let noun = item("yüz");
        let other = Arc::new(
            DictionaryItem::new("yüz", PrimaryPos::Noun)
                .with_secondary_pos(SecondaryPos::ProperNoun),
        );
        index.add_item(&noun).unwrap();
        index.add_item(&other).unwrap();

        assert_eq!(index.prefix_matches("yüzler", false).len(), 2);

        // Removing one instance leaves the overlapping entry alone.
        index.remove_item(&noun).unwrap();
        let matches = index.prefix_matches("yüzler", false);
        assert_eq!(matches.len(), 1);
        assert!(Arc::ptr_eq(&matches[0].item, &other));
    }

    #[test]
    fn test_add_remove_round_trip() {
        let index = StemTransitionIndex::new(test_graph());
        index.add_item(&item("el")).unwrap();

        let before = index.prefix_matches("ellerim", false);
        let runtime = Arc::new(
            DictionaryItem::new("elle", PrimaryPos::Noun).with_attribute(RootAttribute::Runtime),
        );
        index.add_item(&runtime).unwrap();
        assert_eq!(index.prefix_matches("ellerim", false).len(), before.len() + 1);

        index.remove_item(&runtime).unwrap();
        let after = index.prefix_matches("ellerim", false);
        assert_eq!(after.len(), before.len());
        for (a, b) in before.iter().zip(after.iter()) {
            assert!(Arc::ptr_eq(a, b));
        }
    }

    #[test]
    fn test_ascii_tolerant_matching() {
        let index = StemTransitionIndex::new(test_graph());
        index.add_item(&item("çilek")).unwrap();

        assert!(index.prefix_matches("cilekler", false).is_empty());
        let matches = index.prefix_matches("cilekler", true);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].surface, "çilek");
    }

    #[test]
    fn test_folded_view_invalidated_by_mutation() {
        let index = StemTransitionIndex::new(test_graph());
        index.add_item(&item("çilek")).unwrap();
        assert_eq!(index.prefix_matches("cilek", true).len(), 1);

        index.add_item(&item("cile")).unwrap();
        let matches = index.prefix_matches("cilek", true);
        let surfaces: Vec<&str> = matches.iter().map(|t| t.surface.as_str()).collect();
        assert!(surfaces.contains(&"çilek"));
        assert!(surfaces.contains(&"cile"));
    }

    #[test]
    fn test_bootstrap() {
        let graph = test_graph();
        let mut lexicon = Lexicon::new();
        lexicon.add(DictionaryItem::new("el", PrimaryPos::Noun)).unwrap();
        lexicon
            .add(DictionaryItem::new("kitap", PrimaryPos::Noun).with_attribute(RootAttribute::Voicing))
            .unwrap();

        let index = StemTransitionIndex::bootstrap(graph, &lexicon).unwrap();
        // el + kitap/kitab
        assert_eq!(index.len(), 3);
        assert!(!index.prefix_matches("kitabı", false).is_empty());
    }
}
