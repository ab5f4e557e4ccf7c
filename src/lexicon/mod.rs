//! Dictionary items and the lexicon container.
//!
//! The analyzer never reads dictionary resource files itself; a loader
//! collaborator produces [`DictionaryItem`] values and registers them here.
//! The [`Lexicon`] is the bootstrap source for the stem index, and items
//! carrying the `Runtime` attribute may be added and removed on the fly for
//! unknown-word workflows.

pub mod item;

pub use item::{DictionaryItem, PrimaryPos, RootAttribute, RootAttributes, SecondaryPos};

use std::sync::Arc;

use ahash::AHashMap;

use crate::error::{MorfoError, Result};

/// An in-memory collection of dictionary items, addressable by id.
///
/// Item identity is `lemma + part of speech` (see [`DictionaryItem::id`]),
/// so homophones with different parts of speech coexist.
#[derive(Debug, Default)]
pub struct Lexicon {
    items: Vec<Arc<DictionaryItem>>,
    by_id: AHashMap<String, Arc<DictionaryItem>>,
}

impl Lexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Lexicon::default()
    }

    /// Add an item, returning the shared handle used everywhere else.
    ///
    /// Two distinct items with the same id are a configuration problem and
    /// are rejected.
    pub fn add(&mut self, item: DictionaryItem) -> Result<Arc<DictionaryItem>> {
        let id = item.id();
        if self.by_id.contains_key(&id) {
            return Err(MorfoError::lexicon(format!("duplicate item id '{id}'")));
        }
        let item = Arc::new(item);
        self.items.push(Arc::clone(&item));
        self.by_id.insert(id, Arc::clone(&item));
        Ok(item)
    }

    /// Look up an item by id.
    pub fn get(&self, id: &str) -> Option<&Arc<DictionaryItem>> {
        self.by_id.get(id)
    }

    /// Iterate over all items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &Arc<DictionaryItem>> {
        self.items.iter()
    }

    /// Number of items in the lexicon.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the lexicon is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut lexicon = Lexicon::new();
        let item = lexicon
            .add(DictionaryItem::new("kitap", PrimaryPos::Noun))
            .unwrap();

        assert_eq!(lexicon.len(), 1);
        assert_eq!(item.id(), "kitap_Noun");
        assert!(lexicon.get("kitap_Noun").is_some());
        assert!(lexicon.get("kalem_Noun").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut lexicon = Lexicon::new();
        lexicon
            .add(DictionaryItem::new("yüz", PrimaryPos::Noun))
            .unwrap();
        // Same lemma, different part of speech: fine.
        lexicon
            .add(DictionaryItem::new("yüz", PrimaryPos::Verb))
            .unwrap();
        // Exact duplicate: rejected.
        assert!(lexicon.add(DictionaryItem::new("yüz", PrimaryPos::Noun)).is_err());
        assert_eq!(lexicon.len(), 2);
    }
}
