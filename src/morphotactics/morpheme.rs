//! Morphemes and morpheme states.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::morphotactics::graph::TransitionId;

/// An abstract morpheme identity (A3pl, Dat, Past, ...).
///
/// Derivational morphemes start a new derivation group in analyses.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Morpheme {
    /// Short identifier used in analysis output (e.g. `A3pl`).
    pub id: String,
    /// Human readable name (e.g. `third person plural`).
    pub name: String,
    /// Whether this morpheme derives a new word.
    pub derivational: bool,
}

impl Morpheme {
    /// Create an inflectional morpheme.
    pub fn new<S: Into<String>, N: Into<String>>(id: S, name: N) -> Self {
        Morpheme {
            id: id.into(),
            name: name.into(),
            derivational: false,
        }
    }

    /// Create a derivational morpheme.
    pub fn derivational<S: Into<String>, N: Into<String>>(id: S, name: N) -> Self {
        Morpheme {
            id: id.into(),
            name: name.into(),
            derivational: true,
        }
    }
}

impl fmt::Display for Morpheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Index of a state in the morphotactics graph arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateId(pub(crate) u32);

impl StateId {
    /// Arena index of this state.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A node of the morphotactics graph.
///
/// States are interned in the [`Morphotactics`](crate::morphotactics::Morphotactics)
/// arena and immutable after build. By convention keys of analysis start
/// states end in `_S` and terminal states in `_ST`.
#[derive(Debug)]
pub struct MorphemeState {
    /// Unique state key (e.g. `noun_S`).
    pub key: String,
    /// Arena id of this state.
    pub id: StateId,
    /// The morpheme this state belongs to.
    pub morpheme: Arc<Morpheme>,
    /// Whether an analysis may legally end at this state.
    pub terminal: bool,
    /// Whether entering this state starts a new derivation group.
    pub derivative: bool,
    /// Whether this state is a part-of-speech root entry.
    pub pos_root: bool,
    /// Outgoing suffix transitions.
    pub(crate) outgoing: Vec<TransitionId>,
}

impl MorphemeState {
    /// Outgoing suffix transitions, in wiring order.
    pub fn outgoing(&self) -> &[TransitionId] {
        &self.outgoing
    }
}

impl fmt::Display for MorphemeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.key, self.morpheme.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_morpheme_kinds() {
        let a3pl = Morpheme::new("A3pl", "third person plural");
        assert!(!a3pl.derivational);

        let dim = Morpheme::derivational("Dim", "diminutive");
        assert!(dim.derivational);
        assert_eq!(format!("{dim}"), "Dim");
    }
}
