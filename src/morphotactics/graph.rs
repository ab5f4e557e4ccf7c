//! The morphotactics graph arena and its builder.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::error::{MorfoError, Result};
use crate::lexicon::{DictionaryItem, PrimaryPos, SecondaryPos};
use crate::morphotactics::condition::Condition;
use crate::morphotactics::morpheme::{Morpheme, MorphemeState, StateId};
use crate::morphotactics::template::SurfaceTemplate;
use crate::phonetics::AttributeSet;

/// Index of a transition in the graph arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionId(pub(crate) u32);

impl TransitionId {
    /// Arena index of this transition.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A templated suffix edge between two morpheme states.
///
/// Realized surfaces are memoized per phonetic attribute set; the cache is
/// a shared read path and overwriting on a racing miss is harmless, so it
/// sits behind a plain `RwLock` without further coordination.
pub struct SuffixTransition {
    /// Arena id of this transition.
    pub id: TransitionId,
    /// Source state.
    pub from: StateId,
    /// Target state.
    pub to: StateId,
    name: String,
    template: SurfaceTemplate,
    condition: Option<Arc<dyn Condition>>,
    surface_cache: RwLock<AHashMap<AttributeSet, String>>,
}

impl SuffixTransition {
    /// The suffix surface template.
    pub fn template(&self) -> &SurfaceTemplate {
        &self.template
    }

    /// The guard condition, if any.
    pub fn condition(&self) -> Option<&Arc<dyn Condition>> {
        self.condition.as_ref()
    }

    /// Check if this transition never produces a surface.
    pub fn is_epsilon(&self) -> bool {
        self.template.is_epsilon()
    }

    /// Display name, `from:template:to`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn cache(&self) -> &RwLock<AHashMap<AttributeSet, String>> {
        &self.surface_cache
    }
}

impl fmt::Debug for SuffixTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuffixTransition")
            .field("name", &self.name)
            .field("condition", &self.condition)
            .finish()
    }
}

impl fmt::Display for SuffixTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The wired morphotactics graph.
///
/// States and transitions live in index-addressed arenas; the graph is
/// immutable after [`MorphotacticsBuilder::build`] and shared behind an
/// `Arc` between the stem index and the search engine.
pub struct Morphotactics {
    states: Vec<Arc<MorphemeState>>,
    transitions: Vec<Arc<SuffixTransition>>,
    by_key: AHashMap<String, StateId>,
    root_states: AHashMap<(PrimaryPos, SecondaryPos), StateId>,
}

impl Morphotactics {
    /// Get a state by arena id.
    pub fn state(&self, id: StateId) -> &Arc<MorphemeState> {
        &self.states[id.index()]
    }

    /// Get a transition by arena id.
    pub fn transition(&self, id: TransitionId) -> &Arc<SuffixTransition> {
        &self.transitions[id.index()]
    }

    /// Look up a state by key. Missing keys are configuration errors.
    pub fn state_by_key(&self, key: &str) -> Result<&Arc<MorphemeState>> {
        self.by_key
            .get(key)
            .map(|id| &self.states[id.index()])
            .ok_or_else(|| MorfoError::missing_state(key))
    }

    /// Resolve the root entry state for a dictionary item. Falls back from
    /// the item's (pos, secondary pos) pair to the bare pos registration.
    pub fn root_state_for(&self, item: &DictionaryItem) -> Result<StateId> {
        self.root_states
            .get(&(item.pos, item.secondary_pos))
            .or_else(|| self.root_states.get(&(item.pos, SecondaryPos::None)))
            .copied()
            .ok_or_else(|| {
                MorfoError::graph(format!(
                    "no root state registered for {:?}",
                    item.pos
                ))
            })
    }

    /// Iterate over the outgoing transitions of a state.
    pub fn outgoing(&self, state: StateId) -> impl Iterator<Item = &Arc<SuffixTransition>> {
        self.states[state.index()]
            .outgoing()
            .iter()
            .map(|id| &self.transitions[id.index()])
    }

    /// Number of states in the graph.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Number of transitions in the graph.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}

impl fmt::Debug for Morphotactics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Morphotactics")
            .field("states", &self.states.len())
            .field("transitions", &self.transitions.len())
            .finish()
    }
}

struct StateDef {
    key: String,
    morpheme: Arc<Morpheme>,
    terminal: bool,
    derivative: bool,
    pos_root: bool,
}

struct TransitionDef {
    from: StateId,
    to: StateId,
    template: SurfaceTemplate,
    condition: Option<Arc<dyn Condition>>,
}

/// Builder for [`Morphotactics`] graphs.
///
/// # Examples
///
/// ```
/// use morfo::morphotactics::MorphotacticsBuilder;
/// use morfo::lexicon::{PrimaryPos, SecondaryPos};
///
/// let mut b = MorphotacticsBuilder::new();
/// let noun = b.morpheme("Noun", "noun");
/// let a3pl = b.morpheme("A3pl", "third person plural");
///
/// let noun_s = b.state("noun_S", &noun).unwrap();
/// let a3pl_st = b.terminal_state("a3pl_ST", &a3pl).unwrap();
/// b.root_state(PrimaryPos::Noun, SecondaryPos::None, noun_s);
/// b.add(noun_s, a3pl_st, "lAr").unwrap();
///
/// let graph = b.build().unwrap();
/// assert_eq!(graph.state_count(), 2);
/// ```
#[derive(Default)]
pub struct MorphotacticsBuilder {
    morphemes: AHashMap<String, Arc<Morpheme>>,
    states: Vec<StateDef>,
    by_key: AHashMap<String, StateId>,
    transitions: Vec<TransitionDef>,
    root_states: AHashMap<(PrimaryPos, SecondaryPos), StateId>,
}

impl MorphotacticsBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        MorphotacticsBuilder::default()
    }

    /// Intern an inflectional morpheme by id.
    pub fn morpheme<S: Into<String>, N: Into<String>>(&mut self, id: S, name: N) -> Arc<Morpheme> {
        let id = id.into();
        self.morphemes
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Morpheme::new(id, name)))
            .clone()
    }

    /// Intern a derivational morpheme by id.
    pub fn derivational_morpheme<S: Into<String>, N: Into<String>>(
        &mut self,
        id: S,
        name: N,
    ) -> Arc<Morpheme> {
        let id = id.into();
        self.morphemes
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Morpheme::derivational(id, name)))
            .clone()
    }

    /// Add a state with explicit flags.
    pub fn state_with(
        &mut self,
        key: &str,
        morpheme: &Arc<Morpheme>,
        terminal: bool,
        derivative: bool,
        pos_root: bool,
    ) -> Result<StateId> {
        if self.by_key.contains_key(key) {
            return Err(MorfoError::graph(format!("duplicate state key '{key}'")));
        }
        let id = StateId(self.states.len() as u32);
        self.states.push(StateDef {
            key: key.to_string(),
            morpheme: Arc::clone(morpheme),
            terminal,
            derivative,
            pos_root,
        });
        self.by_key.insert(key.to_string(), id);
        Ok(id)
    }

    /// Add a non-terminal state.
    pub fn state(&mut self, key: &str, morpheme: &Arc<Morpheme>) -> Result<StateId> {
        self.state_with(key, morpheme, false, false, false)
    }

    /// Add a terminal state.
    pub fn terminal_state(&mut self, key: &str, morpheme: &Arc<Morpheme>) -> Result<StateId> {
        self.state_with(key, morpheme, true, false, false)
    }

    /// Add a non-terminal derivative state.
    pub fn derivative_state(&mut self, key: &str, morpheme: &Arc<Morpheme>) -> Result<StateId> {
        self.state_with(key, morpheme, false, true, false)
    }

    /// Add a part-of-speech root entry state.
    pub fn pos_root_state(&mut self, key: &str, morpheme: &Arc<Morpheme>) -> Result<StateId> {
        self.state_with(key, morpheme, false, false, true)
    }

    /// Register a state as the root entry for a part of speech.
    pub fn root_state(&mut self, pos: PrimaryPos, secondary: SecondaryPos, state: StateId) {
        self.root_states.insert((pos, secondary), state);
    }

    /// Wire a transition with a template and no condition.
    pub fn add(&mut self, from: StateId, to: StateId, template: &str) -> Result<()> {
        self.transitions.push(TransitionDef {
            from,
            to,
            template: SurfaceTemplate::parse(template)?,
            condition: None,
        });
        Ok(())
    }

    /// Wire a transition with a template and a guard condition.
    pub fn add_with(
        &mut self,
        from: StateId,
        to: StateId,
        template: &str,
        condition: Arc<dyn Condition>,
    ) -> Result<()> {
        self.transitions.push(TransitionDef {
            from,
            to,
            template: SurfaceTemplate::parse(template)?,
            condition: Some(condition),
        });
        Ok(())
    }

    /// Wire an epsilon (surfaceless) transition.
    pub fn add_empty(&mut self, from: StateId, to: StateId) -> Result<()> {
        self.add(from, to, "")
    }

    /// Wire an epsilon transition with a guard condition.
    pub fn add_empty_with(
        &mut self,
        from: StateId,
        to: StateId,
        condition: Arc<dyn Condition>,
    ) -> Result<()> {
        self.add_with(from, to, "", condition)
    }

    /// Assemble the graph.
    pub fn build(self) -> Result<Morphotactics> {
        let mut outgoing: Vec<Vec<TransitionId>> = vec![Vec::new(); self.states.len()];
        let mut transitions = Vec::with_capacity(self.transitions.len());

        for (index, def) in self.transitions.into_iter().enumerate() {
            let id = TransitionId(index as u32);
            outgoing[def.from.index()].push(id);
            let name = format!(
                "{}:{}:{}",
                self.states[def.from.index()].key,
                def.template.raw(),
                self.states[def.to.index()].key
            );
            transitions.push(Arc::new(SuffixTransition {
                id,
                from: def.from,
                to: def.to,
                name,
                template: def.template,
                condition: def.condition,
                surface_cache: RwLock::new(AHashMap::new()),
            }));
        }

        let states = self
            .states
            .into_iter()
            .zip(outgoing)
            .enumerate()
            .map(|(index, (def, outgoing))| {
                Arc::new(MorphemeState {
                    key: def.key,
                    id: StateId(index as u32),
                    morpheme: def.morpheme,
                    terminal: def.terminal,
                    derivative: def.derivative,
                    pos_root: def.pos_root,
                    outgoing,
                })
            })
            .collect();

        Ok(Morphotactics {
            states,
            transitions,
            by_key: self.by_key,
            root_states: self.root_states,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basics() {
        let mut b = MorphotacticsBuilder::new();
        let noun = b.morpheme("Noun", "noun");
        let a3pl = b.morpheme("A3pl", "third person plural");

        let noun_s = b.state("noun_S", &noun).unwrap();
        let a3pl_st = b.terminal_state("a3pl_ST", &a3pl).unwrap();
        b.add(noun_s, a3pl_st, "lAr").unwrap();
        b.add_empty(noun_s, a3pl_st).unwrap();

        let graph = b.build().unwrap();
        assert_eq!(graph.state_count(), 2);
        assert_eq!(graph.transition_count(), 2);
        assert_eq!(graph.outgoing(noun_s).count(), 2);
        assert!(graph.state(a3pl_st).terminal);
        assert!(graph.state_by_key("noun_S").is_ok());
        assert!(graph.state_by_key("verb_S").is_err());
    }

    #[test]
    fn test_duplicate_state_key_rejected() {
        let mut b = MorphotacticsBuilder::new();
        let noun = b.morpheme("Noun", "noun");
        b.state("noun_S", &noun).unwrap();
        assert!(b.state("noun_S", &noun).is_err());
    }

    #[test]
    fn test_malformed_template_rejected() {
        let mut b = MorphotacticsBuilder::new();
        let noun = b.morpheme("Noun", "noun");
        let s = b.state("noun_S", &noun).unwrap();
        let t = b.terminal_state("noun_ST", &noun).unwrap();
        assert!(b.add(s, t, "lQr").is_err());
    }

    #[test]
    fn test_morpheme_interning() {
        let mut b = MorphotacticsBuilder::new();
        let a = b.morpheme("A3pl", "third person plural");
        let c = b.morpheme("A3pl", "ignored");
        assert!(Arc::ptr_eq(&a, &c));
    }
}
