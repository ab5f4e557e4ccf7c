//! Morphotactics: the finite-state graph of morpheme states and templated
//! suffix transitions.
//!
//! The graph itself is wired by an external collaborator through
//! [`MorphotacticsBuilder`]; this module owns the contract the search engine
//! executes — states, transitions, template parsing, guard conditions and
//! phonology-aware surface realization.

pub mod condition;
pub mod graph;
pub mod morpheme;
pub mod surface;
pub mod template;

pub use condition::{and, has, has_tail, not, not_have, or, previous_morpheme_is, root_is,
    root_is_not, Condition};
pub use graph::{Morphotactics, MorphotacticsBuilder, SuffixTransition, TransitionId};
pub use morpheme::{Morpheme, MorphemeState, StateId};
pub use template::{SurfaceTemplate, TemplateToken};
