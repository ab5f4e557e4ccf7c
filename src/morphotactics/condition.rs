//! Guard conditions on suffix transitions.
//!
//! A transition may carry a condition that inspects the running search path
//! — its phonetic attributes, its dictionary item, its remaining tail — and
//! rejects the transition without consuming anything. Conditions are the
//! mechanism that encodes attachment constraints the surface templates
//! cannot: a voiced stem variant must not take a consonant-initial suffix,
//! a pronoun root only accepts its own case set, and so on.
//!
//! Conditions compose with [`and`], [`or`] and [`not`].

use std::fmt;
use std::sync::Arc;

use crate::analysis::SearchPath;
use crate::lexicon::RootAttribute;
use crate::phonetics::PhoneticAttribute;

/// Trait for transition guard conditions.
pub trait Condition: Send + Sync + fmt::Debug {
    /// Check whether the transition is allowed for this path.
    fn accepts(&self, path: &SearchPath) -> bool;

    /// Get the name of this condition (for trace output).
    fn name(&self) -> &'static str;
}

/// Accepts paths whose attributes contain a given phonetic attribute.
#[derive(Debug)]
pub struct HasPhoneticAttribute(pub PhoneticAttribute);

impl Condition for HasPhoneticAttribute {
    fn accepts(&self, path: &SearchPath) -> bool {
        path.attributes().contains(self.0)
    }

    fn name(&self) -> &'static str {
        "has_phonetic_attribute"
    }
}

/// Accepts paths whose dictionary item carries a given root attribute.
#[derive(Debug)]
pub struct HasRootAttribute(pub RootAttribute);

impl Condition for HasRootAttribute {
    fn accepts(&self, path: &SearchPath) -> bool {
        path.item().has_attribute(self.0)
    }

    fn name(&self) -> &'static str {
        "has_root_attribute"
    }
}

/// Accepts paths rooted at the dictionary item with a given id.
#[derive(Debug)]
pub struct RootIs(pub String);

impl Condition for RootIs {
    fn accepts(&self, path: &SearchPath) -> bool {
        path.item().id() == self.0
    }

    fn name(&self) -> &'static str {
        "root_is"
    }
}

/// Accepts paths that still have input left to consume.
#[derive(Debug)]
pub struct HasTail;

impl Condition for HasTail {
    fn accepts(&self, path: &SearchPath) -> bool {
        !path.tail().is_empty()
    }

    fn name(&self) -> &'static str {
        "has_tail"
    }
}

/// Accepts paths whose most recent morpheme has a given id.
#[derive(Debug)]
pub struct PreviousMorphemeIs(pub String);

impl Condition for PreviousMorphemeIs {
    fn accepts(&self, path: &SearchPath) -> bool {
        path.previous_morpheme_id() == self.0
    }

    fn name(&self) -> &'static str {
        "previous_morpheme_is"
    }
}

/// Inverts a condition.
#[derive(Debug)]
pub struct NotCondition(pub Arc<dyn Condition>);

impl Condition for NotCondition {
    fn accepts(&self, path: &SearchPath) -> bool {
        !self.0.accepts(path)
    }

    fn name(&self) -> &'static str {
        "not"
    }
}

/// Accepts when every inner condition accepts.
#[derive(Debug)]
pub struct AndCondition(pub Vec<Arc<dyn Condition>>);

impl Condition for AndCondition {
    fn accepts(&self, path: &SearchPath) -> bool {
        self.0.iter().all(|c| c.accepts(path))
    }

    fn name(&self) -> &'static str {
        "and"
    }
}

/// Accepts when any inner condition accepts.
#[derive(Debug)]
pub struct OrCondition(pub Vec<Arc<dyn Condition>>);

impl Condition for OrCondition {
    fn accepts(&self, path: &SearchPath) -> bool {
        self.0.iter().any(|c| c.accepts(path))
    }

    fn name(&self) -> &'static str {
        "or"
    }
}

/// Condition on a phonetic attribute being present.
pub fn has(attr: PhoneticAttribute) -> Arc<dyn Condition> {
    Arc::new(HasPhoneticAttribute(attr))
}

/// Condition on a phonetic attribute being absent.
pub fn not_have(attr: PhoneticAttribute) -> Arc<dyn Condition> {
    not(has(attr))
}

/// Condition on the path's root attribute.
pub fn root_has(attr: RootAttribute) -> Arc<dyn Condition> {
    Arc::new(HasRootAttribute(attr))
}

/// Condition on the path's dictionary item id.
pub fn root_is<S: Into<String>>(id: S) -> Arc<dyn Condition> {
    Arc::new(RootIs(id.into()))
}

/// Condition on the path's dictionary item id being different.
pub fn root_is_not<S: Into<String>>(id: S) -> Arc<dyn Condition> {
    not(root_is(id))
}

/// Condition on remaining input being present.
pub fn has_tail() -> Arc<dyn Condition> {
    Arc::new(HasTail)
}

/// Condition on the previous morpheme id.
pub fn previous_morpheme_is<S: Into<String>>(id: S) -> Arc<dyn Condition> {
    Arc::new(PreviousMorphemeIs(id.into()))
}

/// Negate a condition.
pub fn not(condition: Arc<dyn Condition>) -> Arc<dyn Condition> {
    Arc::new(NotCondition(condition))
}

/// Conjunction of conditions.
pub fn and(conditions: Vec<Arc<dyn Condition>>) -> Arc<dyn Condition> {
    Arc::new(AndCondition(conditions))
}

/// Disjunction of conditions.
pub fn or(conditions: Vec<Arc<dyn Condition>>) -> Arc<dyn Condition> {
    Arc::new(OrCondition(conditions))
}
