//! Context dimensions and overlay predicates.
//!
//! A [`Context`] describes the situation a string is rendered in (for
//! example `gender = female`).  A [`ContextPredicate`] is the requirement an
//! overlay places on that context.  Both are kept in sorted maps so equality
//! never depends on insertion order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Current values of context dimensions.
///
/// Clearing a dimension keeps the key with an empty value.  A cleared
/// dimension never satisfies a predicate.
///
/// # Example
///
/// ```
/// use lexicon_core::Context;
///
/// let mut context = Context::new();
/// context.set("gender", "male");
/// assert_eq!(context.get("gender"), Some("male"));
/// context.clear("gender");
/// assert!(context.contains_key("gender"));
/// assert_eq!(context.get("gender"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    values: BTreeMap<String, Option<String>>,
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a dimension to `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), Some(value.into()));
    }

    /// Clears a dimension, keeping the key with an empty value.
    pub fn clear(&mut self, key: impl Into<String>) {
        self.values.insert(key.into(), None);
    }

    /// Returns the value of a dimension, if set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Option::as_deref)
    }

    /// Returns `true` when the dimension has been set or cleared.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns `true` when no dimension has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over dimensions that currently hold a value.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (key.as_str(), v)))
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        for (key, value) in iter {
            context.set(key, value);
        }
        context
    }
}

/// The requirement an overlay places on the query context.
///
/// A predicate is satisfied when every one of its dimensions is present in
/// the context with an equal value.  Extra context dimensions are ignored, so
/// an empty predicate matches every context.
///
/// # Example
///
/// ```
/// use lexicon_core::{Context, ContextPredicate};
///
/// let predicate: ContextPredicate = [("gender", "male")].into_iter().collect();
/// let context: Context = [("gender", "male"), ("formality", "casual")]
///     .into_iter()
///     .collect();
/// assert!(predicate.is_satisfied_by(&context));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextPredicate {
    matches: BTreeMap<String, String>,
}

impl ContextPredicate {
    /// Creates a predicate from a map of required values.
    #[must_use]
    pub const fn new(matches: BTreeMap<String, String>) -> Self {
        Self { matches }
    }

    /// Returns the required dimension values.
    #[must_use]
    pub const fn matches(&self) -> &BTreeMap<String, String> {
        &self.matches
    }

    /// Returns `true` when `context` satisfies every requirement.
    #[must_use]
    pub fn is_satisfied_by(&self, context: &Context) -> bool {
        self.matches
            .iter()
            .all(|(key, required)| context.get(key) == Some(required.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for ContextPredicate
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            matches: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
