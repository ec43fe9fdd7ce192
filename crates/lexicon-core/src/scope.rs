//! Translation scopes and context overlays.
//!
//! A [`Scope`] maps keys to [`Entry`] values and owns an ordered list of
//! [`ContextOverlay`]s.  The root scope of a dictionary is an ordinary
//! `Scope`; each overlay nests another one.

use std::collections::BTreeMap;

use tracing::debug;

use crate::context::{Context, ContextPredicate};
use crate::entry::Entry;

/// A context-specific set of entries guarded by a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextOverlay {
    predicate: ContextPredicate,
    scope: Scope,
}

impl ContextOverlay {
    /// Creates an overlay from its predicate and entries.
    #[must_use]
    pub const fn new(predicate: ContextPredicate, scope: Scope) -> Self {
        Self { predicate, scope }
    }

    /// Returns the predicate guarding the overlay.
    #[must_use]
    pub const fn predicate(&self) -> &ContextPredicate {
        &self.predicate
    }

    /// Returns the entries of the overlay.
    #[must_use]
    pub const fn scope(&self) -> &Scope {
        &self.scope
    }
}

/// Keyed translation entries plus their context overlays.
///
/// # Example
///
/// ```
/// use lexicon_core::{Context, ContextPredicate, Scope};
///
/// let mut scope = Scope::new();
/// scope.add_if_not_exists("Cancel", "Cancelar");
/// scope.add_if_not_exists("Cancel", "Annuler");
/// assert_eq!(
///     scope.entry("Cancel").and_then(|e| e.as_simple_text()),
///     Some("Cancelar")
/// );
///
/// let male: ContextPredicate = [("gender", "male")].into_iter().collect();
/// scope.context(male.clone()).add_if_not_exists("their", "his");
/// let context: Context = [("gender", "male")].into_iter().collect();
/// assert!(scope.find_overlay(&context).is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    values: BTreeMap<String, Entry>,
    overlays: Vec<ContextOverlay>,
    warnings: Vec<String>,
}

impl Scope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the scope holds neither entries nor overlays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.overlays.is_empty()
    }

    /// Returns the number of entries held directly by this scope.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Looks up the entry registered for `key`.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.values.get(key)
    }

    /// Iterates over the keys of this scope in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterates over `(key, entry)` pairs in sorted key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.values.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Inserts an entry, replacing and returning any previous one.
    pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<Entry>) -> Option<Entry> {
        self.values.insert(key.into(), entry.into())
    }

    /// Inserts an entry only when `key` is not yet registered.
    ///
    /// Returns `true` when the entry was inserted.  The first write wins so
    /// that repeated extraction runs never overwrite edited translations.
    pub fn add_if_not_exists(&mut self, key: impl Into<String>, entry: impl Into<Entry>) -> bool {
        let owned = key.into();
        if self.values.contains_key(&owned) {
            return false;
        }
        self.values.insert(owned, entry.into());
        true
    }

    /// Returns the overlays in evaluation order.
    #[must_use]
    pub fn overlays(&self) -> &[ContextOverlay] {
        &self.overlays
    }

    /// Appends an overlay without checking for an equal predicate.
    pub fn push_overlay(&mut self, overlay: ContextOverlay) {
        self.overlays.push(overlay);
    }

    /// Returns the scope of the overlay whose predicate equals `predicate`,
    /// creating an empty overlay when none exists.
    ///
    /// Equality is structural, so two predicates built in different key
    /// orders address the same overlay.
    #[expect(
        clippy::indexing_slicing,
        reason = "the index comes from position() or points at the overlay just pushed"
    )]
    pub fn context(&mut self, predicate: ContextPredicate) -> &mut Self {
        let index = self
            .overlays
            .iter()
            .position(|overlay| overlay.predicate == predicate)
            .unwrap_or_else(|| {
                self.overlays.push(ContextOverlay::new(predicate, Self::new()));
                self.overlays.len() - 1
            });
        &mut self.overlays[index].scope
    }

    /// Returns the scope of the overlay whose predicate equals `predicate`.
    #[must_use]
    pub fn overlay(&self, predicate: &ContextPredicate) -> Option<&Self> {
        self.overlays
            .iter()
            .find(|overlay| &overlay.predicate == predicate)
            .map(ContextOverlay::scope)
    }

    /// Returns the first overlay whose predicate `context` satisfies.
    #[must_use]
    pub fn find_overlay(&self, context: &Context) -> Option<&ContextOverlay> {
        self.overlays
            .iter()
            .find(|overlay| overlay.predicate.is_satisfied_by(context))
    }

    /// Merges `other` into this scope.
    ///
    /// Entries overwrite existing keys.  Overlays are appended as they are;
    /// merging the same overlay twice leaves two copies.
    pub fn merge(&mut self, other: Self) {
        debug!(
            values = other.values.len(),
            overlays = other.overlays.len(),
            "merging dictionary data"
        );
        self.values.extend(other.values);
        self.overlays.extend(other.overlays);
        self.warnings.extend(other.warnings);
    }

    /// Discards every entry, overlay, and warning.
    pub fn clear(&mut self) {
        self.values.clear();
        self.overlays.clear();
        self.warnings.clear();
    }

    /// Returns the warnings recorded while populating the scope.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Records a warning about a malformed source site.
    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}
