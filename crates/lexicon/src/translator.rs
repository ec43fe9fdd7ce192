//! The translator facade.
//!
//! A [`Translator`] owns one dictionary, one global context, and one
//! change-notification registry.  Applications construct a default instance
//! at their root and pass it by reference; [`Translator::create`] builds
//! further isolated instances.

use std::collections::BTreeMap;
use std::fmt;

use lexicon_core::{Context, ContextPredicate, DictionaryError, Entry, Scope};
use serde_json::Value;
use tracing::debug;

use crate::args::{Arg, ArgumentError};
use crate::engine::Resolver;
use crate::markup::{self, MarkupTree, SweepSummary};
use crate::options::TranslateOptions;

/// Callback invoked after every merge with the merged language tag.
pub type ChangeCallback = Box<dyn FnMut(Option<&str>) + Send>;

/// Opaque handle identifying a registered callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackHandle(u64);

#[derive(Default)]
struct CallbackRegistry {
    next: u64,
    entries: Vec<(CallbackHandle, ChangeCallback)>,
}

impl CallbackRegistry {
    fn add(&mut self, callback: ChangeCallback) -> CallbackHandle {
        let handle = CallbackHandle(self.next);
        self.next = self.next.wrapping_add(1);
        self.entries.push((handle, callback));
        handle
    }

    fn remove(&mut self, handle: CallbackHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(registered, _)| *registered != handle);
        self.entries.len() != before
    }

    fn notify(&mut self, language: Option<&str>) {
        for (_, callback) in &mut self.entries {
            callback(language);
        }
    }
}

/// Translates keys against an owned dictionary.
///
/// # Example
///
/// ```
/// use lexicon::{Context, ContextPredicate, TranslateOptions, Translator};
///
/// let mut translator = Translator::new();
/// let male: ContextPredicate = [("gender", "male")].into_iter().collect();
/// translator
///     .context(male)
///     .add_if_not_exists("%{name} uploaded their photo", "%{name} uploaded his photo");
///
/// let options = TranslateOptions::new()
///     .with_placeholder("name", "John")
///     .with_context([("gender", "male")].into_iter().collect::<Context>());
/// assert_eq!(
///     translator.translate("%{name} uploaded their photo", &options),
///     "John uploaded his photo"
/// );
/// assert_eq!(translator.tr("Unknown"), "Unknown");
/// ```
#[derive(Default)]
pub struct Translator {
    dictionary: Scope,
    global: Context,
    callbacks: CallbackRegistry,
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("dictionary", &self.dictionary)
            .field("global", &self.global)
            .field("callbacks", &self.callbacks.entries.len())
            .finish()
    }
}

impl Translator {
    /// Creates an empty translator.  Every key resolves to itself.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an isolated translator seeded with `initial`.
    #[must_use]
    pub fn create(initial: Option<Scope>) -> Self {
        let mut translator = Self::new();
        if let Some(dictionary) = initial {
            translator.merge(dictionary, None);
        }
        translator
    }

    /// Creates an isolated translator from JSON dictionary text.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError`] when the text is not a valid dictionary.
    pub fn from_json(text: &str) -> Result<Self, DictionaryError> {
        Ok(Self::create(Some(Scope::from_json_str(text)?)))
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.dictionary, &self.global)
    }

    /// Translates `key` with explicit options.
    #[must_use]
    pub fn translate(&self, key: &str, options: &TranslateOptions) -> String {
        self.resolver().translate(key, options)
    }

    /// Translates `key` with positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] when the arguments do not fit any layout.
    pub fn translate_args(&self, key: &str, args: &[Arg]) -> Result<String, ArgumentError> {
        let options = TranslateOptions::from_args(args)?;
        Ok(self.translate(key, &options))
    }

    /// Translates `key` with no options.
    #[must_use]
    pub fn tr(&self, key: &str) -> String {
        self.translate(key, &TranslateOptions::default())
    }

    /// Translates every value of a mapping.
    #[must_use]
    pub fn translate_map(
        &self,
        mapping: &BTreeMap<String, String>,
        options: &TranslateOptions,
    ) -> BTreeMap<String, String> {
        self.resolver().translate_map(mapping, options)
    }

    /// Translates a JSON mapping, see [`Resolver::translate_json`].
    #[must_use]
    pub fn translate_json(&self, value: &Value, options: &TranslateOptions) -> Value {
        self.resolver().translate_json(value, options)
    }

    /// Merges `bulk` into the dictionary and notifies every callback.
    ///
    /// Values overwrite existing keys; overlays are appended without
    /// deduplication.  Callbacks run in registration order and a panicking
    /// callback propagates to the caller.
    pub fn merge(&mut self, bulk: Scope, language: Option<&str>) {
        self.dictionary.merge(bulk);
        debug!(
            language = language.unwrap_or("-"),
            keys = self.dictionary.len(),
            callbacks = self.callbacks.entries.len(),
            "dictionary updated"
        );
        self.callbacks.notify(language);
    }

    /// Parses JSON dictionary text and merges it.
    ///
    /// Nothing is merged and no callback runs when parsing fails.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError`] when the text is not a valid dictionary.
    pub fn merge_json(&mut self, text: &str, language: Option<&str>) -> Result<(), DictionaryError> {
        let bulk = Scope::from_json_str(text)?;
        self.merge(bulk, language);
        Ok(())
    }

    /// Inserts a root entry unless `key` is already present.
    pub fn add_if_not_exists(&mut self, key: impl Into<String>, entry: impl Into<Entry>) -> bool {
        self.dictionary.add_if_not_exists(key, entry)
    }

    /// Returns the overlay scope for `predicate`, creating it if needed.
    pub fn context(&mut self, predicate: ContextPredicate) -> &mut Scope {
        self.dictionary.context(predicate)
    }

    /// Sets a global context dimension.
    pub fn set_context(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.global.set(key, value);
    }

    /// Clears a global context dimension.
    pub fn clear_context(&mut self, key: impl Into<String>) {
        self.global.clear(key);
    }

    /// Discards the dictionary and the global context.
    pub fn reset(&mut self) {
        self.reset_values();
        self.reset_context();
    }

    /// Discards every entry and overlay.
    pub fn reset_values(&mut self) {
        self.dictionary.clear();
    }

    /// Discards the global context.
    pub fn reset_context(&mut self) {
        self.global = Context::new();
    }

    /// Returns the dictionary.
    #[must_use]
    pub const fn dictionary(&self) -> &Scope {
        &self.dictionary
    }

    /// Returns the global context.
    #[must_use]
    pub const fn global_context(&self) -> &Context {
        &self.global
    }

    /// Encodes the dictionary as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::Serialize`] if encoding fails.
    pub fn to_json(&self) -> Result<String, DictionaryError> {
        self.dictionary.to_json_pretty()
    }

    /// Registers a change callback.
    pub fn add_callback(
        &mut self,
        callback: impl FnMut(Option<&str>) + Send + 'static,
    ) -> CallbackHandle {
        self.callbacks.add(Box::new(callback))
    }

    /// Unregisters a callback.  Returns `false` for an unknown handle.
    pub fn remove_callback(&mut self, handle: CallbackHandle) -> bool {
        self.callbacks.remove(handle)
    }

    /// Translates every marked element of `tree` in place.
    pub fn apply_to_markup<T: MarkupTree>(&self, tree: &mut T) -> SweepSummary {
        markup::apply_to_markup(self, tree)
    }
}
