//! Translators for several languages behind one lookup.

use lexicon_core::{DictionaryError, Scope};
use tracing::debug;

use crate::language::{parse_accept_language, primary_subtag};
use crate::translator::Translator;

/// Translators keyed by language tag, in registration order.
///
/// # Example
///
/// ```
/// use lexicon::Catalog;
///
/// let mut catalog = Catalog::new();
/// catalog.add_json("en", "{}").expect("valid dictionary");
/// catalog
///     .add_json("ja", r#"{"values":{"Yes":"はい"}}"#)
///     .expect("valid dictionary");
///
/// let translator = catalog.select("ja-JP, en;q=0.5").expect("catalog is not empty");
/// assert_eq!(translator.tr("Yes"), "はい");
/// ```
#[derive(Debug, Default)]
pub struct Catalog {
    translators: Vec<(String, Translator)>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `dictionary` under `tag`, replacing any earlier one.
    pub fn add(&mut self, tag: impl Into<String>, dictionary: Scope) {
        let owned = tag.into();
        let translator = Translator::create(Some(dictionary));
        if let Some(slot) = self.translators.iter_mut().find(|(known, _)| *known == owned) {
            slot.1 = translator;
        } else {
            debug!(tag = %owned, "registered language");
            self.translators.push((owned, translator));
        }
    }

    /// Parses and registers a JSON dictionary under `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError`] when the text is not a valid dictionary;
    /// the catalog is left unchanged.
    pub fn add_json(&mut self, tag: impl Into<String>, text: &str) -> Result<(), DictionaryError> {
        let dictionary = Scope::from_json_str(text)?;
        self.add(tag, dictionary);
        Ok(())
    }

    /// Returns the translator registered under exactly `tag`.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&Translator> {
        self.translators
            .iter()
            .find(|(known, _)| known == tag)
            .map(|(_, translator)| translator)
    }

    /// Returns the registered tags in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.translators.iter().map(|(tag, _)| tag.as_str())
    }

    /// Returns the number of registered languages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.translators.len()
    }

    /// Returns `true` when no language is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }

    /// Picks the translator for an `Accept-Language` header.
    ///
    /// Requested tags are tried in preference order, each first exactly and
    /// then by primary subtag.  Without a match the first registered
    /// translator is returned; an empty catalog returns `None`.
    #[must_use]
    pub fn select(&self, accept_language: &str) -> Option<&Translator> {
        let requested = parse_accept_language(accept_language);
        requested
            .iter()
            .find_map(|wanted| self.matching(wanted))
            .or_else(|| self.translators.first())
            .map(|(_, translator)| translator)
    }

    fn matching(&self, wanted: &str) -> Option<&(String, Translator)> {
        self.translators
            .iter()
            .find(|(tag, _)| tag.eq_ignore_ascii_case(wanted))
            .or_else(|| {
                let primary = primary_subtag(wanted);
                self.translators
                    .iter()
                    .find(|(tag, _)| primary_subtag(tag).eq_ignore_ascii_case(primary))
            })
    }
}
