//! Localised user-facing messages.
//!
//! The tool's own output is translated with lexicon itself: one embedded
//! dictionary per supported language, keyed by the English text.

use lexicon::{
    FilePreferenceStore, LanguageSelector, LocaleSource, TranslateOptions, Translator, negotiate,
};
use lexicon_config::Config;
use tracing::debug;

use crate::AppError;

/// Languages the tool ships messages for, most preferred first.
pub(crate) const SUPPORTED_LANGUAGES: [&str; 3] = ["en", "de", "fr"];

const FALLBACK_LANGUAGE: &str = "en";

static EN: &str = include_str!("../locales/en.json");
static DE: &str = include_str!("../locales/de.json");
static FR: &str = include_str!("../locales/fr.json");

const EMBEDDED: [(&str, &str); 3] = [("en", EN), ("de", DE), ("fr", FR)];

pub(crate) mod keys {
    pub(crate) const CHECKED: &str = "%{path} is valid: %n keys, %{overlays} context overlays";
    pub(crate) const MERGED: &str = "Merged %n dictionaries into %{path}";
    pub(crate) const LANGUAGE_SET: &str = "Language preference set to %{language}";
}

pub(crate) struct Messages {
    language: String,
    translator: Translator,
}

impl Messages {
    /// Picks the message language.
    ///
    /// A configured language wins, then the stored preference, then the
    /// environment locales.  Anything unsupported falls back to English.
    pub(crate) fn select(config: &Config, locales: &dyn LocaleSource) -> Result<Self, AppError> {
        let chosen = config.language().map_or_else(
            || {
                let store = FilePreferenceStore::new(config.preferences_path().to_path_buf());
                LanguageSelector::new(locales)
                    .with_store(&store)
                    .select(&SUPPORTED_LANGUAGES)
            },
            |forced| negotiate(&[forced], &SUPPORTED_LANGUAGES),
        );
        let language = chosen.unwrap_or_else(|error| {
            debug!(%error, "falling back to English messages");
            FALLBACK_LANGUAGE.to_owned()
        });
        Self::for_language(&language)
    }

    pub(crate) fn for_language(language: &str) -> Result<Self, AppError> {
        let source = EMBEDDED
            .iter()
            .find(|(tag, _)| *tag == language)
            .map_or(EN, |(_, text)| *text);
        Ok(Self {
            language: language.to_owned(),
            translator: Translator::from_json(source)?,
        })
    }

    pub(crate) fn language(&self) -> &str {
        &self.language
    }

    pub(crate) fn translate(&self, key: &str, options: &TranslateOptions) -> String {
        self.translator.translate(key, options)
    }
}
