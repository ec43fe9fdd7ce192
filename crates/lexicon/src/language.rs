//! Language negotiation and the persisted language preference.
//!
//! A [`LanguageSelector`] picks the language to load from the languages an
//! application ships.  It consults, in order, the preference stored under
//! [`LANGUAGE_PREFERENCE_KEY`] and the locales reported by a
//! [`LocaleSource`].  Each locale is tried as given and then by its primary
//! subtag, so `pt_BR` also offers `pt`.

use std::collections::BTreeMap;
use std::fs;
use std::future::{self, Ready};
use std::io::{self, Write};
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Key under which the chosen language is persisted.
pub const LANGUAGE_PREFERENCE_KEY: &str = "lexicon.language";

/// Errors raised by a [`PreferenceStore`].
#[derive(Debug, Clone, Error)]
pub enum PreferenceError {
    /// The preference file could not be read.
    #[error("failed to read preferences '{path}': {source}")]
    Read {
        /// Preference file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// The preference file could not be written.
    #[error("failed to write preferences '{path}': {source}")]
    Write {
        /// Preference file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// The preference file is not a JSON object of strings.
    #[error("preferences '{path}' are malformed: {source}")]
    Malformed {
        /// Preference file.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: Arc<serde_json::Error>,
    },
}

/// Errors raised while choosing or persisting a language.
#[derive(Debug, Clone, Error)]
pub enum LanguageError {
    /// None of the supported languages is acceptable.
    #[error("preferred language is not found among {supported:?}")]
    NotFound {
        /// Languages the caller supports.
        supported: Vec<String>,
    },

    /// A language was to be persisted but no store was provided.
    #[error("a preference store is needed to store the language")]
    MissingStore,

    /// The preference store failed.
    #[error(transparent)]
    Preference(#[from] PreferenceError),
}

/// Key-value persistence for user preferences.
pub trait PreferenceStore {
    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError`] when the backing storage fails.
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError`] when the backing storage fails.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// A preference store held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A preference store backed by a JSON object file.
///
/// A missing file reads as an empty store.  Writes replace the file
/// atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePreferenceStore {
    path: Utf8PathBuf,
}

impl FilePreferenceStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(error) => {
                return Err(PreferenceError::Read {
                    path: self.path.clone(),
                    source: Arc::new(error),
                });
            }
        };
        serde_json::from_str(&text).map_err(|error| PreferenceError::Malformed {
            path: self.path.clone(),
            source: Arc::new(error),
        })
    }

    fn store(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        let write_error = |error: io::Error| PreferenceError::Write {
            path: self.path.clone(),
            source: Arc::new(error),
        };
        let mut text = serde_json::to_string_pretty(values)
            .map_err(|error| write_error(io::Error::other(error)))?;
        text.push('\n');
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        fs::create_dir_all(parent).map_err(write_error)?;
        let mut temp = NamedTempFile::new_in(parent).map_err(write_error)?;
        temp.write_all(text.as_bytes()).map_err(write_error)?;
        temp.persist(&self.path)
            .map_err(|error| write_error(error.error))?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.load()?;
        values.insert(key.to_owned(), value.to_owned());
        self.store(&values)?;
        debug!(path = %self.path, key, "stored preference");
        Ok(())
    }
}

/// Source of the environment's preferred locales, most preferred first.
pub trait LocaleSource {
    /// Returns locale identifiers such as `en-US` or `pt_BR`.
    fn preferred_locales(&self) -> Vec<String>;
}

/// Locales reported by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocales;

impl LocaleSource for SystemLocales {
    fn preferred_locales(&self) -> Vec<String> {
        sys_locale::get_locales().collect()
    }
}

/// A fixed list of locales.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedLocales(Vec<String>);

impl FixedLocales {
    /// Creates a source from any list of locale identifiers.
    #[must_use]
    pub fn new<S: Into<String>>(locales: impl IntoIterator<Item = S>) -> Self {
        Self(locales.into_iter().map(Into::into).collect())
    }
}

impl LocaleSource for FixedLocales {
    fn preferred_locales(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// Returns the primary language subtag of a locale (`pt_BR` → `pt`).
#[must_use]
pub fn primary_subtag(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}

/// Expands locales into candidate tags: each locale followed by its primary
/// subtag, without duplicates.
#[must_use]
pub fn expand_locales(locales: &[String]) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::with_capacity(locales.len() * 2);
    for locale in locales {
        for candidate in [locale.as_str(), primary_subtag(locale)] {
            if !candidate.is_empty() && !candidates.iter().any(|seen| seen == candidate) {
                candidates.push(candidate.to_owned());
            }
        }
    }
    candidates
}

/// Compares tags ignoring ASCII case and treating `_` as `-`.
fn same_tag(left: &str, right: &str) -> bool {
    left.len() == right.len()
        && left
            .bytes()
            .zip(right.bytes())
            .all(|(l, r)| normalise(l) == normalise(r))
}

const fn normalise(byte: u8) -> u8 {
    if byte == b'_' {
        b'-'
    } else {
        byte.to_ascii_lowercase()
    }
}

/// Returns the first acceptable tag that is also supported, spelled as in
/// `supported`.
///
/// # Errors
///
/// Returns [`LanguageError::NotFound`] when no acceptable tag is supported.
///
/// # Example
///
/// ```
/// use lexicon::negotiate;
///
/// let chosen = negotiate(&["en", "de", "fr"], &["de", "ja"]).expect("overlap");
/// assert_eq!(chosen, "de");
/// ```
pub fn negotiate<A, S>(acceptable: &[A], supported: &[S]) -> Result<String, LanguageError>
where
    A: AsRef<str>,
    S: AsRef<str>,
{
    acceptable
        .iter()
        .find_map(|wanted| {
            supported
                .iter()
                .find(|offered| same_tag(wanted.as_ref(), offered.as_ref()))
        })
        .map(|offered| offered.as_ref().to_owned())
        .ok_or_else(|| LanguageError::NotFound {
            supported: supported.iter().map(|s| s.as_ref().to_owned()).collect(),
        })
}

/// Persists `language` as the preferred language.
///
/// # Errors
///
/// Returns [`LanguageError::MissingStore`] without a store, or the store's
/// own failure.
pub fn set_language(
    store: Option<&mut dyn PreferenceStore>,
    language: &str,
) -> Result<(), LanguageError> {
    let target = store.ok_or(LanguageError::MissingStore)?;
    target.set(LANGUAGE_PREFERENCE_KEY, language)?;
    Ok(())
}

/// Chooses a language from a stored preference and environment locales.
///
/// # Example
///
/// ```
/// use lexicon::{FixedLocales, LanguageSelector, MemoryPreferenceStore, PreferenceStore};
///
/// let locales = FixedLocales::new(["pt_BR"]);
/// let selector = LanguageSelector::new(&locales);
/// assert_eq!(selector.select(&["en", "pt"]).expect("match"), "pt");
///
/// let mut store = MemoryPreferenceStore::new();
/// store.set("lexicon.language", "en").expect("memory store");
/// let selector = LanguageSelector::new(&locales).with_store(&store);
/// assert_eq!(selector.select(&["en", "pt"]).expect("match"), "en");
/// ```
#[derive(Clone, Copy)]
pub struct LanguageSelector<'a> {
    store: Option<&'a dyn PreferenceStore>,
    locales: &'a dyn LocaleSource,
}

impl<'a> LanguageSelector<'a> {
    /// Creates a selector reading environment locales from `locales`.
    #[must_use]
    pub const fn new(locales: &'a dyn LocaleSource) -> Self {
        Self {
            store: None,
            locales,
        }
    }

    /// Consults `store` before the environment.
    #[must_use]
    pub const fn with_store(mut self, store: &'a dyn PreferenceStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Chooses one of `supported`.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageError::NotFound`] when nothing matches, or the
    /// store's failure.
    pub fn select<S: AsRef<str>>(&self, supported: &[S]) -> Result<String, LanguageError> {
        if let Some(store) = self.store {
            let stored = store
                .get(LANGUAGE_PREFERENCE_KEY)?
                .and_then(|language| negotiate(&[language.as_str()], supported).ok());
            if let Some(chosen) = stored {
                debug!(language = %chosen, "using stored language preference");
                return Ok(chosen);
            }
        }
        let candidates = expand_locales(&self.locales.preferred_locales());
        let chosen = negotiate(&candidates, supported)?;
        debug!(language = %chosen, "negotiated language from environment");
        Ok(chosen)
    }

    /// Chooses one of `supported` and hands the outcome to `callback`,
    /// which runs exactly once.
    pub fn select_with<S, F>(&self, supported: &[S], callback: F)
    where
        S: AsRef<str>,
        F: FnOnce(Result<String, LanguageError>),
    {
        callback(self.select(supported));
    }

    /// Chooses one of `supported` and returns the outcome as a future that
    /// is already complete.
    #[must_use]
    pub fn select_deferred<S: AsRef<str>>(
        &self,
        supported: &[S],
    ) -> Ready<Result<String, LanguageError>> {
        future::ready(self.select(supported))
    }
}

/// Parses an `Accept-Language` header into tags, most preferred first.
///
/// Entries with `q=0`, a malformed weight, or the `*` wildcard are dropped.
/// The `q` parameter name is matched case-insensitively.
/// Equal weights keep their header order.
///
/// ```
/// let tags = lexicon::parse_accept_language("fr;q=0.5, en-GB, de;q=0.8, *;q=0.1");
/// assert_eq!(tags, ["en-GB", "de", "fr"]);
/// ```
#[must_use]
pub fn parse_accept_language(header: &str) -> Vec<String> {
    let mut weighted: Vec<(u16, &str)> = header
        .split(',')
        .filter_map(|item| {
            let mut parts = item.split(';').map(str::trim);
            let tag = parts.next().filter(|tag| !tag.is_empty() && *tag != "*")?;
            let weight = parts
                .find_map(|param| {
                    param
                        .split_once('=')
                        .filter(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
                        .map(|(_, value)| value.trim())
                })
                .map_or(Some(1000), parse_quality)?;
            (weight > 0).then_some((weight, tag))
        })
        .collect();
    weighted.sort_by(|left, right| right.0.cmp(&left.0));
    weighted
        .into_iter()
        .map(|(_, tag)| tag.to_owned())
        .collect()
}

/// Parses a quality value into thousandths (`0.8` → 800).
fn parse_quality(text: &str) -> Option<u16> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    if fraction.len() > 3 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let units = match whole {
        "0" => 0,
        "1" => 1000,
        _ => return None,
    };
    let thousandths: u16 = format!("{fraction:0<3}").parse().ok()?;
    let weight = units + thousandths;
    (weight <= 1000).then_some(weight)
}
