//! Lexicon: runtime string translation with plural ranges and context
//! overlays.
//!
//! This facade crate re-exports the dictionary model from [`lexicon_core`]
//! and provides the resolution engine, the [`Translator`] facade, language
//! negotiation, the markup sweep, and a multi-language [`Catalog`].
//!
//! # Core types
//!
//! - [`Translator`]: owns a dictionary, a global context, and callbacks
//! - [`TranslateOptions`] and [`Arg`]: explicit and positional call options
//! - [`Resolver`]: the lookup and formatting algorithm
//! - [`LanguageSelector`]: stored preference and environment negotiation
//! - [`Catalog`]: translators keyed by language tag
//!
//! # Example
//!
//! ```
//! use lexicon::{TranslateOptions, Translator};
//!
//! let translator = Translator::from_json(
//!     r#"{"values":{"%n comments":[[0,0,"%n comments"],[1,1,"%n comment"],[2,null,"%n comments"]]}}"#,
//! )
//! .expect("valid dictionary");
//! let one = TranslateOptions::new().with_count(1);
//! assert_eq!(translator.translate("%n comments", &one), "1 comment");
//! ```

mod args;
mod catalog;
mod engine;
mod language;
mod markup;
mod options;
mod translator;

pub use lexicon_core::{
    Context, ContextOverlay, ContextPredicate, DictionaryError, Entry, PluralRange, Scope,
};

pub use args::{Arg, ArgumentError, MAX_TRAILING_ARGS};
pub use catalog::Catalog;
pub use engine::{Resolver, WRAPPED_MAPPING_FIELD, render};
pub use language::{
    FilePreferenceStore, FixedLocales, LANGUAGE_PREFERENCE_KEY, LanguageError, LanguageSelector,
    LocaleSource, MemoryPreferenceStore, PreferenceError, PreferenceStore, SystemLocales,
    expand_locales, negotiate, parse_accept_language, primary_subtag, set_language,
};
pub use markup::{
    Children, KEY_ATTRIBUTE, MarkupElement, MarkupTree, SAFE_ATTRIBUTE, SweepSummary,
    apply_to_markup, escape_markup,
};
pub use options::{Placeholders, TranslateOptions};
pub use translator::{CallbackHandle, ChangeCallback, Translator};

#[cfg(test)]
mod tests;
