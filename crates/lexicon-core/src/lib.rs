//! Dictionary model for the Lexicon translation engine.
//!
//! This crate holds the data a translator resolves against: keyed entries
//! with pluralisation ranges, context overlays guarded by predicates, and the
//! JSON format used to ship dictionaries.  Resolution itself lives in the
//! `lexicon` crate.
//!
//! # Core types
//!
//! - [`Scope`]: keyed entries plus ordered context overlays
//! - [`Entry`] and [`PluralRange`]: the translation stored under one key
//! - [`Context`] and [`ContextPredicate`]: query context and overlay guards
//! - [`DictionaryError`]: failures while building, loading, or saving
//!
//! # Example
//!
//! ```
//! use lexicon_core::Scope;
//!
//! let scope = Scope::from_json_str(r#"{"values":{"Cancel":"Cancelar"}}"#)
//!     .expect("valid dictionary");
//! assert_eq!(
//!     scope.entry("Cancel").and_then(|entry| entry.as_simple_text()),
//!     Some("Cancelar")
//! );
//! ```

mod context;
mod entry;
mod error;
mod format;
mod range;
mod scope;

pub use context::{Context, ContextPredicate};
pub use entry::Entry;
pub use error::DictionaryError;
pub use range::PluralRange;
pub use scope::{ContextOverlay, Scope};

#[cfg(test)]
mod tests;
