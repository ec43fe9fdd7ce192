//! Errors raised while building, loading, or saving dictionaries.
//!
//! Loader errors name the location (`root values` or `context[i]`) and key
//! that failed so a translator can find the offending line.  I/O errors are
//! wrapped in `Arc` to keep the enum cheap to move.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors arising from dictionary operations.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// An entry was built without any pluralisation range.
    #[error("an entry needs at least one pluralisation range")]
    EmptyEntry,

    /// The document is not valid JSON.
    #[error("dictionary is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// A structural element has the wrong type.
    #[error("{location} {message}")]
    Shape {
        /// Where the problem was found.
        location: String,
        /// What was expected.
        message: String,
    },

    /// A value is neither a string nor a pluralisation array.
    #[error(
        "value of key '{key}' at {location} should be string or pluralisation array, but '{found}'"
    )]
    InvalidValue {
        /// Offending key.
        key: String,
        /// Where the key was found.
        location: String,
        /// The rejected JSON value.
        found: String,
    },

    /// A pluralisation array contains no ranges.
    #[error("pluralisation array of key '{key}' at {location} is empty")]
    EmptyRanges {
        /// Offending key.
        key: String,
        /// Where the key was found.
        location: String,
    },

    /// A pluralisation range is not a `[min, max, text]` triple.
    #[error("range {index} of key '{key}' at {location} should be [min, max, text], but '{found}'")]
    InvalidRange {
        /// Offending key.
        key: String,
        /// Where the key was found.
        location: String,
        /// Zero-based position of the range.
        index: usize,
        /// The rejected JSON value.
        found: String,
    },

    /// A range bound is neither an integer nor `null`.
    #[error("{bound} bound of key '{key}' at {location} should be int or null, but '{found}'")]
    InvalidBound {
        /// Offending key.
        key: String,
        /// Where the key was found.
        location: String,
        /// `"lower"` or `"upper"`.
        bound: &'static str,
        /// The rejected JSON value.
        found: String,
    },

    /// A range text is not a string.
    #[error("text of key '{key}' at {location} should be string, but '{found}'")]
    InvalidText {
        /// Offending key.
        key: String,
        /// Where the key was found.
        location: String,
        /// The rejected JSON value.
        found: String,
    },

    /// Encoding the dictionary failed.
    #[error("failed to serialise dictionary: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Reading a dictionary file failed.
    #[error("failed to read dictionary '{path}': {source}")]
    Read {
        /// File that could not be read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// Writing a dictionary file failed.
    #[error("failed to write dictionary '{path}': {source}")]
    Write {
        /// File that could not be written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
}
