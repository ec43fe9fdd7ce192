//! Dictionary entries.
//!
//! An [`Entry`] is the translation stored under one key.  It always holds at
//! least one [`PluralRange`]; a plain translation is a single unbounded range.

use crate::error::DictionaryError;
use crate::range::PluralRange;

/// The translation registered for one key.
///
/// # Example
///
/// ```
/// use lexicon_core::{Entry, PluralRange};
///
/// let entry = Entry::plural(vec![
///     PluralRange::new(Some(1), Some(1), "%n comment"),
///     PluralRange::new(Some(2), None, "%n comments"),
/// ])
/// .expect("ranges are present");
/// assert!(entry.is_pluralised());
/// assert_eq!(entry.select(Some(1)).map(|r| r.text()), Some("%n comment"));
/// assert!(entry.select(Some(0)).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    ranges: Vec<PluralRange>,
}

impl Entry {
    /// Creates a non-pluralised entry.
    #[must_use]
    pub fn simple(text: impl Into<String>) -> Self {
        Self {
            ranges: vec![PluralRange::unbounded(text)],
        }
    }

    /// Creates an entry from an ordered list of ranges.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::EmptyEntry`] when `ranges` is empty.
    pub fn plural(ranges: Vec<PluralRange>) -> Result<Self, DictionaryError> {
        if ranges.is_empty() {
            return Err(DictionaryError::EmptyEntry);
        }
        Ok(Self { ranges })
    }

    /// Returns the ranges in evaluation order.
    #[must_use]
    pub fn ranges(&self) -> &[PluralRange] {
        &self.ranges
    }

    /// Returns `true` when the entry carries more than one range.
    #[must_use]
    pub fn is_pluralised(&self) -> bool {
        self.ranges.len() > 1
    }

    /// Returns the text of a single-range entry.
    #[must_use]
    pub fn as_simple_text(&self) -> Option<&str> {
        match self.ranges.as_slice() {
            [only] => Some(only.text()),
            _ => None,
        }
    }

    /// Picks the range used for `count`.
    ///
    /// Without a count the first range is used.  With a count the first range
    /// containing it wins; `None` means no range applies.
    #[must_use]
    pub fn select(&self, count: Option<i64>) -> Option<&PluralRange> {
        count.map_or_else(
            || self.ranges.first(),
            |value| self.ranges.iter().find(|range| range.contains(value)),
        )
    }
}

impl From<&str> for Entry {
    fn from(text: &str) -> Self {
        Self::simple(text)
    }
}

impl From<String> for Entry {
    fn from(text: String) -> Self {
        Self::simple(text)
    }
}
