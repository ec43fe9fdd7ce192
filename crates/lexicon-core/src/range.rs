//! Pluralisation ranges.
//!
//! A range pairs an inclusive numeric window with the text shown when a
//! count falls inside it.  Either bound may be absent, in which case the
//! window is unbounded on that side.

/// One pluralisation window of an [`Entry`](crate::Entry).
///
/// # Example
///
/// ```
/// use lexicon_core::PluralRange;
///
/// let range = PluralRange::new(Some(2), None, "%n comments");
/// assert!(range.contains(2));
/// assert!(range.contains(i64::MAX));
/// assert!(!range.contains(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralRange {
    /// Inclusive lower bound; `None` is unbounded below.
    min: Option<i64>,
    /// Inclusive upper bound; `None` is unbounded above.
    max: Option<i64>,
    /// Translated text, possibly containing `%n`, `-%n` and `%{name}` tokens.
    text: String,
}

impl PluralRange {
    /// Creates a range with explicit bounds.
    #[must_use]
    pub fn new(min: Option<i64>, max: Option<i64>, text: impl Into<String>) -> Self {
        Self {
            min,
            max,
            text: text.into(),
        }
    }

    /// Creates a range that matches every count.
    #[must_use]
    pub fn unbounded(text: impl Into<String>) -> Self {
        Self::new(None, None, text)
    }

    /// Returns the inclusive lower bound.
    #[must_use]
    pub const fn min(&self) -> Option<i64> {
        self.min
    }

    /// Returns the inclusive upper bound.
    #[must_use]
    pub const fn max(&self) -> Option<i64> {
        self.max
    }

    /// Returns the translated text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` when both bounds are absent.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Returns `true` when `count` lies inside the window.
    #[must_use]
    pub fn contains(&self, count: i64) -> bool {
        self.min.is_none_or(|min| min <= count) && self.max.is_none_or(|max| count <= max)
    }
}
