//! Options accepted by a translation call.

use std::collections::BTreeMap;

use lexicon_core::Context;

/// Values substituted for `%{name}` tokens.
pub type Placeholders = BTreeMap<String, String>;

/// Everything a translation call may carry besides its key.
///
/// Every field is optional.  An absent context means the translator's
/// global context is used.
///
/// # Example
///
/// ```
/// use lexicon::TranslateOptions;
///
/// let options = TranslateOptions::new()
///     .with_count(3)
///     .with_placeholder("name", "John");
/// assert_eq!(options.count(), Some(3));
/// assert_eq!(options.placeholders().get("name").map(String::as_str), Some("John"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    default_text: Option<String>,
    count: Option<i64>,
    placeholders: Placeholders,
    context: Option<Context>,
}

impl TranslateOptions {
    /// Creates options with every field absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text shown when the key has no usable translation.
    #[must_use]
    pub fn with_default(mut self, text: impl Into<String>) -> Self {
        self.default_text = Some(text.into());
        self
    }

    /// Sets the count used for range selection and `%n` substitution.
    #[must_use]
    pub const fn with_count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    /// Adds one placeholder value.
    #[must_use]
    pub fn with_placeholder(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.placeholders.insert(name.into(), value.into());
        self
    }

    /// Adds every placeholder yielded by `values`.
    #[must_use]
    pub fn with_placeholders<K, V>(mut self, values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.placeholders.extend(
            values
                .into_iter()
                .map(|(name, value)| (name.into(), value.into())),
        );
        self
    }

    /// Replaces the global context for this call.
    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Returns the fallback text, if any.
    #[must_use]
    pub fn default_text(&self) -> Option<&str> {
        self.default_text.as_deref()
    }

    /// Returns the count, if any.
    #[must_use]
    pub const fn count(&self) -> Option<i64> {
        self.count
    }

    /// Returns the placeholder values.
    #[must_use]
    pub const fn placeholders(&self) -> &Placeholders {
        &self.placeholders
    }

    /// Returns the explicit context, if any.
    #[must_use]
    pub const fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }
}
