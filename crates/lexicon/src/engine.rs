//! Translation resolution.
//!
//! [`Resolver`] answers translation calls against a dictionary and a global
//! context.  Lookup tries the first overlay satisfied by the effective
//! context, then the root values.  A key counts as found only when one of
//! its ranges applies to the requested count; anything else falls back to the
//! default text or the key itself.

use std::collections::BTreeMap;

use lexicon_core::{Context, PluralRange, Scope};
use serde_json::Value;
use tracing::trace;

use crate::options::{Placeholders, TranslateOptions};

/// Name of the field that may wrap a key mapping in [`Resolver::translate_json`].
pub const WRAPPED_MAPPING_FIELD: &str = "i18n";

/// Resolves keys against one dictionary.
///
/// # Example
///
/// ```
/// use lexicon::{Context, Resolver, Scope, TranslateOptions};
///
/// let scope = Scope::from_json_str(
///     r#"{"values":{"%n comments":[[0,0,"No comments"],[1,null,"%n comments"]]}}"#,
/// )
/// .expect("valid dictionary");
/// let global = Context::new();
/// let resolver = Resolver::new(&scope, &global);
/// let options = TranslateOptions::new().with_count(4);
/// assert_eq!(resolver.translate("%n comments", &options), "4 comments");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    scope: &'a Scope,
    global: &'a Context,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over `scope` that falls back to `global` when a
    /// call carries no context.
    #[must_use]
    pub const fn new(scope: &'a Scope, global: &'a Context) -> Self {
        Self { scope, global }
    }

    /// Translates one key.
    #[must_use]
    pub fn translate(&self, key: &str, options: &TranslateOptions) -> String {
        let count = options.count();
        let placeholders = options.placeholders();
        self.lookup(key, options).map_or_else(
            || {
                trace!(key, ?count, "no usable translation, using fallback text");
                let fallback = options.default_text().unwrap_or(key);
                render(fallback, count, placeholders)
            },
            |range| render(range.text(), count, placeholders),
        )
    }

    /// Translates every value of a `key → text` mapping with the same options.
    ///
    /// The keys of the returned mapping are unchanged.
    #[must_use]
    pub fn translate_map(
        &self,
        mapping: &BTreeMap<String, String>,
        options: &TranslateOptions,
    ) -> BTreeMap<String, String> {
        mapping
            .iter()
            .map(|(name, text)| (name.clone(), self.translate(text, options)))
            .collect()
    }

    /// Translates a JSON mapping.
    ///
    /// Objects have their string values translated and every other value
    /// copied.  An object whose `i18n` field is itself an object is replaced
    /// by that inner mapping first.  A bare string is translated as a key;
    /// any other value is returned unchanged.
    #[must_use]
    pub fn translate_json(&self, value: &Value, options: &TranslateOptions) -> Value {
        match value {
            Value::Object(fields) => {
                let mapping = match fields.get(WRAPPED_MAPPING_FIELD) {
                    Some(Value::Object(inner)) => inner,
                    _ => fields,
                };
                Value::Object(
                    mapping
                        .iter()
                        .map(|(name, field)| {
                            let translated = match field {
                                Value::String(text) => Value::String(self.translate(text, options)),
                                other => other.clone(),
                            };
                            (name.clone(), translated)
                        })
                        .collect(),
                )
            }
            Value::String(text) => Value::String(self.translate(text, options)),
            other => other.clone(),
        }
    }

    fn lookup(&self, key: &str, options: &TranslateOptions) -> Option<&'a PluralRange> {
        if self.scope.is_empty() {
            return None;
        }
        let context = options.context().unwrap_or(self.global);
        let count = options.count();
        self.scope
            .find_overlay(context)
            .and_then(|overlay| overlay.scope().entry(key))
            .and_then(|entry| entry.select(count))
            .or_else(|| self.scope.entry(key).and_then(|entry| entry.select(count)))
    }
}

/// Substitutes count and placeholder tokens in one left-to-right pass.
///
/// With a count, `-%n` becomes the negated count and `%n` the count.
/// `%{name}` becomes the placeholder value when one is supplied; unknown
/// tokens stay verbatim.  Substituted text is never scanned again.
///
/// # Example
///
/// ```
/// use lexicon::{render, Placeholders};
///
/// let mut placeholders = Placeholders::new();
/// placeholders.insert("name".into(), "%n".into());
/// assert_eq!(render("%{name} -%n/%n %{other}", Some(3), &placeholders), "%n -3/3 %{other}");
/// ```
#[must_use]
pub fn render(text: &str, count: Option<i64>, placeholders: &Placeholders) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(offset) = rest.find(['%', '-']) {
        let (literal, tail) = rest.split_at(offset);
        output.push_str(literal);
        let consumed = substitute_token(tail, count, placeholders, &mut output);
        rest = tail.get(consumed..).unwrap_or_default();
    }
    output.push_str(rest);
    output
}

/// Writes the replacement for the token at the start of `tail` and returns
/// the number of bytes consumed.  Text that is not a known token is copied
/// one character at a time.
fn substitute_token(
    tail: &str,
    count: Option<i64>,
    placeholders: &Placeholders,
    output: &mut String,
) -> usize {
    if let Some(value) = count {
        if tail.starts_with("-%n") {
            output.push_str(&(-i128::from(value)).to_string());
            return "-%n".len();
        }
        if tail.starts_with("%n") {
            output.push_str(&value.to_string());
            return "%n".len();
        }
    }
    let known = placeholder_token(tail)
        .and_then(|(name, len)| placeholders.get(name).map(|value| (value, len)));
    if let Some((value, len)) = known {
        output.push_str(value);
        return len;
    }
    let width = tail.chars().next().map_or(1, char::len_utf8);
    output.push_str(tail.get(..width).unwrap_or_default());
    width
}

/// Parses `%{name}` at the start of `tail`, returning the name and the
/// token length.
fn placeholder_token(tail: &str) -> Option<(&str, usize)> {
    let body = tail.strip_prefix("%{")?;
    let end = body.find('}')?;
    let name = body.get(..end)?;
    Some((name, "%{".len() + end + "}".len()))
}
