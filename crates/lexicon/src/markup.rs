//! Translate-in-place sweep over a host markup tree.
//!
//! The host exposes its document through [`MarkupTree`] and
//! [`MarkupElement`].  Every element carrying [`KEY_ATTRIBUTE`] is
//! translated: the key is the attribute value or, when the value is empty,
//! the element's sole text child (written back onto the attribute).  With
//! [`SAFE_ATTRIBUTE`] present the translation replaces the inner markup
//! verbatim; otherwise it is inserted as escaped text.

use tracing::warn;

use crate::translator::Translator;

/// Attribute holding the translation key.
pub const KEY_ATTRIBUTE: &str = "data-i18n";

/// Attribute allowing raw markup in the translation.
pub const SAFE_ATTRIBUTE: &str = "data-i18n-safe";

/// Shape of an element's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Children {
    /// Exactly one text node with this content.
    Text(String),
    /// Exactly one child that is not a text node.
    Element,
    /// No children, or more than one.
    Other(usize),
}

/// One element of a host markup tree.
pub trait MarkupElement {
    /// Returns an attribute value, or `None` when the attribute is absent.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Sets an attribute value.
    fn set_attribute(&mut self, name: &str, value: &str);

    /// Removes an attribute.
    fn remove_attribute(&mut self, name: &str);

    /// Describes the children of the element.
    fn children(&self) -> Children;

    /// Returns the serialised inner markup.
    fn inner_markup(&self) -> String;

    /// Replaces the inner markup without escaping.
    fn set_inner_markup(&mut self, markup: &str);

    /// Replaces the content with plain text.
    fn set_text(&mut self, text: &str) {
        self.set_inner_markup(&escape_markup(text));
    }

    /// Returns `true` when the attribute is present, even if empty.
    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// A host markup tree.
pub trait MarkupTree {
    /// Element type of the tree.
    type Element: MarkupElement;

    /// Calls `visit` for every element carrying `attribute`, in document
    /// order.
    fn visit_marked(&mut self, attribute: &str, visit: &mut dyn FnMut(&mut Self::Element));
}

/// Outcome of a sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Number of elements whose content was replaced.
    pub translated: usize,
    /// One message per skipped element.
    pub warnings: Vec<String>,
}

/// Escapes `& ' ` " < >` for insertion as text.
///
/// ```
/// assert_eq!(lexicon::escape_markup("<b>\"Tom\" & 'Jerry'</b>"),
///     "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&#x27;"),
            '`' => escaped.push_str("&#x60;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Translates every marked element of `tree` with `translator`.
pub fn apply_to_markup<T: MarkupTree>(translator: &Translator, tree: &mut T) -> SweepSummary {
    let mut summary = SweepSummary::default();
    tree.visit_marked(KEY_ATTRIBUTE, &mut |element| {
        match translate_element(translator, element) {
            Ok(()) => summary.translated += 1,
            Err(message) => {
                warn!(%message, "skipped marked element");
                element.remove_attribute(KEY_ATTRIBUTE);
                summary.warnings.push(message);
            }
        }
    });
    summary
}

fn translate_element<E: MarkupElement>(translator: &Translator, element: &mut E) -> Result<(), String> {
    let safe = element.has_attribute(SAFE_ATTRIBUTE);
    let key = match element.attribute(KEY_ATTRIBUTE).filter(|key| !key.is_empty()) {
        Some(key) => key,
        None => derive_key(element, safe)?,
    };
    let translated = translator.tr(&key);
    if safe {
        element.set_inner_markup(&translated);
    } else {
        element.set_text(&translated);
    }
    Ok(())
}

fn derive_key<E: MarkupElement>(element: &mut E, safe: bool) -> Result<String, String> {
    match element.children() {
        Children::Text(text) => {
            element.set_attribute(KEY_ATTRIBUTE, &text);
            Ok(text)
        }
        Children::Element if safe => Ok(element.inner_markup()),
        Children::Element => Err(format!(
            "element without a key has a non-text child; add {SAFE_ATTRIBUTE} or an explicit key"
        )),
        Children::Other(count) => Err(format!(
            "element without a key has {count} child nodes; exactly one is required"
        )),
    }
}
