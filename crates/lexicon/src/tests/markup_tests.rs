//! Tests for the markup sweep.

use std::collections::BTreeMap;

use rstest::{fixture, rstest};

use crate::{
    Children, KEY_ATTRIBUTE, MarkupElement, MarkupTree, SAFE_ATTRIBUTE, Translator, escape_markup,
};

#[derive(Debug, Clone, Default)]
struct FakeElement {
    attributes: BTreeMap<String, String>,
    children: Vec<FakeNode>,
    markup: Option<String>,
}

#[derive(Debug, Clone)]
enum FakeNode {
    Text(String),
    Element(String),
}

impl FakeElement {
    fn new(attributes: &[(&str, &str)], children: Vec<FakeNode>) -> Self {
        Self {
            attributes: attributes
                .iter()
                .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
                .collect(),
            children,
            markup: None,
        }
    }
}

impl MarkupElement for FakeElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_owned(), value.to_owned());
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    fn children(&self) -> Children {
        match self.children.as_slice() {
            [FakeNode::Text(text)] => Children::Text(text.clone()),
            [FakeNode::Element(_)] => Children::Element,
            other => Children::Other(other.len()),
        }
    }

    fn inner_markup(&self) -> String {
        self.children
            .iter()
            .map(|node| match node {
                FakeNode::Text(text) => escape_markup(text),
                FakeNode::Element(markup) => markup.clone(),
            })
            .collect()
    }

    fn set_inner_markup(&mut self, markup: &str) {
        self.markup = Some(markup.to_owned());
    }
}

#[derive(Debug, Default)]
struct FakeTree {
    elements: Vec<FakeElement>,
}

impl MarkupTree for FakeTree {
    type Element = FakeElement;

    fn visit_marked(&mut self, attribute: &str, visit: &mut dyn FnMut(&mut FakeElement)) {
        for element in &mut self.elements {
            if element.has_attribute(attribute) {
                visit(element);
            }
        }
    }
}

#[fixture]
fn translator() -> Translator {
    Translator::from_json(
        r#"{"values":{
            "Hello": "Hola",
            "Bold": "<b>Negrita</b>",
            "<i>Italic</i>": "<i>Cursiva</i>",
            "Quote": "\"Tom\" & 'Jerry'"
        }}"#,
    )
    .expect("valid dictionary")
}

fn text(value: &str) -> FakeNode {
    FakeNode::Text(value.to_owned())
}

fn sweep(translator: &Translator, element: FakeElement) -> (FakeElement, crate::SweepSummary) {
    let mut tree = FakeTree {
        elements: vec![element],
    };
    let summary = translator.apply_to_markup(&mut tree);
    let swept = tree.elements.pop().expect("element is kept");
    (swept, summary)
}

#[rstest]
fn explicit_key_is_inserted_as_escaped_text(translator: Translator) {
    let element = FakeElement::new(&[(KEY_ATTRIBUTE, "Bold")], vec![text("ignored")]);
    let (swept, summary) = sweep(&translator, element);
    assert_eq!(swept.markup.as_deref(), Some("&lt;b&gt;Negrita&lt;/b&gt;"));
    assert_eq!(summary.translated, 1);
    assert!(summary.warnings.is_empty());
}

#[rstest]
fn explicit_key_with_safe_marker_inserts_markup(translator: Translator) {
    let element = FakeElement::new(&[(KEY_ATTRIBUTE, "Bold"), (SAFE_ATTRIBUTE, "")], vec![]);
    let (swept, _) = sweep(&translator, element);
    assert_eq!(swept.markup.as_deref(), Some("<b>Negrita</b>"));
}

#[rstest]
fn empty_key_is_derived_from_sole_text_child(translator: Translator) {
    let element = FakeElement::new(&[(KEY_ATTRIBUTE, "")], vec![text("Hello")]);
    let (swept, summary) = sweep(&translator, element);
    assert_eq!(swept.attribute(KEY_ATTRIBUTE).as_deref(), Some("Hello"));
    assert_eq!(swept.markup.as_deref(), Some("Hola"));
    assert_eq!(summary.translated, 1);
}

#[rstest]
fn derived_key_is_escaped_when_not_safe(translator: Translator) {
    let element = FakeElement::new(&[(KEY_ATTRIBUTE, "")], vec![text("Quote")]);
    let (swept, _) = sweep(&translator, element);
    assert_eq!(
        swept.markup.as_deref(),
        Some("&quot;Tom&quot; &amp; &#x27;Jerry&#x27;")
    );
}

#[rstest]
fn safe_element_child_uses_inner_markup_as_key(translator: Translator) {
    let element = FakeElement::new(
        &[(KEY_ATTRIBUTE, ""), (SAFE_ATTRIBUTE, "")],
        vec![FakeNode::Element("<i>Italic</i>".to_owned())],
    );
    let (swept, summary) = sweep(&translator, element);
    assert_eq!(swept.markup.as_deref(), Some("<i>Cursiva</i>"));
    assert_eq!(swept.attribute(KEY_ATTRIBUTE).as_deref(), Some(""));
    assert_eq!(summary.translated, 1);
}

#[rstest]
fn element_child_without_safe_marker_is_skipped(translator: Translator) {
    let element = FakeElement::new(
        &[(KEY_ATTRIBUTE, "")],
        vec![FakeNode::Element("<i>Italic</i>".to_owned())],
    );
    let (swept, summary) = sweep(&translator, element);
    assert!(!swept.has_attribute(KEY_ATTRIBUTE));
    assert_eq!(swept.markup, None);
    assert_eq!(summary.translated, 0);
    assert_eq!(summary.warnings.len(), 1);
}

#[rstest]
#[case::no_children(vec![])]
#[case::mixed_children(vec![text("Hello "), FakeNode::Element("<b>you</b>".to_owned())])]
fn ambiguous_children_are_skipped_even_when_safe(
    translator: Translator,
    #[case] children: Vec<FakeNode>,
) {
    let element = FakeElement::new(&[(KEY_ATTRIBUTE, ""), (SAFE_ATTRIBUTE, "")], children);
    let (swept, summary) = sweep(&translator, element);
    assert!(!swept.has_attribute(KEY_ATTRIBUTE));
    assert!(swept.has_attribute(SAFE_ATTRIBUTE));
    assert_eq!(swept.markup, None);
    assert_eq!(summary.warnings.len(), 1);
}

#[rstest]
fn unmarked_elements_are_untouched(translator: Translator) {
    let mut tree = FakeTree {
        elements: vec![
            FakeElement::new(&[("class", "title")], vec![text("Hello")]),
            FakeElement::new(&[(KEY_ATTRIBUTE, "Hello")], vec![]),
        ],
    };
    let summary = translator.apply_to_markup(&mut tree);
    assert_eq!(summary.translated, 1);
    assert_eq!(tree.elements.first().and_then(|e| e.markup.clone()), None);
}

#[test]
fn escape_markup_covers_every_special_character() {
    assert_eq!(escape_markup("&'`\"<>"), "&amp;&#x27;&#x60;&quot;&lt;&gt;");
    assert_eq!(escape_markup("plain"), "plain");
}
