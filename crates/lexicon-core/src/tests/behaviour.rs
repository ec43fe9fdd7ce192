//! Behaviour-driven tests for the dictionary store.

use std::str::FromStr;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::{DictionaryError, Entry, Scope};

// ---------------------------------------------------------------------------
// Typed wrappers for Gherkin step parameters
// ---------------------------------------------------------------------------

/// A quoted string value from a Gherkin feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QuotedString(String);

impl FromStr for QuotedString {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_matches('"');
        Ok(Self(trimmed.replace("\\\"", "\"")))
    }
}

impl QuotedString {
    fn as_str(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Test world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TestWorld {
    scope: Scope,
    json_output: Option<String>,
    load_result: Option<Result<Scope, DictionaryError>>,
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("an empty dictionary")]
fn given_empty_dictionary(world: &mut TestWorld) {
    world.scope = Scope::new();
}

#[given("a dictionary loaded from {json}")]
fn given_loaded_dictionary(world: &mut TestWorld, json: QuotedString) {
    world.scope = Scope::from_json_str(json.as_str()).expect("valid dictionary");
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("{key} is added as {text}")]
fn when_added(world: &mut TestWorld, key: QuotedString, text: QuotedString) {
    world.scope.add_if_not_exists(key.as_str(), text.as_str());
}

#[when("the dictionary {json} is merged")]
fn when_merged(world: &mut TestWorld, json: QuotedString) {
    let bulk = Scope::from_json_str(json.as_str()).expect("valid dictionary");
    world.scope.merge(bulk);
}

#[when("the dictionary is serialised")]
fn when_serialised(world: &mut TestWorld) {
    world.json_output = Some(serde_json::to_string(&world.scope).expect("serialise"));
}

#[when("the dictionary {json} is loaded")]
fn when_loaded(world: &mut TestWorld, json: QuotedString) {
    world.load_result = Some(Scope::from_json_str(json.as_str()));
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("{key} translates to {text}")]
fn then_translates_to(world: &mut TestWorld, key: QuotedString, text: QuotedString) {
    let stored = world
        .scope
        .entry(key.as_str())
        .and_then(Entry::as_simple_text);
    assert_eq!(stored, Some(text.as_str()));
}

#[then("the dictionary has {count} overlays")]
fn then_overlay_count(world: &mut TestWorld, count: usize) {
    assert_eq!(world.scope.overlays().len(), count);
}

#[then("the JSON is {expected}")]
fn then_json_is(world: &mut TestWorld, expected: QuotedString) {
    let json = world.json_output.as_deref().expect("JSON should be set");
    assert_eq!(json, expected.as_str());
}

#[then("loading fails mentioning {snippet}")]
fn then_loading_fails(world: &mut TestWorld, snippet: QuotedString) {
    let result = world.load_result.take().expect("load should have run");
    let error = result.expect_err("document is malformed");
    let message = error.to_string();
    assert!(
        message.contains(snippet.as_str()),
        "expected '{}' in '{message}'",
        snippet.as_str()
    );
}

// ---------------------------------------------------------------------------
// Scenario registration
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/dictionary.feature",
    name = "Extraction keeps the first translation of a key"
)]
fn first_write_wins(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dictionary.feature",
    name = "Merging overwrites values and appends overlays"
)]
fn merge_overwrites(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dictionary.feature",
    name = "Serialised dictionaries omit empty sections"
)]
fn serialised_output(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dictionary.feature",
    name = "Malformed dictionaries name the offending key"
)]
fn malformed_dictionary(world: TestWorld) {
    let _ = world;
}
