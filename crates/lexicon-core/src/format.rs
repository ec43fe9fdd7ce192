//! JSON dictionary format.
//!
//! ```text
//! {
//!   "values": { "<key>": "<text>" | [[min|null, max|null, "<text>"], ...] },
//!   "contexts": [
//!     { "matches": { "<dim>": "<value>" }, "values": { ... }, "contexts": [ ... ] }
//!   ]
//! }
//! ```
//!
//! Empty `values` maps and empty `contexts` lists are omitted on output at
//! every level.  Input is parsed completely before a [`Scope`] is returned,
//! so a malformed document never yields a partially populated dictionary.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::sync::Arc;

use camino::Utf8Path;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::context::ContextPredicate;
use crate::entry::Entry;
use crate::error::DictionaryError;
use crate::range::PluralRange;
use crate::scope::{ContextOverlay, Scope};

const ROOT_LOCATION: &str = "root values";

#[derive(Serialize)]
struct WireScope<'a> {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    values: BTreeMap<&'a str, WireEntry<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    contexts: Vec<WireOverlay<'a>>,
}

#[derive(Serialize)]
struct WireOverlay<'a> {
    matches: &'a ContextPredicate,
    #[serde(flatten)]
    scope: WireScope<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WireEntry<'a> {
    Text(&'a str),
    Ranges(Vec<(Option<i64>, Option<i64>, &'a str)>),
}

impl<'a> From<&'a Entry> for WireEntry<'a> {
    fn from(entry: &'a Entry) -> Self {
        match entry.ranges() {
            [only] if only.is_unbounded() => Self::Text(only.text()),
            ranges => Self::Ranges(
                ranges
                    .iter()
                    .map(|range| (range.min(), range.max(), range.text()))
                    .collect(),
            ),
        }
    }
}

impl<'a> From<&'a Scope> for WireScope<'a> {
    fn from(scope: &'a Scope) -> Self {
        Self {
            values: scope
                .entries()
                .map(|(key, entry)| (key, WireEntry::from(entry)))
                .collect(),
            contexts: scope
                .overlays()
                .iter()
                .map(|overlay| WireOverlay {
                    matches: overlay.predicate(),
                    scope: WireScope::from(overlay.scope()),
                })
                .collect(),
        }
    }
}

impl Serialize for Scope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireScope::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        parse_scope(&value, ROOT_LOCATION).map_err(serde::de::Error::custom)
    }
}

impl Scope {
    /// Parses a dictionary from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::Parse`] for invalid JSON and a located
    /// error for a document of the wrong shape.
    pub fn from_json_str(text: &str) -> Result<Self, DictionaryError> {
        let value: Value = serde_json::from_str(text).map_err(DictionaryError::Parse)?;
        Self::from_json_value(&value)
    }

    /// Builds a dictionary from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns a located [`DictionaryError`] when the value has the wrong
    /// shape.
    pub fn from_json_value(value: &Value) -> Result<Self, DictionaryError> {
        parse_scope(value, ROOT_LOCATION)
    }

    /// Encodes the dictionary as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::Serialize`] if encoding fails.
    pub fn to_json_value(&self) -> Result<Value, DictionaryError> {
        serde_json::to_value(self).map_err(DictionaryError::Serialize)
    }

    /// Encodes the dictionary as JSON text indented by four spaces.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::Serialize`] if encoding fails.
    pub fn to_json_pretty(&self) -> Result<String, DictionaryError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .map_err(DictionaryError::Serialize)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Reads a dictionary file.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::Read`] when the file cannot be read and a
    /// parse error when its content is malformed.
    pub fn load_file(path: &Utf8Path) -> Result<Self, DictionaryError> {
        let text = fs::read_to_string(path).map_err(|source| DictionaryError::Read {
            path: path.to_path_buf(),
            source: Arc::new(source),
        })?;
        let scope = Self::from_json_str(&text)?;
        debug!(%path, keys = scope.len(), "loaded dictionary");
        Ok(scope)
    }

    /// Writes the dictionary to `path`, replacing any existing file
    /// atomically.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::Write`] when the temporary file cannot be
    /// created, written, or moved into place.
    pub fn save_file(&self, path: &Utf8Path) -> Result<(), DictionaryError> {
        let mut text = self.to_json_pretty()?;
        text.push('\n');
        write_atomically(path, text.as_bytes()).map_err(|source| DictionaryError::Write {
            path: path.to_path_buf(),
            source: Arc::new(source),
        })?;
        debug!(%path, keys = self.len(), "saved dictionary");
        Ok(())
    }
}

fn write_atomically(path: &Utf8Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    fs::create_dir_all(parent)?;
    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.persist(path).map_err(|error| error.error)?;
    Ok(())
}

fn shape(location: &str, message: &str) -> DictionaryError {
    DictionaryError::Shape {
        location: location.to_owned(),
        message: message.to_owned(),
    }
}

fn parse_scope(value: &Value, location: &str) -> Result<Scope, DictionaryError> {
    let object = value
        .as_object()
        .ok_or_else(|| shape(location, "should be a JSON object"))?;
    let mut scope = Scope::new();

    match object.get("values") {
        None | Some(Value::Null) => {}
        Some(Value::Object(values)) => {
            for (key, raw) in values {
                scope.insert(key.as_str(), parse_entry(key, raw, location)?);
            }
        }
        Some(_) => return Err(shape(location, "'values' should be an object")),
    }

    match object.get("contexts") {
        None | Some(Value::Null) => {}
        Some(Value::Array(contexts)) => {
            for (index, raw) in contexts.iter().enumerate() {
                let child = if location == ROOT_LOCATION {
                    format!("context[{index}]")
                } else {
                    format!("{location}.context[{index}]")
                };
                scope.push_overlay(parse_overlay(raw, &child)?);
            }
        }
        Some(_) => return Err(shape(location, "'contexts' should be an array")),
    }

    Ok(scope)
}

fn parse_overlay(value: &Value, location: &str) -> Result<ContextOverlay, DictionaryError> {
    let object = value
        .as_object()
        .ok_or_else(|| shape(location, "should be a JSON object"))?;
    let predicate = match object.get("matches") {
        None | Some(Value::Null) => ContextPredicate::default(),
        Some(Value::Object(matches)) => parse_matches(matches, location)?,
        Some(_) => return Err(shape(location, "'matches' should be an object of strings")),
    };
    Ok(ContextOverlay::new(predicate, parse_scope(value, location)?))
}

fn parse_matches(
    matches: &Map<String, Value>,
    location: &str,
) -> Result<ContextPredicate, DictionaryError> {
    let mut required = BTreeMap::new();
    for (key, raw) in matches {
        let Some(text) = raw.as_str() else {
            return Err(shape(location, "'matches' should be an object of strings"));
        };
        required.insert(key.clone(), text.to_owned());
    }
    Ok(ContextPredicate::new(required))
}

fn parse_entry(key: &str, value: &Value, location: &str) -> Result<Entry, DictionaryError> {
    match value {
        Value::String(text) => Ok(Entry::simple(text.as_str())),
        Value::Array(items) => {
            if items.is_empty() {
                return Err(DictionaryError::EmptyRanges {
                    key: key.to_owned(),
                    location: location.to_owned(),
                });
            }
            let ranges = items
                .iter()
                .enumerate()
                .map(|(index, item)| parse_range(key, index, item, location))
                .collect::<Result<Vec<_>, _>>()?;
            Entry::plural(ranges)
        }
        other => Err(DictionaryError::InvalidValue {
            key: key.to_owned(),
            location: location.to_owned(),
            found: other.to_string(),
        }),
    }
}

fn parse_range(
    key: &str,
    index: usize,
    value: &Value,
    location: &str,
) -> Result<PluralRange, DictionaryError> {
    let Some([min, max, text]) = value.as_array().map(Vec::as_slice).and_then(|items| {
        <&[Value; 3]>::try_from(items).ok()
    }) else {
        return Err(DictionaryError::InvalidRange {
            key: key.to_owned(),
            location: location.to_owned(),
            index,
            found: value.to_string(),
        });
    };
    let lower = parse_bound(key, "lower", min, location)?;
    let upper = parse_bound(key, "upper", max, location)?;
    let Some(translation) = text.as_str() else {
        return Err(DictionaryError::InvalidText {
            key: key.to_owned(),
            location: location.to_owned(),
            found: text.to_string(),
        });
    };
    Ok(PluralRange::new(lower, upper, translation))
}

fn parse_bound(
    key: &str,
    bound: &'static str,
    value: &Value,
    location: &str,
) -> Result<Option<i64>, DictionaryError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => number.as_i64().map(Some).ok_or_else(|| {
            DictionaryError::InvalidBound {
                key: key.to_owned(),
                location: location.to_owned(),
                bound,
                found: value.to_string(),
            }
        }),
        other => Err(DictionaryError::InvalidBound {
            key: key.to_owned(),
            location: location.to_owned(),
            bound,
            found: other.to_string(),
        }),
    }
}
