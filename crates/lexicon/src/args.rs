//! Positional arguments for callers migrating from the variadic form.
//!
//! The positional form is `key, a1?, a2?, a3?, a4?` where each trailing slot
//! is interpreted from its shape.  The first trailing argument decides the
//! layout:
//!
//! | first        | layout                                             |
//! |--------------|----------------------------------------------------|
//! | map          | placeholders, context                              |
//! | count        | count, placeholders, context                       |
//! | text, absent | default, count, placeholders, context (count only  |
//! |              | when the second argument is a count)               |
//!
//! [`Arg::Absent`] is accepted in every slot.

use std::collections::{BTreeMap, HashMap};

use lexicon_core::Context;
use thiserror::Error;

use crate::options::TranslateOptions;

/// Largest number of arguments that may follow the key.
pub const MAX_TRAILING_ARGS: usize = 4;

/// One positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// A string, read as default text.
    Text(String),
    /// A number, read as the count.
    Count(i64),
    /// A mapping, read as placeholders or context depending on position.
    Map(BTreeMap<String, String>),
    /// An explicitly skipped argument.
    Absent,
}

impl Arg {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Count(_) => "count",
            Self::Map(_) => "map",
            Self::Absent => "absent",
        }
    }
}

impl From<&str> for Arg {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Arg {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<i64> for Arg {
    fn from(count: i64) -> Self {
        Self::Count(count)
    }
}

impl From<i32> for Arg {
    fn from(count: i32) -> Self {
        Self::Count(i64::from(count))
    }
}

impl From<u32> for Arg {
    fn from(count: u32) -> Self {
        Self::Count(i64::from(count))
    }
}

impl From<BTreeMap<String, String>> for Arg {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self::Map(map)
    }
}

impl<S: std::hash::BuildHasher> From<HashMap<String, String, S>> for Arg {
    fn from(map: HashMap<String, String, S>) -> Self {
        Self::Map(map.into_iter().collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// A positional argument does not fit the slot it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// More arguments than slots were supplied.
    #[error("at most {max} arguments may follow the key, got {found}")]
    TooMany {
        /// Largest accepted number.
        max: usize,
        /// Number supplied.
        found: usize,
    },

    /// An argument has the wrong shape for its slot.
    #[error("argument {position} should be {expected}, but got {found}")]
    WrongShape {
        /// One-based position after the key.
        position: usize,
        /// What the slot accepts.
        expected: &'static str,
        /// What was supplied.
        found: &'static str,
    },
}

#[derive(Clone, Copy)]
enum Slot {
    Default,
    Count,
    Placeholders,
    Context,
}

impl Slot {
    const fn expected(self) -> &'static str {
        match self {
            Self::Default => "text",
            Self::Count => "a count",
            Self::Placeholders => "a placeholder map",
            Self::Context => "a context map",
        }
    }
}

impl TranslateOptions {
    /// Interprets positional arguments the way the variadic call did.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] when more than four arguments are given or
    /// an argument has the wrong shape for the slot it lands in.
    ///
    /// # Example
    ///
    /// ```
    /// use lexicon::{Arg, TranslateOptions};
    ///
    /// let options = TranslateOptions::from_args(&[Arg::from("No items"), Arg::from(2_i64)])
    ///     .expect("valid arguments");
    /// assert_eq!(options.default_text(), Some("No items"));
    /// assert_eq!(options.count(), Some(2));
    /// ```
    pub fn from_args(args: &[Arg]) -> Result<Self, ArgumentError> {
        if args.len() > MAX_TRAILING_ARGS {
            return Err(ArgumentError::TooMany {
                max: MAX_TRAILING_ARGS,
                found: args.len(),
            });
        }
        let layout: &[Slot] = match args {
            [] => &[],
            [Arg::Map(_), ..] => &[Slot::Placeholders, Slot::Context],
            [Arg::Count(_), ..] => &[Slot::Count, Slot::Placeholders, Slot::Context],
            [_, Arg::Count(_), ..] => &[
                Slot::Default,
                Slot::Count,
                Slot::Placeholders,
                Slot::Context,
            ],
            [..] => &[Slot::Default, Slot::Placeholders, Slot::Context],
        };

        let mut options = Self::new();
        for (index, arg) in args.iter().enumerate() {
            let position = index + 1;
            let Some(slot) = layout.get(index).copied() else {
                if matches!(arg, Arg::Absent) {
                    continue;
                }
                return Err(ArgumentError::WrongShape {
                    position,
                    expected: "absent",
                    found: arg.kind(),
                });
            };
            options = options.fill(slot, arg, position)?;
        }
        Ok(options)
    }

    fn fill(self, slot: Slot, arg: &Arg, position: usize) -> Result<Self, ArgumentError> {
        match (slot, arg) {
            (_, Arg::Absent) => Ok(self),
            (Slot::Default, Arg::Text(text)) => Ok(self.with_default(text.as_str())),
            (Slot::Count, Arg::Count(count)) => Ok(self.with_count(*count)),
            (Slot::Placeholders, Arg::Map(map)) => Ok(self.with_placeholders(map.clone())),
            (Slot::Context, Arg::Map(map)) => Ok(self.with_context(
                map.iter()
                    .map(|(key, value)| (key.as_str(), value.as_str()))
                    .collect::<Context>(),
            )),
            _ => Err(ArgumentError::WrongShape {
                position,
                expected: slot.expected(),
                found: arg.kind(),
            }),
        }
    }
}
