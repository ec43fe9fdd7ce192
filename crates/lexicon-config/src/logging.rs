//! Log line format of the `lexicon` binary.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How the binary renders tracing events on stderr.
///
/// Parsed from `--log-format`, `LEXICON_LOG_FORMAT`, or the `log_format`
/// key of the configuration file; `JSON` and `json` are the same value.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Flattened JSON events, for piping dictionary checks into log tooling.
    Json,
    /// Terse one-line events for a person at the terminal.
    #[default]
    Compact,
}

/// Rejection returned when text names no [`LogFormat`].
pub type LogFormatParseError = strum::ParseError;
