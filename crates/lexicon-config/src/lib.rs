//! Layered configuration for the `lexicon` command-line tool.
//!
//! Values are merged from built-in defaults, a TOML file (`--config-path` or
//! `LEXICON_CONFIG_PATH`), `LEXICON_*` environment variables, and command
//! line flags, later layers winning.

mod defaults;
mod logging;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, PREFERENCES_FILE_NAME, default_log_filter, default_log_filter_string,
    default_log_format, default_preferences_path,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved configuration for the command-line tool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "LEXICON")]
pub struct Config {
    /// Tracing filter expression, for example `lexicon=debug`.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,

    /// Output format of log lines.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,

    /// Dictionary used when a command does not name one.
    #[serde(default)]
    pub dictionary: Option<Utf8PathBuf>,

    /// File holding the persisted language preference.
    #[serde(default = "default_preferences_path")]
    #[ortho_config(default = default_preferences_path())]
    pub preferences_path: Utf8PathBuf,

    /// Language of the tool's own messages, overriding negotiation.
    #[serde(default)]
    pub language: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            dictionary: None,
            preferences_path: default_preferences_path(),
            language: None,
        }
    }
}

impl Config {
    /// Returns the tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the configured default dictionary.
    #[must_use]
    pub fn dictionary(&self) -> Option<&Utf8Path> {
        self.dictionary.as_deref()
    }

    /// Returns the preference file location.
    #[must_use]
    pub fn preferences_path(&self) -> &Utf8Path {
        &self.preferences_path
    }

    /// Returns the forced message language, if any.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}
