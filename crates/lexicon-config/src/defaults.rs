use camino::Utf8PathBuf;

use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// File name of the preference store inside the configuration directory.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Location of the language preference file.
///
/// Uses the platform configuration directory when it is known and UTF-8,
/// otherwise the current directory.
#[must_use]
pub fn default_preferences_path() -> Utf8PathBuf {
    let base = dirs::config_dir()
        .and_then(|path| Utf8PathBuf::from_path_buf(path).ok())
        .map_or_else(|| Utf8PathBuf::from("."), |dir| dir.join("lexicon"));
    base.join(PREFERENCES_FILE_NAME)
}
