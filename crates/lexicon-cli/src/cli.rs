//! CLI argument definitions for the `lexicon` tool.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Command-line interface for the `lexicon` translation tool.
#[derive(Parser, Debug)]
#[command(
    name = "lexicon",
    version,
    about = "Translate keys and maintain lexicon JSON dictionaries",
    disable_help_subcommand = true
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Structured subcommands for the `lexicon` tool.
#[derive(Subcommand, Debug)]
pub(crate) enum CliCommand {
    /// Translates one key against a dictionary.
    Translate(TranslateArgs),
    /// Merges dictionaries in order into a single file.
    Merge {
        /// Dictionaries to merge; later files overwrite earlier values.
        #[arg(value_name = "INPUT", required = true, num_args = 1..)]
        inputs: Vec<Utf8PathBuf>,
        /// File receiving the merged dictionary.
        #[arg(long, short)]
        output: Utf8PathBuf,
    },
    /// Validates a dictionary and summarises its content.
    Check {
        /// Dictionary to validate.
        #[arg(value_name = "PATH")]
        path: Utf8PathBuf,
    },
    /// Chooses or stores the preferred language.
    Language {
        /// The language action to perform.
        #[command(subcommand)]
        action: LanguageAction,
    },
}

/// Options of the `translate` command.
#[derive(Args, Debug)]
pub(crate) struct TranslateArgs {
    /// Key to translate.
    #[arg(value_name = "KEY")]
    pub(crate) key: String,
    /// Dictionary file; defaults to the configured dictionary.
    #[arg(long)]
    pub(crate) dictionary: Option<Utf8PathBuf>,
    /// Text used when the key is missing.
    #[arg(long = "default", value_name = "TEXT")]
    pub(crate) default_text: Option<String>,
    /// Count selecting the pluralisation range.
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) count: Option<i64>,
    /// Placeholder value for `%{NAME}`.
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_pair)]
    pub(crate) placeholders: Vec<(String, String)>,
    /// Context dimension used to pick an overlay.
    #[arg(long = "context", value_name = "DIM=VALUE", value_parser = parse_pair)]
    pub(crate) context: Vec<(String, String)>,
}

/// Language preference actions.
#[derive(Subcommand, Debug)]
pub(crate) enum LanguageAction {
    /// Prints the stored or negotiated language among the supported ones.
    Select {
        /// Languages offered by the caller, most preferred first.
        #[arg(value_name = "SUPPORTED", required = true, num_args = 1..)]
        supported: Vec<String>,
    },
    /// Stores the preferred language.
    Set {
        /// Language tag to store.
        #[arg(value_name = "LANG")]
        language: String,
    },
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))
}
