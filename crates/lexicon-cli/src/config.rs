//! Configuration loading helpers for the `lexicon` CLI.
//!
//! Leading configuration flags are split from the command tokens so
//! `ortho_config` only sees the flags it understands while clap parses the
//! rest.

use std::ffi::{OsStr, OsString};

use lexicon_config::Config;
use ortho_config::OrthoConfig;

use crate::AppError;

pub(crate) trait ConfigLoader {
    /// Loads configuration for the CLI.
    ///
    /// Configuration flags (listed in `CONFIG_CLI_FLAGS`) must appear before
    /// the subcommand; later occurrences belong to the subcommand.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

#[derive(Debug, Clone, Copy)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

impl OrthoConfigLoader {
    fn process_config_flag(argument: &OsStr) -> FlagAction {
        let lossy = argument.to_string_lossy();
        let text: &str = &lossy;
        if !text.starts_with("--") {
            return FlagAction::Skip;
        }

        let (flag, has_inline_value) = text
            .split_once('=')
            .map_or((text, false), |(name, _)| (name, true));

        if super::CONFIG_CLI_FLAGS.contains(&flag) {
            return FlagAction::Include {
                needs_value: !has_inline_value,
            };
        }

        FlagAction::Skip
    }
}

pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_start: usize,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    };

    let mut config_arguments = vec![program.clone()];
    let mut pending_value = false;

    for argument in rest {
        if pending_value {
            config_arguments.push(argument.clone());
            pending_value = false;
            continue;
        }

        match OrthoConfigLoader::process_config_flag(argument.as_os_str()) {
            FlagAction::Include { needs_value } => {
                config_arguments.push(argument.clone());
                pending_value = needs_value;
            }
            FlagAction::Skip => break,
        }
    }

    let command_start = config_arguments.len();
    ConfigArgumentSplit {
        config_arguments,
        command_start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn os_args(values: &[&str]) -> Vec<OsString> {
        values.iter().map(OsString::from).collect()
    }

    #[test]
    fn inline_value_flags_do_not_need_follow_up_value() {
        let result = OrthoConfigLoader::process_config_flag(OsStr::new("--log-filter=debug"));
        assert!(matches!(result, FlagAction::Include { needs_value: false }));
    }

    #[test]
    fn separate_value_flags_consume_following_argument() {
        let result = OrthoConfigLoader::process_config_flag(OsStr::new("--language"));
        assert!(matches!(result, FlagAction::Include { needs_value: true }));
    }

    #[test]
    fn non_flag_arguments_signal_stop() {
        let result = OrthoConfigLoader::process_config_flag(OsStr::new("translate"));
        assert!(matches!(result, FlagAction::Skip), "should skip");
    }

    #[test]
    fn unknown_flags_are_skipped() {
        let result = OrthoConfigLoader::process_config_flag(OsStr::new("--count"));
        assert!(matches!(result, FlagAction::Skip), "should skip");
    }

    #[test]
    fn leading_flags_are_split_from_the_command() {
        let args = os_args(&[
            "lexicon",
            "--language",
            "fr",
            "--log-format=json",
            "translate",
            "--dictionary",
            "fr.json",
            "Hello",
        ]);
        let split = split_config_arguments(&args);
        assert_eq!(
            split.config_arguments,
            os_args(&["lexicon", "--language", "fr", "--log-format=json"])
        );
        assert_eq!(split.command_start, 4);
    }

    #[test]
    fn loader_reads_split_configuration_flags() {
        let args = os_args(&["lexicon", "--language", "fr", "check", "fr.json"]);
        let split = split_config_arguments(&args);
        let config = OrthoConfigLoader
            .load(&split.config_arguments)
            .expect("configuration flags are valid");
        assert_eq!(config.language(), Some("fr"));
    }

    #[test]
    fn empty_arguments_split_to_nothing() {
        let split = split_config_arguments(&[]);
        assert!(split.config_arguments.is_empty());
        assert_eq!(split.command_start, 0);
    }
}
