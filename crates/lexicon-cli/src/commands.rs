//! Execution of parsed subcommands.

use std::io::Write;
use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use lexicon::{
    FilePreferenceStore, LanguageSelector, LocaleSource, Scope, TranslateOptions, Translator,
    set_language,
};
use lexicon_config::Config;
use tracing::debug;

use crate::AppError;
use crate::cli::{CliCommand, LanguageAction, TranslateArgs};
use crate::messages::{Messages, keys};

/// Everything a command needs besides its own arguments.
pub(crate) struct CommandContext<'a> {
    pub(crate) config: &'a Config,
    pub(crate) messages: &'a Messages,
    pub(crate) locales: &'a dyn LocaleSource,
}

pub(crate) fn execute<W: Write>(
    command: CliCommand,
    context: &CommandContext<'_>,
    stdout: &mut W,
) -> Result<ExitCode, AppError> {
    let line = match command {
        CliCommand::Translate(args) => translate(args, context.config)?,
        CliCommand::Merge { inputs, output } => merge(&inputs, &output, context.messages)?,
        CliCommand::Check { path } => check(&path, context.messages)?,
        CliCommand::Language { action } => language(&action, context)?,
    };
    writeln!(stdout, "{line}").map_err(AppError::Output)?;
    Ok(ExitCode::SUCCESS)
}

fn translate(args: TranslateArgs, config: &Config) -> Result<String, AppError> {
    let path = args
        .dictionary
        .as_deref()
        .or_else(|| config.dictionary())
        .ok_or(AppError::MissingDictionary)?;
    let translator = Translator::create(Some(Scope::load_file(path)?));

    let mut options = TranslateOptions::new().with_placeholders(args.placeholders);
    if let Some(text) = args.default_text {
        options = options.with_default(text);
    }
    if let Some(count) = args.count {
        options = options.with_count(count);
    }
    if !args.context.is_empty() {
        options = options.with_context(args.context.into_iter().collect());
    }
    Ok(translator.translate(&args.key, &options))
}

fn merge(
    inputs: &[Utf8PathBuf],
    output: &Utf8Path,
    messages: &Messages,
) -> Result<String, AppError> {
    // Every input is parsed before the output is touched.
    let mut merged = Scope::new();
    for input in inputs {
        merged.merge(Scope::load_file(input)?);
    }
    merged.save_file(output)?;

    let count = i64::try_from(inputs.len()).unwrap_or(i64::MAX);
    let options = TranslateOptions::new()
        .with_count(count)
        .with_placeholder("path", output.as_str());
    Ok(messages.translate(keys::MERGED, &options))
}

fn check(path: &Utf8Path, messages: &Messages) -> Result<String, AppError> {
    let scope = Scope::load_file(path)?;
    let key_count = i64::try_from(scope.len()).unwrap_or(i64::MAX);
    let options = TranslateOptions::new()
        .with_count(key_count)
        .with_placeholder("path", path.as_str())
        .with_placeholder("overlays", scope.overlays().len().to_string());
    Ok(messages.translate(keys::CHECKED, &options))
}

fn language(action: &LanguageAction, context: &CommandContext<'_>) -> Result<String, AppError> {
    let path = context.config.preferences_path().to_path_buf();
    match action {
        LanguageAction::Select { supported } => {
            let store = FilePreferenceStore::new(path);
            let chosen = LanguageSelector::new(context.locales)
                .with_store(&store)
                .select(supported.as_slice())?;
            Ok(chosen)
        }
        LanguageAction::Set { language } => {
            let mut store = FilePreferenceStore::new(path);
            set_language(Some(&mut store), language)?;
            debug!(language = %language, path = %store.path(), "stored language preference");
            let options = TranslateOptions::new().with_placeholder("language", language.as_str());
            Ok(context.messages.translate(keys::LANGUAGE_SET, &options))
        }
    }
}
