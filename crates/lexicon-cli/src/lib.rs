//! Command-line runtime for the `lexicon` translation tool.
//!
//! The module owns argument parsing, configuration bootstrapping, telemetry
//! installation, and command dispatch.  Configuration loading, locale
//! discovery, and the output streams can all be substituted in tests.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use lexicon::{LocaleSource, SystemLocales};

mod cli;
mod commands;
mod config;
mod errors;
mod messages;
mod telemetry;

use cli::Cli;
use commands::{CommandContext, execute};
use config::{ConfigArgumentSplit, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;
use messages::Messages;

/// CLI flags recognised by the configuration loader.
///
/// Keep in sync with the fields of `lexicon_config::Config`.
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--dictionary",
    "--preferences-path",
    "--language",
];

/// Bundles the output streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) const fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self { stdout, stderr }
    }
}

struct CliRunner<'a, 'io, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'io, W, E>,
    loader: &'a L,
    locales: &'a dyn LocaleSource,
}

impl<'a, 'io, W, E, L> CliRunner<'a, 'io, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    const fn new(
        io: &'a mut IoStreams<'io, W, E>,
        loader: &'a L,
        locales: &'a dyn LocaleSource,
    ) -> Self {
        Self {
            io,
            loader,
            locales,
        }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let arguments: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&arguments);
        let cli_arguments = prepare_cli_arguments(&arguments, &split);

        let result = Cli::try_parse_from(cli_arguments)
            .map_err(AppError::CliUsage)
            .and_then(|cli| {
                self.loader
                    .load(&split.config_arguments)
                    .map(|config| (cli, config))
            })
            .and_then(|(cli, config)| {
                telemetry::initialise(&config)?;
                let messages = Messages::select(&config, self.locales)?;
                tracing::debug!(language = messages.language(), "selected message language");
                let context = CommandContext {
                    config: &config,
                    messages: &messages,
                    locales: self.locales,
                };
                execute(cli.command, &context, &mut *self.io.stdout)
            });

        match result {
            Ok(exit_code) => exit_code,
            // Help and version requests are not failures.
            Err(AppError::CliUsage(error)) if !error.use_stderr() => {
                write!(self.io.stdout, "{error}").ok();
                ExitCode::SUCCESS
            }
            Err(error) => {
                writeln!(self.io.stderr, "{error}").ok();
                ExitCode::FAILURE
            }
        }
    }
}

/// Runs the CLI using the provided arguments and output streams.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr);
    CliRunner::new(&mut io, &OrthoConfigLoader, &SystemLocales).run(args)
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    args.iter()
        .take(1)
        .chain(args.iter().skip(split.command_start))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests;
