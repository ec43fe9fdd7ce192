//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use lexicon::{DictionaryError, LanguageError};
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("no dictionary given; pass --dictionary or set LEXICON_DICTIONARY")]
    MissingDictionary,
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
    #[error(transparent)]
    Language(#[from] LanguageError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}
