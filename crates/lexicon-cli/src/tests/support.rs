//! Shared helpers for CLI runtime tests.

use std::ffi::OsString;
use std::fs;
use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use lexicon::FixedLocales;
use lexicon_config::Config;
use tempfile::TempDir;

use crate::{AppError, CliRunner, ConfigLoader, IoStreams};

/// Dictionary exercising plural ranges and a context overlay.
pub(super) const PHOTOS: &str = r#"{
    "values": {
        "%n comments": [[0, 0, "%n comments"], [1, 1, "%n comment"], [2, null, "%n comments"]],
        "Hello": "Hallo"
    },
    "contexts": [
        {
            "matches": { "gender": "female" },
            "values": { "their": "her" }
        }
    ]
}"#;

/// Loader returning a fixed configuration, ignoring the arguments.
pub(super) struct FixedLoader(pub(super) Config);

impl ConfigLoader for FixedLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.0.clone())
    }
}

/// Captured outcome of one CLI invocation.
pub(super) struct Outcome {
    pub(super) exit: ExitCode,
    pub(super) stdout: String,
    pub(super) stderr: String,
}

/// Temporary workspace holding dictionaries and the preference file.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
    locales: FixedLocales,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
        Self {
            _dir: dir,
            root,
            locales: FixedLocales::new(["en-US"]),
        }
    }

    pub(super) fn with_locales(mut self, locales: &[&str]) -> Self {
        self.locales = FixedLocales::new(locales.iter().copied());
        self
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write(&self, name: &str, content: &str) -> Utf8PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("write fixture");
        path
    }

    pub(super) fn read(&self, path: &Utf8Path) -> String {
        fs::read_to_string(path).expect("read output")
    }

    pub(super) fn config(&self) -> Config {
        Config {
            preferences_path: self.path("preferences.json"),
            log_filter: "off".to_owned(),
            ..Config::default()
        }
    }

    pub(super) fn run(&self, config: Config, args: &[&str]) -> Outcome {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let exit = {
            let mut io = IoStreams::new(&mut stdout, &mut stderr);
            let loader = FixedLoader(config);
            let arguments = std::iter::once("lexicon")
                .chain(args.iter().copied())
                .map(OsString::from);
            CliRunner::new(&mut io, &loader, &self.locales).run(arguments)
        };
        Outcome {
            exit,
            stdout: String::from_utf8(stdout).expect("utf-8 stdout"),
            stderr: String::from_utf8(stderr).expect("utf-8 stderr"),
        }
    }
}
