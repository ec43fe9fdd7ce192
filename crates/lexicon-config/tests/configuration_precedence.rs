//! Behaviour tests for layered configuration loading.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use ortho_config::OrthoConfig;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use lexicon_config::{Config, default_log_filter, default_log_format};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

struct Harness {
    temp_dir: TempDir,
    cli_args: RefCell<Vec<OsString>>,
    env_overrides: RefCell<Vec<(String, Option<OsString>)>>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
    _guard: MutexGuard<'static, ()>,
}

impl Harness {
    fn new() -> Self {
        let guard = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let temp_dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create temporary directory: {error}"),
        };
        Self {
            temp_dir,
            cli_args: RefCell::new(vec![OsString::from("lexicon")]),
            env_overrides: RefCell::new(Vec::new()),
            loaded: RefCell::new(None),
            error: RefCell::new(None),
            _guard: guard,
        }
    }

    fn write_config(&self, body: &str) {
        let path = self.temp_dir.path().join("lexicon.toml");
        if let Err(error) = fs::write(&path, body) {
            panic!("failed to write configuration: {error}");
        }
        let mut args = self.cli_args.borrow_mut();
        args.push(OsString::from("--config-path"));
        args.push(path.into_os_string());
    }

    fn set_env(&self, key: &str, value: &str) {
        let previous = std::env::var_os(key);
        // Environment mutation is `unsafe` in edition 2024; `Drop` restores
        // every override and the mutex serialises harnesses.
        unsafe { std::env::set_var(key, value) };
        self.env_overrides
            .borrow_mut()
            .push((key.to_owned(), previous));
    }

    fn push_cli_arg(&self, arg: impl Into<OsString>) {
        self.cli_args.borrow_mut().push(arg.into());
    }

    fn load(&self) {
        if self.loaded.borrow().is_some() || self.error.borrow().is_some() {
            return;
        }
        let args = self.cli_args.borrow().clone();
        match Config::load_from_iter(args) {
            Ok(config) => *self.loaded.borrow_mut() = Some(config),
            Err(error) => *self.error.borrow_mut() = Some(error.to_string()),
        }
    }

    fn config(&self) -> Config {
        self.load();
        if let Some(error) = self.error.borrow().as_ref() {
            panic!("configuration failed to load: {error}");
        }
        match self.loaded.borrow().as_ref() {
            Some(config) => config.clone(),
            None => panic!("configuration was not loaded"),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let mut overrides = self.env_overrides.borrow_mut();
        while let Some((key, value)) = overrides.pop() {
            match value {
                Some(previous) => unsafe { std::env::set_var(&key, previous) },
                None => unsafe { std::env::remove_var(&key) },
            }
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[given("a configuration file setting the log filter to \"{filter}\"")]
fn given_configuration_file(harness: &Harness, filter: String) {
    harness.write_config(&format!("log_filter = \"{filter}\"\n"));
}

#[given("the environment overrides the log filter to \"{filter}\"")]
fn given_environment_override(harness: &Harness, filter: String) {
    harness.set_env("LEXICON_LOG_FILTER", &filter);
}

#[when("the CLI sets the log filter to \"{filter}\"")]
fn when_cli_override(harness: &Harness, filter: String) {
    harness.push_cli_arg("--log-filter");
    harness.push_cli_arg(OsString::from(&filter));
}

#[when("the configuration loads without overrides")]
fn when_load_without_overrides(harness: &Harness) {
    harness.load();
}

#[then("loading the configuration resolves the log filter to \"{filter}\"")]
fn then_resolved_filter(harness: &Harness, filter: String) {
    assert_eq!(harness.config().log_filter(), filter);
}

#[then("loading the configuration applies the built-in defaults")]
fn then_defaults_applied(harness: &Harness) {
    let config = harness.config();
    assert_eq!(config.log_filter(), default_log_filter());
    assert_eq!(config.log_format(), default_log_format());
    assert_eq!(config.dictionary(), None);
    assert_eq!(config.language(), None);
}

#[scenario(path = "tests/features/configuration_precedence.feature")]
fn configuration_precedence(#[from(harness)] harness: Harness) {
    let _ = harness;
}
