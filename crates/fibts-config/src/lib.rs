//! Configuration management for fibts.
//!
//! Settings are layered: built-in defaults, then an optional TOML file
//! (`fibts.toml` in the working directory unless a path is given), then
//! `FIBTS_*` environment variables. Command-line flags are applied on top
//! by the CLI.

use std::path::Path;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BASE_FILE_NAME: &str = "Fibonacci_Output";
pub const DEFAULT_CONFIG_FILE: &str = "fibts.toml";
pub const ENV_PREFIX: &str = "FIBTS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Used when the file-name prompt is left blank.
    pub base_file_name: String,
    /// Pause between plain/daytime iterations.
    pub delay_ms: u64,
    /// Pause between scan iterations.
    pub scan_delay_ms: u64,
    /// Lines between explicit flushes in plain/daytime mode.
    pub flush_every: usize,
    pub scan_target: String,
    pub scan_width: usize,
    /// Single key that stops the run (case-insensitive).
    pub stop_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_file_name: DEFAULT_BASE_FILE_NAME.to_string(),
            delay_ms: 200,
            scan_delay_ms: 0,
            flush_every: 10,
            scan_target: "003706".to_string(),
            scan_width: 7,
            stop_key: "s".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from defaults, the config file and the environment.
    ///
    /// An explicit `path` must exist; the implicit `fibts.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };
        let config = defaults()?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Self::from_config(config)
    }

    /// Loads settings from TOML text layered over the defaults.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config = defaults()?
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?;
        Self::from_config(config)
    }

    fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flush_every == 0 {
            return Err(invalid("flush_every", "must be at least 1"));
        }
        if self.scan_target.is_empty() || !self.scan_target.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(
                "scan_target",
                format!("expected decimal digits, got {:?}", self.scan_target),
            ));
        }
        if self.scan_width == 0 {
            return Err(invalid("scan_width", "must be at least 1"));
        }
        let mut key = self.stop_key.chars();
        match (key.next(), key.next()) {
            (Some(c), None) if c.is_alphanumeric() => {}
            _ => {
                return Err(invalid(
                    "stop_key",
                    format!("expected a single letter or digit, got {:?}", self.stop_key),
                ))
            }
        }
        Ok(())
    }

    /// The stop key, lower-cased.
    pub fn stop_key(&self) -> char {
        self.stop_key
            .chars()
            .next()
            .map(|c| c.to_ascii_lowercase())
            .unwrap_or('s')
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn scan_delay(&self) -> Duration {
        Duration::from_millis(self.scan_delay_ms)
    }

    /// The default base name with `~` and `$VARS` expanded.
    pub fn expanded_base_file_name(&self) -> String {
        expand_base_name(&self.base_file_name)
    }
}

/// Expands `~` and environment variables in a base file name, leaving the
/// input untouched when a variable is undefined.
pub fn expand_base_name(base: &str) -> String {
    shellexpand::full(base)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| base.to_string())
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    let d = Settings::default();
    Config::builder()
        .set_default("base_file_name", d.base_file_name)?
        .set_default("delay_ms", d.delay_ms)?
        .set_default("scan_delay_ms", d.scan_delay_ms)?
        .set_default("flush_every", d.flush_every as u64)?
        .set_default("scan_target", d.scan_target)?
        .set_default("scan_width", d.scan_width as u64)?
        .set_default("stop_key", d.stop_key)
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.delay(), Duration::from_millis(200));
        assert_eq!(settings.stop_key(), 's');
    }

    #[test]
    fn test_toml_overrides() {
        let settings = Settings::from_toml(
            r#"
            base_file_name = "runs"
            delay_ms = 5
            flush_every = 25
            scan_target = "42"
            scan_width = 3
            stop_key = "Q"
            "#,
        )
        .unwrap();

        assert_eq!(settings.base_file_name, "runs");
        assert_eq!(settings.delay(), Duration::from_millis(5));
        assert_eq!(settings.flush_every, 25);
        assert_eq!(settings.scan_target, "42");
        assert_eq!(settings.scan_width, 3);
        assert_eq!(settings.stop_key(), 'q');
        // untouched keys keep their defaults
        assert_eq!(settings.scan_delay_ms, 0);
    }

    #[test]
    fn test_zero_flush_interval_rejected() {
        let err = Settings::from_toml("flush_every = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "flush_every", .. }));
    }

    #[test]
    fn test_non_digit_target_rejected() {
        let err = Settings::from_toml(r#"scan_target = "00x7""#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "scan_target", .. }));
        assert!(err.to_string().contains("00x7"));
    }

    #[test]
    fn test_multi_char_stop_key_rejected() {
        let err = Settings::from_toml(r#"stop_key = "stop""#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "stop_key", .. }));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Settings::load(Some(missing.as_path())),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    #[serial]
    fn test_file_then_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fibts.toml");
        std::fs::write(&path, "delay_ms = 50\nflush_every = 5\n").unwrap();

        std::env::set_var("FIBTS_FLUSH_EVERY", "7");
        let settings = Settings::load(Some(path.as_path()));
        std::env::remove_var("FIBTS_FLUSH_EVERY");

        let settings = settings.unwrap();
        assert_eq!(settings.delay_ms, 50);
        assert_eq!(settings.flush_every, 7);
    }

    #[test]
    #[serial]
    fn test_implicit_file_is_fibts_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "flush_every = 5\n").unwrap();
        // An extensionless file of the same stem must not shadow it.
        std::fs::write(dir.path().join("fibts"), "Fibonacci: 1\n").unwrap();

        let cwd = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let settings = Settings::load(None);
        std::env::set_current_dir(cwd).unwrap();

        assert_eq!(settings.unwrap().flush_every, 5);
    }

    #[test]
    #[serial]
    fn test_missing_implicit_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let settings = Settings::load(None);
        std::env::set_current_dir(cwd).unwrap();

        assert_eq!(settings.unwrap(), Settings::default());
    }

    #[test]
    #[serial]
    fn test_expand_base_name() {
        std::env::set_var("FIBTS_TEST_RUN_DIR", "/tmp/fib");
        let expanded = expand_base_name("$FIBTS_TEST_RUN_DIR/out");
        std::env::remove_var("FIBTS_TEST_RUN_DIR");

        assert_eq!(expanded, "/tmp/fib/out");
        assert_eq!(expand_base_name("$FIBTS_SURELY_UNSET_VAR"), "$FIBTS_SURELY_UNSET_VAR");
    }
}
