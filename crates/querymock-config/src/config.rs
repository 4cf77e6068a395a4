// crates/querymock-config/src/config.rs
// ============================================================================
// Module: Query Mock Configuration
// Description: Configuration loading and validation for Query Mock.
// Purpose: Provide strict config parsing with hard limits.
// Dependencies: querymock-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size limits. Unknown
//! keys, oversized files, and invalid combinations fail the load instead of
//! being silently ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use querymock_core::Catcher;
use querymock_core::LogSink;
use querymock_core::MockSpec;
use querymock_core::NoopLogSink;
use querymock_core::StderrLogSink;
use querymock_core::WriterLogSink;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "querymock.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "QUERYMOCK_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum number of mocks in one file.
pub const MAX_MOCKS: usize = 4096;
/// Maximum length of a mock pattern in bytes.
pub const MAX_PATTERN_LENGTH: usize = 64 * 1024;

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Query Mock configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryMockConfig {
    /// Catcher toggles.
    #[serde(default)]
    pub catcher: CatcherConfig,
    /// Resolution log destination.
    #[serde(default)]
    pub log: LogConfig,
    /// Mocks attached on build.
    #[serde(default)]
    pub mocks: Vec<MockSpec>,
}

impl QueryMockConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path);
        let content = read_config_text(&resolved)?;
        let config: Self =
            toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.log.validate()?;
        validate_mocks(&self.mocks)
    }

    /// Builds a catcher with the configured toggles, sink, and mocks.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the log file cannot be opened.
    pub fn build_catcher(&self) -> Result<Catcher, ConfigError> {
        let catcher = Catcher::new();
        catcher.set_logging(self.catcher.logging);
        catcher.set_panic_on_no_match(self.catcher.panic_on_no_match);
        catcher.set_log_sink(self.log.build_sink()?);
        catcher.attach(self.mocks.iter().cloned());
        Ok(catcher)
    }
}

/// Catcher toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatcherConfig {
    /// Emit one log event per resolution.
    #[serde(default)]
    pub logging: bool,
    /// Fail resolutions that match no mock.
    #[serde(default)]
    pub panic_on_no_match: bool,
}

/// Log sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to `log.path`.
    File,
    /// Events are dropped.
    None,
}

/// Resolution log configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Sink kind.
    #[serde(default)]
    pub sink: LogSinkKind,
    /// Log file path for the file sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl LogConfig {
    /// Validates sink configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.sink == LogSinkKind::File && self.path.is_none() {
            return Err(ConfigError::Invalid(
                "log.path is required when log.sink is file".to_string(),
            ));
        }
        Ok(())
    }

    /// Creates the configured sink.
    fn build_sink(&self) -> Result<Arc<dyn LogSink>, ConfigError> {
        match (self.sink, &self.path) {
            (LogSinkKind::Stderr, _) => Ok(Arc::new(StderrLogSink)),
            (LogSinkKind::None, _) => Ok(Arc::new(NoopLogSink)),
            (LogSinkKind::File, Some(path)) => {
                let sink =
                    WriterLogSink::open(path).map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
            (LogSinkKind::File, None) => Err(ConfigError::Invalid(
                "log.path is required when log.sink is file".to_string(),
            )),
        }
    }
}

/// Fixture file holding only mocks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureFile {
    /// Fixture mocks.
    #[serde(default)]
    mocks: Vec<MockSpec>,
}

/// Loads a fixture file containing only `[[mocks]]` tables.
///
/// # Errors
///
/// Returns [`ConfigError`] when reading, parsing, or validation fails.
pub fn load_fixtures(path: &Path) -> Result<Vec<MockSpec>, ConfigError> {
    let content = read_config_text(path)?;
    let fixtures: FixtureFile =
        toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))?;
    validate_mocks(&fixtures.mocks)?;
    Ok(fixtures.mocks)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the argument or environment defaults.
fn resolve_path(path: Option<&Path>) -> PathBuf {
    if let Some(path) = path {
        return path.to_path_buf();
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(env_path);
    }
    PathBuf::from(DEFAULT_CONFIG_NAME)
}

/// Reads a config file as UTF-8 text within the size limit.
fn read_config_text(path: &Path) -> Result<String, ConfigError> {
    let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
    if bytes.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
    }
    String::from_utf8(bytes)
        .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))
}

/// Validates mock count and pattern sizes.
fn validate_mocks(mocks: &[MockSpec]) -> Result<(), ConfigError> {
    if mocks.len() > MAX_MOCKS {
        return Err(ConfigError::Invalid(format!("mocks exceeds max count of {MAX_MOCKS}")));
    }
    for (index, mock) in mocks.iter().enumerate() {
        if mock.pattern.len() > MAX_PATTERN_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "mocks[{index}].pattern exceeds {MAX_PATTERN_LENGTH} bytes"
            )));
        }
    }
    Ok(())
}
