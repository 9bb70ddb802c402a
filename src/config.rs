//! # Configuration Module
//!
//! This module provides configuration support for docauthor, allowing users
//! to tune how authors are collected and how new documentation blocks look.
//!
//! Configuration can be specified in a `.docauthor.toml` file or via the
//! `DOCAUTHOR_CONFIG` environment variable.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::git::DEFAULT_BLAME_TIMEOUT;
use crate::handlers::HandlerOptions;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".docauthor.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "DOCAUTHOR_CONFIG";

/// Main configuration struct for docauthor.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// Upper bound in seconds for a single `git blame` run.
  #[serde(default, rename = "blame-timeout-secs")]
  pub blame_timeout_secs: Option<u64>,

  /// Word in front of the type name in a synthesized summary line
  /// (default `Class`).
  #[serde(default, rename = "summary-prefix")]
  pub summary_prefix: Option<String>,

  /// Glob patterns of files to skip, matched against the path below the
  /// scanned directory.
  #[serde(default)]
  pub ignore: Vec<String>,

  /// Author names never written, compared exactly.
  #[serde(default, rename = "ignore-authors")]
  pub ignore_authors: Vec<String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A value is out of range.
  #[error("Invalid value for '{key}': {message}")]
  InvalidValue { key: &'static str, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    Ok(config)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    if self.blame_timeout_secs == Some(0) {
      return Err(ConfigError::InvalidValue {
        key: "blame-timeout-secs",
        message: "must be greater than zero".to_string(),
      });
    }

    if let Some(prefix) = &self.summary_prefix
      && prefix.contains('\n')
    {
      return Err(ConfigError::InvalidValue {
        key: "summary-prefix",
        message: "must be a single line".to_string(),
      });
    }

    for pattern in &self.ignore {
      if let Err(e) = glob::Pattern::new(pattern) {
        return Err(ConfigError::InvalidValue {
          key: "ignore",
          message: format!("invalid glob '{pattern}': {e}"),
        });
      }
    }

    Ok(())
  }

  pub fn blame_timeout(&self) -> Duration {
    self
      .blame_timeout_secs
      .map_or(DEFAULT_BLAME_TIMEOUT, Duration::from_secs)
  }

  pub fn handler_options(&self) -> HandlerOptions {
    let mut options = HandlerOptions::default();
    if let Some(prefix) = &self.summary_prefix {
      options.summary_prefix.clone_from(prefix);
    }
    options
  }

  /// Adds command-line ignore patterns after the configured ones.
  pub fn merge_cli_ignores(&mut self, patterns: Vec<String>) {
    self.ignore.extend(patterns);
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `DOCAUTHOR_CONFIG` environment variable
/// 3. `.docauthor.toml` in the current directory
pub fn discover_config_path(explicit_path: Option<&Path>, current_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let local_config = current_dir.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    verbose_log!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path, or return the defaults.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `current_dir` - Directory searched for `.docauthor.toml`
/// * `no_config` - If true, skip config file discovery and use defaults
pub fn load_config(explicit_path: Option<&Path>, current_dir: &Path, no_config: bool) -> Result<Config> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(Config::default());
  }

  match discover_config_path(explicit_path, current_dir) {
    Some(path) => Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display())),
    None => Ok(Config::default()),
  }
}
