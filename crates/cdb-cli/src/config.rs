//! # Validator Configuration
//!
//! Settings that are not naming rules: where the reference data lives and
//! which hierarchies a plain `cdbc check` runs.
//!
//! Resolution order, later wins:
//!
//! 1. Built-in defaults (`reference/`, every hierarchy).
//! 2. A YAML file given with `--config`.
//! 3. The `CDBC_REFERENCE_DIR` environment variable.
//! 4. Explicit command-line flags (applied by the subcommand handlers).
//!
//! ```yaml
//! reference_dir: ../reference
//! hierarchies: [gtmodel]
//! ```
//!
//! A relative `reference_dir` in a config file is taken relative to the
//! file's own directory.

use std::path::{Path, PathBuf};

use cdb_structure::Hierarchy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding [`ValidatorConfig::reference_dir`].
pub const REFERENCE_DIR_ENV: &str = "CDBC_REFERENCE_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Directory of YAML reference documents.
    pub reference_dir: PathBuf,
    /// Hierarchies checked when `--hierarchy` is not given.
    pub hierarchies: Vec<Hierarchy>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            reference_dir: PathBuf::from("reference"),
            hierarchies: Hierarchy::all().to_vec(),
        }
    }
}

impl ValidatorConfig {
    /// Defaults, then `file` if given, then the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn resolve(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env(std::env::var(REFERENCE_DIR_ENV).ok());
        Ok(config)
    }

    /// Read a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] or [`ConfigError::Parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(path, &content)?;
        if config.reference_dir.is_relative() {
            if let Some(base) = path.parent() {
                config.reference_dir = base.join(&config.reference_dir);
            }
        }
        Ok(config)
    }

    /// Parse config text. `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML or unknown keys,
    /// and [`ConfigError::NoHierarchies`] for an explicitly empty list.
    pub fn from_yaml(origin: &Path, content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
        if config.hierarchies.is_empty() {
            return Err(ConfigError::NoHierarchies(origin.to_path_buf()));
        }
        Ok(config)
    }

    /// Apply the value of [`REFERENCE_DIR_ENV`], if set and non-empty.
    pub fn apply_env(&mut self, reference_dir: Option<String>) {
        if let Some(dir) = reference_dir.filter(|d| !d.is_empty()) {
            tracing::debug!(reference_dir = %dir, "reference directory from environment");
            self.reference_dir = PathBuf::from(dir);
        }
    }
}

/// The configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("config file '{}' enables no hierarchies", .0.display())]
    NoHierarchies(PathBuf),
}
