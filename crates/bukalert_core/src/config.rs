//! Host-supplied core configuration.
//!
//! # Responsibility
//! - Parse the JSON config a host hands to core.
//! - Validate logging settings before they reach `init_logging`.
//!
//! # Invariants
//! - A validated config has a supported `log_level`.
//! - `log_dir`, when set, is absolute.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging, normalize_level, normalize_log_dir};
use rusqlite::Connection;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Core settings.
///
/// Every field is optional in JSON; missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Bookmark database file. `None` keeps bookmarks in memory.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Absolute log directory. `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Normalizes `log_level` and checks `log_dir`.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.log_level = normalize_level(&self.log_level)
            .map_err(ConfigError::Invalid)?
            .to_string();
        if let Some(dir) = &self.log_dir {
            normalize_log_dir(&dir.to_string_lossy()).map_err(ConfigError::Invalid)?;
        }
        Ok(())
    }

    /// Starts file logging when `log_dir` is configured.
    ///
    /// Returns whether logging was started (or already running).
    pub fn init_logging(&self) -> Result<bool, ConfigError> {
        let Some(dir) = &self.log_dir else {
            return Ok(false);
        };
        init_logging(&self.log_level, &dir.to_string_lossy()).map_err(ConfigError::Invalid)?;
        Ok(true)
    }

    /// Opens the configured bookmark database.
    pub fn open_db(&self) -> DbResult<Connection> {
        match &self.db_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}
