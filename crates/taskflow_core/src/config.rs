//! File-based configuration.
//!
//! # Responsibility
//! - Parse `config.toml` into typed settings.
//! - Resolve platform default locations for the database and logs.
//!
//! # Invariants
//! - A missing config file yields defaults, not an error.
//! - Unknown keys are rejected so typos surface early.

use crate::logging::{default_log_level, LogLevel};
use crate::service::defaults::SessionOptions;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "taskflow";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "taskflow.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Platform exposes no data directory and none was configured.
    NoDataDir,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::NoDataDir => write!(f, "no data directory available; set storage.db_path"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::NoDataDir => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: Option<LogLevel>,
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub sample_tasks: bool,
}

impl AppConfig {
    /// Loads from `path`, or from the platform config location when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(raw) => Self::parse(&raw).map_err(|source| ConfigError::Parse { path, source }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn db_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.storage.db_path {
            return Ok(path.clone());
        }
        app_data_dir()
            .map(|dir| dir.join(DB_FILE_NAME))
            .ok_or(ConfigError::NoDataDir)
    }

    pub fn log_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.logging.dir {
            return Ok(dir.clone());
        }
        app_data_dir()
            .map(|dir| dir.join(LOG_DIR_NAME))
            .ok_or(ConfigError::NoDataDir)
    }

    pub fn log_level(&self) -> LogLevel {
        self.logging.level.unwrap_or_else(default_log_level)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            sample_tasks: self.session.sample_tasks,
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn app_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME))
}
