//! Configuration file and environment overrides.
//!
//! # Configuration format
//!
//! ```toml
//! [store]
//! url = "https://example.firebaseio.com/.json"  # remote JSON document
//! timeout_secs = 30
//!
//! [local]
//! db_path = "/var/lib/jobboard/listings.sqlite3" # keyed local store
//!
//! [logging]
//! level = "info"
//! dir = "/var/log/jobboard"
//!
//! [export]
//! file_name = "job_data.xlsx"
//! ```
//!
//! Environment overrides: `JOBBOARD_STORE_URL`, `JOBBOARD_DB_PATH`,
//! `JOBBOARD_LOG_LEVEL`, `JOBBOARD_LOG_DIR`.

use crate::export::EXPORT_FILE_NAME;
use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_STORE_URL: &str = "JOBBOARD_STORE_URL";
pub const ENV_DB_PATH: &str = "JOBBOARD_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "JOBBOARD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "JOBBOARD_LOG_DIR";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    /// Neither a store URL nor a local database path is configured.
    NoBackend,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::NoBackend => write!(
                f,
                "no listing store configured; set store.url or local.db_path"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::NoBackend => None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobBoardConfig {
    pub store: StoreConfig,
    pub local: LocalConfig,
    pub logging: LoggingConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// URL of the remote JSON document.
    pub url: Option<String>,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Absolute directory for rolling log files; logging stays off when unset.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: EXPORT_FILE_NAME.to_string(),
        }
    }
}

/// Listing store selected by configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Remote { url: String, timeout: Duration },
    Local { db_path: PathBuf },
}

impl JobBoardConfig {
    /// Loads `path`, or defaults when no path is given.
    ///
    /// # Errors
    /// - `Io` when an explicitly given file cannot be read, including when
    ///   it does not exist.
    /// - `Parse` for invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(ConfigError::Parse)
    }

    /// Applies `JOBBOARD_*` process environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary key lookup. Blank values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let value_of = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(url) = value_of(ENV_STORE_URL) {
            self.store.url = Some(url);
        }
        if let Some(path) = value_of(ENV_DB_PATH) {
            self.local.db_path = Some(PathBuf::from(path));
        }
        if let Some(level) = value_of(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(dir) = value_of(ENV_LOG_DIR) {
            self.logging.dir = Some(PathBuf::from(dir));
        }
    }

    /// Resolves the listing store. A remote URL takes precedence over a
    /// local database path.
    pub fn backend(&self) -> Result<Backend, ConfigError> {
        let url = self
            .store
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());
        if let Some(url) = url {
            return Ok(Backend::Remote {
                url: url.to_string(),
                timeout: Duration::from_secs(self.store.timeout_secs),
            });
        }
        if let Some(db_path) = &self.local.db_path {
            return Ok(Backend::Local {
                db_path: db_path.clone(),
            });
        }
        Err(ConfigError::NoBackend)
    }
}
