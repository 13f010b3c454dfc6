//! Startup configuration: defaults, then an optional TOML file, then environment overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV: &str = "EMPLOYEE_TRACKER_CONFIG";
pub const DATABASE_ENV: &str = "EMPLOYEE_TRACKER_DB";
pub const DEFAULT_CONFIG_FILE: &str = "employee_tracker.toml";
pub const DEFAULT_DATABASE: &str = "employee_tracker.db";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database: PathBuf,
    pub log_filter: String,
}

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    database: Option<PathBuf>,
    log: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database: PathBuf::from(DEFAULT_DATABASE),
            log_filter: String::from(DEFAULT_LOG_FILTER),
        }
    }
}

impl Config {
    /// Load from the process environment and working directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Same as `load`, reading variables through `env` instead of the process environment.
    pub fn load_from<F>(env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match env(CONFIG_ENV) {
            Some(path) => Some(read_file(Path::new(&path))?),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Some(read_file(fallback)?)
                } else {
                    None
                }
            }
        };

        let mut config = Config::default();
        if let Some(file) = file {
            if let Some(database) = file.database {
                config.database = database;
            }
            if let Some(log) = file.log {
                config.log_filter = log;
            }
        }

        if let Some(database) = env(DATABASE_ENV).filter(|v| !v.trim().is_empty()) {
            config.database = PathBuf::from(database);
        }
        if let Some(filter) = env("RUST_LOG").filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter;
        }

        Ok(config)
    }
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
