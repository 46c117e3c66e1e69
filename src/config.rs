//! Runtime configuration.
//!
//! Resolution order: built-in defaults, then the TOML file, then `GHUS_*`
//! environment variables (a `.env` file is honoured through `dotenvy`), then
//! whatever the CLI overrides on top.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// GitHub user search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/search/users";

/// Idle window before a typed query is committed.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Short enough that a hung request never stalls the screen for long.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_USER_AGENT: &str = concat!("ghus/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Search endpoint; the query goes in the `q` parameter.
    pub endpoint: String,
    pub debounce_ms: u64,
    pub http_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// On-disk shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    endpoint: Option<String>,
    debounce_ms: Option<u64>,
    http_timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

impl Config {
    /// Load defaults, the config file and the environment.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        match path {
            Some(p) => cfg.merge_file(p)?,
            None => {
                if let Some(p) = default_config_path().filter(|p| p.is_file()) {
                    cfg.merge_file(&p)?;
                }
            }
        }
        cfg.merge_env(|key| dotenvy::var(key).ok())?;
        Ok(cfg)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "config file loaded");

        if let Some(v) = file.endpoint {
            self.endpoint = v;
        }
        if let Some(v) = file.debounce_ms {
            self.debounce_ms = v;
        }
        if let Some(v) = file.http_timeout_secs {
            self.http_timeout_secs = v;
        }
        if let Some(v) = file.user_agent {
            self.user_agent = v;
        }
        Ok(())
    }

    /// Apply `GHUS_*` overrides from `lookup`.
    pub fn merge_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("GHUS_ENDPOINT") {
            self.endpoint = v;
        }
        if let Some(v) = lookup("GHUS_DEBOUNCE_MS") {
            self.debounce_ms = parse_u64("GHUS_DEBOUNCE_MS", v)?;
        }
        if let Some(v) = lookup("GHUS_HTTP_TIMEOUT_SECS") {
            self.http_timeout_secs = parse_u64("GHUS_HTTP_TIMEOUT_SECS", v)?;
        }
        if let Some(v) = lookup("GHUS_USER_AGENT") {
            self.user_agent = v;
        }
        Ok(())
    }
}

fn parse_u64(key: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "github-user-search", "ghus")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.toml"))
}

/// Where the TUI writes its log files.
pub fn default_data_dir() -> PathBuf {
    project_dirs().map_or_else(|| PathBuf::from(".ghus"), |d| d.data_dir().to_path_buf())
}
