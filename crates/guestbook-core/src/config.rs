// Configuration loading and parsing (guestbook.toml).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::backend::parse_base_url;
use crate::entry::{DEFAULT_LIST_KEY, DEFAULT_PENDING_MARKER};

/// File name looked up in `config/` and in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "guestbook.toml";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/";

/// Delay between a settled refresh request and the next one.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 1000;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Top-level config. Every section is optional in the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub refresh: RefreshConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Address the routes are resolved against. Also shown as the host
    /// address.
    pub base_url: String,
    pub list_key: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            list_key: DEFAULT_LIST_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub interval_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        RefreshConfig {
            interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
        }
    }
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub pending_marker: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            pending_marker: DEFAULT_PENDING_MARKER.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate the config file at `path`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    parse_config(&text, path)
}

/// Parse and validate config text. `path` is only used in error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Candidate config file locations, in lookup order: `config/guestbook.toml`
/// under `base_dir`, then the platform config directory.
pub fn config_search_paths(base_dir: &Path) -> Vec<PathBuf> {
    let mut paths = vec![base_dir.join("config").join(CONFIG_FILE_NAME)];
    if let Some(dirs) = directories::ProjectDirs::from("", "", "guestbook") {
        paths.push(dirs.config_dir().join(CONFIG_FILE_NAME));
    }
    paths
}

/// Load the first config file found under `base_dir` (see
/// [`config_search_paths`]), or the built-in defaults when there is none.
///
/// Returns the path that was loaded, if any, alongside the config.
pub fn load_config_in(base_dir: &Path) -> Result<(Config, Option<PathBuf>), ConfigError> {
    for path in config_search_paths(base_dir) {
        if path.is_file() {
            let config = load_config_from(&path)?;
            return Ok((config, Some(path)));
        }
    }
    Ok((Config::default(), None))
}

/// Convenience wrapper: loads config relative to the current working
/// directory.
pub fn load_config() -> Result<(Config, Option<PathBuf>), ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_in(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if let Err(e) = parse_base_url(&config.backend.base_url) {
        return Err(ConfigError::ValidationError {
            field: "backend.base_url".into(),
            message: e.to_string(),
        });
    }

    if config.backend.list_key.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "backend.list_key".into(),
            message: "must not be empty".into(),
        });
    }

    if matches!(config.backend.list_key.as_str(), "." | "..") {
        return Err(ConfigError::ValidationError {
            field: "backend.list_key".into(),
            message: "must not be `.` or `..`".into(),
        });
    }

    if config.refresh.interval_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "refresh.interval_ms".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
