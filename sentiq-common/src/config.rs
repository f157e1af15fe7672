//! Configuration loading and resolution
//!
//! Every setting is resolved with the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error: a warning is logged and the
//! remaining tiers apply. A TOML file that exists but cannot be parsed is.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::{Error, Result};

pub const ENV_CONFIG: &str = "SENTIQ_CONFIG";
pub const ENV_API_URL: &str = "SENTIQ_API_URL";
pub const ENV_SESSION_ID: &str = "SENTIQ_SESSION_ID";
pub const ENV_BATCH_ID: &str = "SENTIQ_BATCH_ID";
pub const ENV_TIMEOUT_SECS: &str = "SENTIQ_TIMEOUT_SECS";

/// Compiled fallback values
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub api_url: String,
    pub session_id: u64,
    pub batch_id: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000/api".to_string(),
            session_id: 55,
            batch_id: "55".to_string(),
            request_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

/// Logging section of the TOML file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    CompiledDefaults::default().log_level
}

/// On-disk TOML configuration; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TomlConfig {
    pub api_url: Option<String>,
    pub session_id: Option<u64>,
    pub batch_id: Option<String>,
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Load from `path`; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Config file not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub session_id: Option<u64>,
    pub batch_id: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

/// Fully resolved client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL without trailing slash, e.g. `http://host:8000/api`
    pub api_url: String,
    pub session_id: u64,
    pub batch_id: String,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl ClientConfig {
    /// Resolve every setting through CLI > ENV > TOML > default
    pub fn resolve(cli: &CliOverrides, toml: &TomlConfig) -> Result<Self> {
        let defaults = CompiledDefaults::default();

        let api_url = cli
            .api_url
            .clone()
            .or_else(|| env_value(ENV_API_URL))
            .or_else(|| toml.api_url.clone())
            .unwrap_or(defaults.api_url);

        let session_id = match cli.session_id {
            Some(id) => id,
            None => match env_value(ENV_SESSION_ID) {
                Some(raw) => parse_env(ENV_SESSION_ID, &raw)?,
                None => toml.session_id.unwrap_or(defaults.session_id),
            },
        };

        let batch_id = cli
            .batch_id
            .clone()
            .or_else(|| env_value(ENV_BATCH_ID))
            .or_else(|| toml.batch_id.clone())
            .unwrap_or(defaults.batch_id);

        let timeout_secs = match cli.request_timeout_secs {
            Some(secs) => secs,
            None => match env_value(ENV_TIMEOUT_SECS) {
                Some(raw) => parse_env(ENV_TIMEOUT_SECS, &raw)?,
                None => toml
                    .request_timeout_secs
                    .unwrap_or(defaults.request_timeout_secs),
            },
        };

        if timeout_secs == 0 {
            return Err(Error::Config("request timeout must be at least 1 second".to_string()));
        }
        if batch_id.trim().is_empty() {
            return Err(Error::Config("batch id must not be empty".to_string()));
        }

        Ok(Self {
            api_url: normalize_api_url(&api_url)?,
            session_id,
            batch_id: batch_id.trim().to_string(),
            request_timeout: Duration::from_secs(timeout_secs),
            log_level: toml.logging.level.clone(),
        })
    }
}

/// Locate the TOML file: explicit path, then `SENTIQ_CONFIG`, then
/// `<config_dir>/sentiq/config.toml`
pub fn config_file_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env_value(ENV_CONFIG) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("sentiq").join("config.toml"))
}

/// Load the TOML tier, tolerating an undeterminable config directory
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    match config_file_path(explicit) {
        Some(path) => TomlConfig::load(&path),
        None => {
            warn!("Could not determine config directory, using defaults");
            Ok(TomlConfig::default())
        }
    }
}

fn normalize_api_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(Error::Config(format!(
            "API URL must start with http:// or https:// (got '{}')",
            raw
        )));
    }
    Ok(trimmed.to_string())
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} has an invalid value '{}'", name, raw)))
}
