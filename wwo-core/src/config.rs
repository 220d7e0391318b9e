use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, path::PathBuf, time::Duration};

use crate::model::ForecastDays;

/// Environment variable holding the World Weather Online API key.
pub const API_KEY_ENV: &str = "WWO_API_KEY";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "WWO_CONFIG";

/// Stand-in used when no key is configured anywhere. Requests are refused
/// while this is the active key.
pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

pub const SIGNUP_URL: &str = "https://www.worldweatheronline.com/weather-api/";

pub const DEFAULT_BASE_URL: &str = "https://api.worldweatheronline.com/premium/v1/weather.ashx";

pub const DEFAULT_LOCATION: &str = "London";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// API credential. `Debug` never prints the key itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn placeholder() -> Self {
        Self(PLACEHOLDER_API_KEY.to_string())
    }

    /// Plain equality check against the sentinel; the key format itself is
    /// not validated.
    pub fn is_placeholder(&self) -> bool {
        self.0 == PLACEHOLDER_API_KEY
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_placeholder() {
            f.write_str("ApiKey(<unset>)")
        } else {
            f.write_str("ApiKey(<redacted>)")
        }
    }
}

/// Optional settings read from `config.toml`.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// location = "Paris"
/// days = 3
/// plain = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,

    /// Location used when `--location` is not given.
    pub location: Option<String>,

    /// Day count used when `--days` is not given. Must be within 1..=7.
    pub days: Option<u8>,

    /// Always use the plain-text presenter.
    #[serde(default)]
    pub plain: bool,

    pub base_url: Option<String>,

    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        if let Some(days) = cfg.days {
            ForecastDays::new(days)?;
        }
        Ok(cfg)
    }

    /// Path to the config file, honouring `WWO_CONFIG`.
    pub fn config_file_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("com", "worldweatheronline", "wwo")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Resolve the key from `WWO_API_KEY`, then this config, then the placeholder.
    pub fn resolve_api_key(&self) -> ApiKey {
        self.api_key_from(std::env::var(API_KEY_ENV).ok())
    }

    pub fn api_key_from(&self, env_value: Option<String>) -> ApiKey {
        env_value
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
            .map(ApiKey::new)
            .unwrap_or_else(ApiKey::placeholder)
    }

    pub fn default_location(&self) -> &str {
        self.location.as_deref().unwrap_or(DEFAULT_LOCATION)
    }

    pub fn default_days(&self) -> ForecastDays {
        // `parse` already rejected out-of-range values.
        self.days.and_then(|d| ForecastDays::new(d).ok()).unwrap_or_default()
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
