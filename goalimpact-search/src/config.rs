use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{Result, SearchError};
use crate::model::EntityType;

pub const DEFAULT_API_URL: &str = "https://api.goalimpact.com/api/";
pub const DEFAULT_SITE_URL: &str = "https://goalimpact.com/";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the search client and widgets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalImpactConfig {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base of the analytics API; `search/` is resolved against it
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    /// Restrict widgets to one entity kind
    pub scope: Option<EntityType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site that detail routes are resolved against for absolute links
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            scope: None,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SITE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn url(&self) -> Result<Url> {
        parse_base_url(&self.base_url)
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl SiteConfig {
    pub fn url(&self) -> Result<Url> {
        parse_base_url(&self.base_url)
    }
}

impl GoalImpactConfig {
    /// Load `~/.goalimpact/config.toml` (defaults if absent), then apply
    /// `.env` files and environment overrides.
    pub fn load() -> Result<Self> {
        load_dotenv();
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file without env overrides; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| SearchError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get config directory: ~/.goalimpact
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".goalimpact")
    }

    /// Get config file path: ~/.goalimpact/config.toml
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = env::var("GOALIMPACT_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(url) = env::var("GOALIMPACT_SITE_URL") {
            self.site.base_url = url;
        }
        if let Ok(ms) = env::var("GOALIMPACT_DEBOUNCE_MS") {
            self.search.debounce_ms = ms
                .parse()
                .map_err(|_| SearchError::config(format!("GOALIMPACT_DEBOUNCE_MS is not a number: {ms}")))?;
        }
        if let Ok(secs) = env::var("GOALIMPACT_TIMEOUT_SECS") {
            self.api.timeout_secs = secs
                .parse()
                .map_err(|_| SearchError::config(format!("GOALIMPACT_TIMEOUT_SECS is not a number: {secs}")))?;
        }
        Ok(())
    }

    /// Reject values the widget and client cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.search.debounce_ms == 0 {
            return Err(SearchError::config("search.debounce_ms must be greater than zero"));
        }
        if self.api.timeout_secs == 0 {
            return Err(SearchError::config("api.timeout_secs must be greater than zero"));
        }
        self.api.url()?;
        self.site.url()?;
        Ok(())
    }

    /// Save config to its default location
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| SearchError::config(format!("failed to serialize config: {e}")))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Load `.env` files: ~/.goalimpact/.env, then the working directory
pub fn load_dotenv() {
    let _ = dotenvy::from_path(GoalImpactConfig::config_dir().join(".env"));
    let _ = dotenvy::dotenv();
}

/// Parse a base URL, forcing a trailing slash so relative joins append
pub fn parse_base_url(value: &str) -> Result<Url> {
    let mut url = Url::parse(value).map_err(|source| SearchError::invalid_url(value, source))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
