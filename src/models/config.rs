//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Wiki endpoint and category settings
    #[serde(default)]
    pub wiki: WikiConfig,

    /// HTTP client and retry behavior
    #[serde(default)]
    pub http: HttpConfig,

    /// Rate-limit delays used while harvesting
    #[serde(default)]
    pub harvest: HarvestConfig,

    /// Document keys inside the storage directory
    #[serde(default)]
    pub paths: PathsConfig,

    /// Rendering limits
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.wiki.user_agent.trim().is_empty() {
            return Err(AppError::validation("wiki.user_agent is empty"));
        }
        Url::parse(&self.wiki.api_url)
            .map_err(|e| AppError::validation(format!("wiki.api_url is invalid: {e}")))?;
        if self.wiki.category.trim().is_empty() {
            return Err(AppError::validation("wiki.category is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.http.retries == 0 {
            return Err(AppError::validation("http.retries must be > 0"));
        }
        if self.display.max_chars == 0 {
            return Err(AppError::validation("display.max_chars must be > 0"));
        }
        Ok(())
    }
}

/// Wiki API endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiConfig {
    /// MediaWiki `api.php` endpoint
    #[serde(default = "defaults::api_url")]
    pub api_url: String,

    /// User-Agent header sent with every request
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Category to harvest, without the `Category:` prefix
    #[serde(default = "defaults::category")]
    pub category: String,

    /// Prefix used to build human-facing page links
    #[serde(default = "defaults::page_url_base")]
    pub page_url_base: String,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            api_url: defaults::api_url(),
            user_agent: defaults::user_agent(),
            category: defaults::category(),
            page_url_base: defaults::page_url_base(),
        }
    }
}

/// HTTP client and retry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Attempts per request before giving up
    #[serde(default = "defaults::retries")]
    pub retries: u32,

    /// Base delay in seconds; attempt `n` waits `backoff_secs * n`
    #[serde(default = "defaults::backoff")]
    pub backoff_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_secs(self.backoff_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::timeout(),
            retries: defaults::retries(),
            backoff_secs: defaults::backoff(),
        }
    }
}

/// Courtesy delays between requests while harvesting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Delay between category listing pages in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub page_delay_ms: u64,

    /// Delay between per-title content fetches in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub title_delay_ms: u64,
}

impl HarvestConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn title_delay(&self) -> Duration {
        Duration::from_millis(self.title_delay_ms)
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            page_delay_ms: defaults::request_delay(),
            title_delay_ms: defaults::request_delay(),
        }
    }
}

/// Keys of the persisted documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Raw category index written by `harvest`
    #[serde(default = "defaults::raw_corpus")]
    pub raw_corpus: String,

    /// Normalized corpus written by `normalize`
    #[serde(default = "defaults::corpus")]
    pub corpus: String,

    /// Titles whose fetch failed during the last harvest
    #[serde(default = "defaults::failures")]
    pub failures: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_corpus: defaults::raw_corpus(),
            corpus: defaults::corpus(),
            failures: defaults::failures(),
        }
    }
}

/// Rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Maximum characters of recipe body shown
    #[serde(default = "defaults::max_chars")]
    pub max_chars: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_chars: defaults::max_chars(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Log per-title progress at info level
    #[serde(default = "defaults::show_progress")]
    pub show_progress: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            show_progress: defaults::show_progress(),
        }
    }
}

mod defaults {
    // Wiki defaults
    pub fn api_url() -> String {
        "https://en.wikibooks.org/w/api.php".into()
    }
    pub fn user_agent() -> String {
        "cookbook-harvester/0.1 (https://en.wikibooks.org/wiki/Cookbook)".into()
    }
    pub fn category() -> String {
        "Recipes".into()
    }
    pub fn page_url_base() -> String {
        "https://en.wikibooks.org/wiki/".into()
    }

    // HTTP defaults
    pub fn timeout() -> u64 {
        10
    }
    pub fn retries() -> u32 {
        3
    }
    pub fn backoff() -> u64 {
        2
    }

    // Harvest defaults
    pub fn request_delay() -> u64 {
        100
    }

    // Path defaults
    pub fn raw_corpus() -> String {
        "recipes.json".into()
    }
    pub fn corpus() -> String {
        "recipes_clean.json".into()
    }
    pub fn failures() -> String {
        "harvest_failures.json".into()
    }

    // Display defaults
    pub fn max_chars() -> usize {
        2000
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
    pub fn show_progress() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.wiki.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_api_url() {
        let mut config = Config::default();
        config.wiki.api_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_retries() {
        let mut config = Config::default();
        config.http.retries = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [wiki]
            category = "Vegetarian recipes"

            [http]
            retries = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.wiki.category, "Vegetarian recipes");
        assert_eq!(config.wiki.api_url, "https://en.wikibooks.org/w/api.php");
        assert_eq!(config.http.retries, 5);
        assert_eq!(config.http.backoff_secs, 2);
        assert_eq!(config.harvest.page_delay_ms, 100);
        assert_eq!(config.display.max_chars, 2000);
    }

    #[test]
    fn load_reads_file_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(Config::load(&path), Err(AppError::Io(_))));

        fs::write(&path, "[display]\nmax_chars = 300\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.display.max_chars, 300);
        assert_eq!(config.paths.corpus, "recipes_clean.json");
    }
}
