//! Configuration infrastructure
//!
//! Contains configuration loading and management for the extraction service.
//!
//! Values are layered in this order, later layers winning:
//! 1. Built-in defaults (the `defaults` and `drik` modules below)
//! 2. An optional config file (JSON or TOML)
//! 3. Environment variables prefixed `PANCHANG`, nested with `__`
//!    (e.g. `PANCHANG__HTTP__TIMEOUT_SECONDS=10`)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use super::parsing::ParsingConfig;

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Transport settings for the document fetcher
    pub http: HttpClientConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Response cache in front of the service
    pub cache: CacheConfig,

    /// Per-source URLs, strategies and schemas
    pub parsing: ParsingConfig,
}

/// Configuration for HTTP client behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Connect timeout in seconds
    pub connect_timeout_seconds: u64,
    /// Total attempts per fetch; 1 means no retry
    pub max_attempts: u32,
    /// Base delay for exponential backoff between attempts
    pub retry_base_delay_ms: u64,
    /// User agent string
    pub user_agent: String,
    /// Whether to follow redirects
    pub follow_redirects: bool,
    /// Extra request headers
    pub headers: HashMap<String, String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            connect_timeout_seconds: defaults::CONNECT_TIMEOUT_SECONDS,
            max_attempts: defaults::FETCH_ATTEMPTS,
            retry_base_delay_ms: defaults::RETRY_BASE_DELAY_MS,
            user_agent: defaults::USER_AGENT.to_string(),
            follow_redirects: true,
            headers: HashMap::from([(
                "Accept-Language".to_string(),
                defaults::ACCEPT_LANGUAGE.to_string(),
            )]),
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files; the platform data dir when unset
    pub directory: Option<PathBuf>,

    /// Number of log files to keep (older files will be deleted)
    pub max_files: u32,

    /// Enable automatic log cleanup on startup
    pub auto_cleanup_logs: bool,

    /// Module-specific log level filters (e.g., "reqwest": "info")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            directory: None,
            max_files: defaults::LOG_MAX_FILES,
            auto_cleanup_logs: defaults::LOG_AUTO_CLEANUP,
            module_filters: HashMap::from([
                ("reqwest".to_string(), "info".to_string()),
                ("hyper".to_string(), "warn".to_string()),
                ("h2".to_string(), "warn".to_string()),
                ("html5ever".to_string(), "warn".to_string()),
                ("selectors".to_string(), "warn".to_string()),
                ("panchang_scraper".to_string(), "info".to_string()),
            ]),
        }
    }
}

/// Short-lived response cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_seconds: u64,
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: defaults::CACHE_TTL_SECONDS,
            max_entries: defaults::CACHE_MAX_ENTRIES,
        }
    }
}

impl AppConfig {
    /// Load defaults, then `path` (if given), then the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        match path {
            Some(path) => {
                builder = builder.add_source(config::File::from(path));
            }
            None => {
                if let Ok(dir) = ConfigManager::get_config_dir() {
                    let stem = dir.join(defaults::CONFIG_FILE_STEM);
                    builder = builder
                        .add_source(config::File::with_name(&stem.to_string_lossy()).required(false));
                }
            }
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(defaults::ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration sources")?;

        let config: Self = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_seconds == 0 {
            bail!("http.timeout_seconds must be greater than 0");
        }
        if self.http.max_attempts == 0 {
            bail!("http.max_attempts must be at least 1");
        }
        if self.http.user_agent.trim().is_empty() {
            bail!("http.user_agent must not be empty");
        }
        if self.cache.enabled && self.cache.ttl_seconds == 0 {
            bail!("cache.ttl_seconds must be greater than 0 when the cache is enabled");
        }
        Ok(())
    }
}

/// Configuration manager for locating and writing settings
pub struct ConfigManager {
    pub config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Get the application data directory (logs live here)
    pub fn get_app_data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .context("Failed to get local data directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(data_dir)
    }

    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join(format!("{}.json", defaults::CONFIG_FILE_STEM));
        Ok(Self { config_path })
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Write `config` as pretty JSON, creating the directory if needed
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(dir) = self.config_path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)
                    .await
                    .context("Failed to create config directory")?;
                info!("Created configuration directory: {:?}", dir);
            }
        }

        let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
        fs::write(&self.config_path, content)
            .await
            .context("Failed to write config file")?;

        info!("Configuration saved to: {:?}", self.config_path);
        Ok(())
    }

    /// Load the file this manager points at (plus environment overrides)
    pub fn load_config(&self) -> Result<AppConfig> {
        AppConfig::load(Some(&self.config_path))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Drik Panchang URLs
pub mod drik {
    /// Origin for every page
    pub const ORIGIN: &str = "https://www.drikpanchang.com";

    /// Daily rashiphal; `{slug}` is the rashi slug
    pub const HOROSCOPE_PATH: &str = "{lang_path}/astrology/prediction/{slug}/{slug}-daily-rashiphal.html";

    /// Day panchang; Hindi pages live under `/hindi`
    pub const PANCHANG_PATH: &str = "{lang_path}/panchang/day-panchang.html";

    pub const CHOGHADIYA_PATH: &str = "{lang_path}/muhurat/choghadiya.html";

    pub const RAHU_KAAL_PATH: &str = "{lang_path}/panchang/rahu-kaal.html";

    /// A horoscope paragraph must be longer than this many characters
    pub const HOROSCOPE_MIN_CHARS: usize = 120;
}

/// Default configuration values
pub mod defaults {
    pub const APP_DIR_NAME: &str = "panchang-scraper";

    pub const CONFIG_FILE_STEM: &str = "config";

    pub const ENV_PREFIX: &str = "PANCHANG";

    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    pub const CONNECT_TIMEOUT_SECONDS: u64 = 10;

    /// The engine never retries; the transport does one attempt unless configured
    pub const FETCH_ATTEMPTS: u32 = 1;

    pub const RETRY_BASE_DELAY_MS: u64 = 500;

    /// Browser-like user agent; the origin serves reduced pages to bots
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

    pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9,hi;q=0.8";

    /// Response cache time-to-live (30 minutes)
    pub const CACHE_TTL_SECONDS: u64 = 1800;

    pub const CACHE_MAX_ENTRIES: usize = 512;

    // Logging configuration defaults
    pub const LOG_LEVEL: &str = "info";

    pub const LOG_JSON_FORMAT: bool = false;

    pub const LOG_CONSOLE_OUTPUT: bool = true;

    pub const LOG_FILE_OUTPUT: bool = false;

    pub const LOG_MAX_FILES: u32 = 7;

    pub const LOG_AUTO_CLEANUP: bool = true;
}
