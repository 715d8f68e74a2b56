//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Upstream API base URLs
    #[serde(default)]
    pub endpoints: EndpointConfig,

    /// Retry policy for throttled endpoints
    #[serde(default)]
    pub retry: RetryConfig,

    /// Recent changes feed settings
    #[serde(default)]
    pub recent: RecentConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Serialize configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.retry.max_attempts == 0 {
            return Err(AppError::validation("retry.max_attempts must be > 0"));
        }
        if self.recent.limit == 0 {
            return Err(AppError::validation("recent.limit must be > 0"));
        }
        for (name, value) in [
            ("endpoints.catalog_url", &self.endpoints.catalog_url),
            ("endpoints.covers_url", &self.endpoints.covers_url),
            ("endpoints.encyclopedia_url", &self.endpoints.encyclopedia_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| AppError::validation(format!("{name} is not a valid URL: {e}")))?;
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Base URLs of the upstream services, without trailing slash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointConfig {
    /// Open Library catalog (works, authors, search, recent changes)
    #[serde(default = "defaults::catalog_url")]
    pub catalog_url: String,

    /// Open Library cover image host
    #[serde(default = "defaults::covers_url")]
    pub covers_url: String,

    /// Wikipedia host used for summaries
    #[serde(default = "defaults::encyclopedia_url")]
    pub encyclopedia_url: String,
}

impl EndpointConfig {
    /// Catalog base URL with any trailing slash removed.
    pub fn catalog(&self) -> &str {
        self.catalog_url.trim_end_matches('/')
    }

    /// Covers base URL with any trailing slash removed.
    pub fn covers(&self) -> &str {
        self.covers_url.trim_end_matches('/')
    }

    /// Encyclopedia base URL with any trailing slash removed.
    pub fn encyclopedia(&self) -> &str {
        self.encyclopedia_url.trim_end_matches('/')
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            catalog_url: defaults::catalog_url(),
            covers_url: defaults::covers_url(),
            encyclopedia_url: defaults::encyclopedia_url(),
        }
    }
}

/// Bounded retry settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetryConfig {
    /// Total attempts including the first one
    #[serde(default = "defaults::max_attempts")]
    pub max_attempts: u32,

    /// Linear backoff unit in milliseconds
    #[serde(default = "defaults::base_delay")]
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::max_attempts(),
            base_delay_ms: defaults::base_delay(),
        }
    }
}

/// Recent changes feed settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecentConfig {
    /// Number of changes requested from the feed
    #[serde(default = "defaults::recent_limit")]
    pub limit: u32,
}

impl Default for RecentConfig {
    fn default() -> Self {
        Self {
            limit: defaults::recent_limit(),
        }
    }
}

mod defaults {
    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; Libraria/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Endpoint defaults
    pub fn catalog_url() -> String {
        "https://openlibrary.org".into()
    }
    pub fn covers_url() -> String {
        "https://covers.openlibrary.org".into()
    }
    pub fn encyclopedia_url() -> String {
        "https://en.wikipedia.org".into()
    }

    // Retry defaults
    pub fn max_attempts() -> u32 {
        3
    }
    pub fn base_delay() -> u64 {
        1000
    }

    // Recent changes defaults
    pub fn recent_limit() -> u32 {
        5
    }
}
