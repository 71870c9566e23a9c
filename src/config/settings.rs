//! Settings structures for company-research configuration

use crate::error::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main settings structure, loadable from `settings.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub provider: ProviderSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (RESEARCH_* prefix, plus TAVILY_API_KEY)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("TAVILY_API_KEY") {
            if !val.trim().is_empty() {
                self.provider.api_key = Some(val);
            }
        }
        if let Ok(val) = std::env::var("RESEARCH_DEBUG") {
            self.general.debug = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("RESEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("RESEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
    }

    /// Check every section for values the search stack cannot run with
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.search.validate()?;
        self.provider.validate()
    }
}

/// Truthy environment flag: `true`, `1`, `yes` or `on`, in any case
fn parse_flag(val: &str) -> bool {
    matches!(
        val.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Convert a seconds setting into a `Duration`, rejecting values no
/// `Duration` can hold
fn seconds(name: &str, secs: f64) -> std::result::Result<Duration, ConfigError> {
    match Duration::try_from_secs_f64(secs) {
        Ok(duration) if !duration.is_zero() => Ok(duration),
        _ => Err(ConfigError::Invalid(format!(
            "{} must be a positive number of seconds, got {}",
            name, secs
        ))),
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name reported by the health endpoint
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "company-research".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8890,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Limits applied to every search batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Queries beyond this count are skipped, never dispatched
    pub max_queries: usize,
    /// Provider calls allowed in flight at once
    pub max_concurrency: usize,
    /// Per-query time budget in seconds
    pub query_timeout: f64,
    /// Size cap of the aggregated result set
    pub max_results: usize,
    /// Snippet length, in characters, before the ellipsis marker
    pub content_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_queries: crate::MAX_QUERIES,
            max_concurrency: crate::MAX_CONCURRENCY,
            query_timeout: crate::QUERY_TIMEOUT_SECS,
            max_results: crate::MAX_RESULTS,
            content_limit: crate::CONTENT_LIMIT,
        }
    }
}

impl SearchSettings {
    /// Per-query timeout as a `Duration`; out-of-range values, which
    /// `validate` rejects, fall back to the default
    pub fn timeout(&self) -> Duration {
        seconds("search.query_timeout", self.query_timeout)
            .unwrap_or_else(|_| Duration::from_secs_f64(crate::QUERY_TIMEOUT_SECS))
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.max_queries == 0 {
            return Err(ConfigError::Invalid(
                "search.max_queries must be greater than 0".into(),
            ));
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "search.max_concurrency must be greater than 0".into(),
            ));
        }
        seconds("search.query_timeout", self.query_timeout)?;
        if self.max_results == 0 {
            return Err(ConfigError::Invalid(
                "search.max_results must be greater than 0".into(),
            ));
        }
        if self.content_limit == 0 {
            return Err(ConfigError::Invalid(
                "search.content_limit must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// How thoroughly the provider searches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    /// Shallow, fast search
    #[default]
    Basic,
    /// Slower search with more thorough extraction
    Advanced,
}

impl SearchDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
        }
    }
}

/// Search provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// API root, without the `/search` path
    pub base_url: String,
    /// Provider credential; required when the provider is built
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub search_depth: SearchDepth,
    pub include_images: bool,
    pub include_image_descriptions: bool,
    /// Raw results requested per query
    pub max_results: u32,
    pub include_raw_content: bool,
    /// Transport-level timeout in seconds
    pub request_timeout: f64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.tavily.com".to_string(),
            api_key: None,
            search_depth: SearchDepth::Basic,
            include_images: true,
            include_image_descriptions: true,
            max_results: 5,
            include_raw_content: false,
            request_timeout: 30.0,
        }
    }
}

impl ProviderSettings {
    /// Transport timeout as a `Duration`
    pub fn request_timeout(&self) -> std::result::Result<Duration, ConfigError> {
        seconds("provider.request_timeout", self.request_timeout)
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        url::Url::parse(&self.base_url).map_err(|e| {
            ConfigError::Invalid(format!("provider.base_url is not a valid URL: {}", e))
        })?;
        if self.max_results == 0 {
            return Err(ConfigError::Invalid(
                "provider.max_results must be greater than 0".into(),
            ));
        }
        self.request_timeout()?;
        Ok(())
    }
}
