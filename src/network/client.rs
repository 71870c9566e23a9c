//! HTTP client for calling the search provider API

use crate::config::ProviderSettings;
use crate::error::{ConfigError, ProviderError};
use reqwest::Client;
use std::time::Duration;

/// HTTP client wrapper with provider-specific defaults
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_settings(&ProviderSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &ProviderSettings) -> Result<Self, ConfigError> {
        let default_timeout = settings.request_timeout()?;
        let client = Client::builder()
            .timeout(default_timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| ConfigError::Invalid(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            default_timeout,
            user_agent: format!("company-research/{}", crate::VERSION),
        })
    }

    /// POST a JSON body with bearer authentication
    pub async fn post_json(
        &self,
        url: &str,
        bearer: &str,
        body: &serde_json::Value,
    ) -> Result<ApiResponse, ProviderError> {
        let response = self
            .client
            .post(url)
            .timeout(self.default_timeout)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json")
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(ApiResponse { status, text })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// HTTP response from a provider request
#[derive(Debug)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

impl ApiResponse {
    /// Parse response as JSON
    pub fn json(&self) -> Result<serde_json::Value, ProviderError> {
        serde_json::from_str(&self.text).map_err(|e| ProviderError::Parse(e.to_string()))
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if response indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Map a non-success status to the matching provider error
    pub fn error_for_status(&self) -> Option<ProviderError> {
        if self.is_success() {
            None
        } else if self.is_rate_limited() {
            Some(ProviderError::RateLimited)
        } else {
            Some(ProviderError::Http(self.status))
        }
    }
}
