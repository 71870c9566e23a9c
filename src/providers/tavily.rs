//! Tavily search API provider

use super::traits::*;
use crate::config::ProviderSettings;
use crate::error::{ConfigError, ProviderError};
use crate::network::HttpClient;
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

/// Environment variable holding the Tavily credential
pub const API_KEY_ENV: &str = "TAVILY_API_KEY";

/// Tavily web search provider
pub struct TavilyProvider {
    client: HttpClient,
    endpoint: String,
    api_key: String,
}

impl TavilyProvider {
    pub fn new(client: HttpClient, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: format!("{}/search", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        }
    }

    /// Build the provider from settings; fails when no API key is configured
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, ConfigError> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(API_KEY_ENV.to_string()))?;
        let client = HttpClient::with_settings(settings)?;
        Ok(Self::new(client, &settings.base_url, api_key))
    }

    /// Full URL of the search endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body(query: &str, options: &SearchOptions) -> serde_json::Value {
        json!({
            "query": query,
            "search_depth": options.search_depth.as_str(),
            "include_images": options.include_images,
            "include_image_descriptions": options.include_image_descriptions,
            "max_results": options.max_results,
            "include_raw_content": options.include_raw_content,
        })
    }
}

#[async_trait]
impl SearchProvider for TavilyProvider {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<serde_json::Value, ProviderError> {
        let body = Self::request_body(query, options);
        let response = self
            .client
            .post_json(&self.endpoint, &self.api_key, &body)
            .await?;

        debug!(status = response.status, "tavily responded");

        if let Some(err) = response.error_for_status() {
            return Err(err);
        }

        response.json()
    }
}
