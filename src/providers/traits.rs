//! Provider traits and types

use crate::config::{ProviderSettings, SearchDepth};
use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Fixed per-call configuration sent with every query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub search_depth: SearchDepth,
    pub include_images: bool,
    pub include_image_descriptions: bool,
    /// Raw results requested per query
    pub max_results: u32,
    pub include_raw_content: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from(&ProviderSettings::default())
    }
}

impl From<&ProviderSettings> for SearchOptions {
    fn from(settings: &ProviderSettings) -> Self {
        Self {
            search_depth: settings.search_depth,
            include_images: settings.include_images,
            include_image_descriptions: settings.include_image_descriptions,
            max_results: settings.max_results,
            include_raw_content: settings.include_raw_content,
        }
    }
}

/// A remote web search API
///
/// Implementations return the provider's raw JSON payload; translation into
/// [`SearchResult`](crate::SearchResult)s happens in
/// [`ProviderCall`](super::ProviderCall). Implementations need not enforce
/// a timeout of their own.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name
    fn name(&self) -> &str;

    /// Run one query
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<serde_json::Value, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_fast_and_image_rich() {
        let options = SearchOptions::default();
        assert_eq!(options.search_depth, SearchDepth::Basic);
        assert!(options.include_images);
        assert!(options.include_image_descriptions);
        assert_eq!(options.max_results, 5);
        assert!(!options.include_raw_content);
    }

    #[test]
    fn test_options_follow_settings() {
        let settings = ProviderSettings {
            search_depth: SearchDepth::Advanced,
            max_results: 2,
            ..Default::default()
        };
        let options = SearchOptions::from(&settings);
        assert_eq!(options.search_depth, SearchDepth::Advanced);
        assert_eq!(options.max_results, 2);
    }
}
