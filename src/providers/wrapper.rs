//! Provider-call wrapper: one query in, normalized results out

use super::traits::{SearchOptions, SearchProvider};
use crate::error::ProviderError;
use crate::results::SearchResult;
use serde_json::Value;
use std::sync::Arc;

/// Binds a provider to fixed options and translates its raw payload.
///
/// This is the only seam the dispatcher calls through, so swapping the
/// provider never touches dispatch or aggregation.
#[derive(Clone)]
pub struct ProviderCall {
    provider: Arc<dyn SearchProvider>,
    options: SearchOptions,
    content_limit: usize,
}

impl ProviderCall {
    pub fn new(provider: Arc<dyn SearchProvider>, options: SearchOptions, content_limit: usize) -> Self {
        Self {
            provider,
            options,
            content_limit,
        }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Run `query` against the provider and translate the response
    pub async fn call(&self, query: &str) -> Result<Vec<SearchResult>, ProviderError> {
        let raw = self.provider.search(query, &self.options).await?;
        Ok(parse_results(&raw, self.content_limit))
    }
}

/// Translate a raw provider payload into search results.
///
/// Missing or mistyped fields fall back to `""` and `0.0`. A payload without a
/// `results` array yields no results; non-object rows are skipped.
pub fn parse_results(raw: &Value, content_limit: usize) -> Vec<SearchResult> {
    let Some(rows) = raw.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };

    rows.iter()
        .filter(|row| row.is_object())
        .map(|row| {
            let text = |key: &str| row.get(key).and_then(Value::as_str).unwrap_or_default();
            let score = row.get("score").and_then(Value::as_f64).unwrap_or(0.0);
            SearchResult::new(text("title"), text("url"), text("content"), score, content_limit)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedProvider(Result<Value, ProviderError>);

    #[async_trait]
    impl SearchProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn search(&self, _query: &str, _options: &SearchOptions) -> Result<Value, ProviderError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_parse_full_rows() {
        let raw = json!({
            "results": [
                {"title": "A", "url": "https://a.com", "content": "alpha", "score": 0.8},
                {"title": "B", "url": "https://b.com", "content": "beta", "score": 0.3}
            ],
            "images": [{"url": "https://a.com/logo.png", "description": "logo"}]
        });
        let results = parse_results(&raw, 200);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "A");
        assert_eq!(results[1].score, 0.3);
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let raw = json!({"results": [{"url": "https://only-url.com"}, {"title": 42, "score": "high"}]});
        let results = parse_results(&raw, 200);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "");
        assert_eq!(results[0].content, "");
        assert_eq!(results[0].score, 0.0);
        assert_eq!(results[1].title, "");
        assert_eq!(results[1].score, 0.0);
    }

    #[test]
    fn test_missing_results_array_is_empty() {
        assert!(parse_results(&json!({"answer": null}), 200).is_empty());
        assert!(parse_results(&json!({"results": "nope"}), 200).is_empty());
        assert!(parse_results(&json!([1, 2, 3]), 200).is_empty());
    }

    #[test]
    fn test_content_truncated_once() {
        let raw = json!({"results": [{"content": "q".repeat(350), "score": 1.0}]});
        let results = parse_results(&raw, 200);
        assert_eq!(results[0].content.chars().count(), 203);
        assert!(results[0].content.ends_with("..."));
    }

    #[test]
    fn test_call_translates_payload() {
        let provider = FixedProvider(Ok(json!({"results": [{"title": "T", "score": 0.5}]})));
        let call = ProviderCall::new(Arc::new(provider), SearchOptions::default(), 200);
        let results = tokio_test::block_on(call.call("anything")).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(call.provider_name(), "fixed");
    }

    #[test]
    fn test_call_propagates_provider_error() {
        let provider = FixedProvider(Err(ProviderError::RateLimited));
        let call = ProviderCall::new(Arc::new(provider), SearchOptions::default(), 200);
        let err = tokio_test::block_on(call.call("anything")).unwrap_err();
        assert_eq!(err, ProviderError::RateLimited);
    }
}
