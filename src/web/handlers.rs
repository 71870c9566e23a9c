//! HTTP request handlers

use super::state::AppState;
use crate::error::ToolError;
use crate::metrics::MetricsSnapshot;
use crate::research::{create_query, CreateQueryInput, CreateQueryOutput, TargetSearchInput, TargetSearchOutput};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

/// Search handler: run the queries and return the ranked results
pub async fn search(
    State(state): State<AppState>,
    Json(input): Json<TargetSearchInput>,
) -> Json<TargetSearchOutput> {
    Json(state.tools.target_search().call(input).await)
}

/// Query creation handler
pub async fn queries(Json(input): Json<CreateQueryInput>) -> Json<CreateQueryOutput> {
    Json(create_query(&input.query, input.queries))
}

/// Generic tool handler, taking the raw JSON arguments an agent produced
pub async fn invoke_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    arguments: String,
) -> Response {
    match state.tools.invoke(&name, &arguments).await {
        Ok(output) => ([(header::CONTENT_TYPE, "application/json")], output).into_response(),
        Err(e) => tool_error_response(e),
    }
}

fn tool_error_response(error: ToolError) -> Response {
    let status = match &error {
        ToolError::UnknownTool(_) => StatusCode::NOT_FOUND,
        ToolError::InvalidArguments(_) => StatusCode::BAD_REQUEST,
        ToolError::Encode(_) => {
            tracing::error!("Tool output error: {}", error);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(serde_json::json!({ "error": error.to_string() }))).into_response()
}

/// Stats handler
pub async fn stats(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "instance": state.instance_name(),
        "version": crate::VERSION
    }))
}

#[cfg(test)]
mod tests {
    use crate::config::Settings;
    use crate::error::ProviderError;
    use crate::providers::{SearchOptions, SearchProvider};
    use crate::web::{create_router, AppState};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct StubProvider;

    #[async_trait]
    impl SearchProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn search(&self, query: &str, _options: &SearchOptions) -> Result<Value, ProviderError> {
            if query == "broken" {
                return Err(ProviderError::Http(500));
            }
            Ok(json!({"results": [
                {"title": format!("{} a", query), "url": "https://a.com", "content": "alpha", "score": 0.9},
                {"title": format!("{} b", query), "url": "https://b.com", "content": "beta", "score": 0.4}
            ]}))
        }
    }

    fn app() -> Router {
        create_router(AppState::new(Settings::default(), Arc::new(StubProvider)))
    }

    async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(), "GET", "/health", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], crate::VERSION);
    }

    #[tokio::test]
    async fn test_search_endpoint() {
        let (status, body) = send(app(), "POST", "/search", r#"{"queries": ["acme", "broken"]}"#).await;
        assert_eq!(status, StatusCode::OK);

        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["title"], "acme a");
        assert_eq!(results[1]["score"], 0.4);
    }

    #[tokio::test]
    async fn test_queries_endpoint_caps() {
        let (status, body) = send(
            app(),
            "POST",
            "/queries",
            r#"{"query": "acme", "queries": ["1", "2", "3", "4"]}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"queries": ["1", "2", "3"]}));
    }

    #[tokio::test]
    async fn test_tool_endpoint_errors() {
        let (status, body) = send(app(), "POST", "/tools/summarize", "{}").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "unknown tool: summarize");

        let (status, _) = send(app(), "POST", "/tools/target_search", "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_stats_reflect_searches() {
        let state = AppState::new(Settings::default(), Arc::new(StubProvider));
        let app = create_router(state.clone());

        send(app.clone(), "POST", "/tools/target_search", r#"{"queries": ["acme", "broken"]}"#).await;
        let (status, body) = send(app, "GET", "/stats", "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_batches"], 1);
        assert_eq!(body["total_queries"], 2);
        assert_eq!(body["completed"], 1);
        assert_eq!(body["failures"]["http_error"], 1);
        assert_eq!(body["results_kept"], 2);
    }
}
