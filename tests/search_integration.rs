//! End-to-end batches against a mock search API

use company_research::providers::TavilyProvider;
use company_research::search::QueryStatus;
use company_research::{Search, Settings};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.provider.base_url = server.uri();
    settings.provider.api_key = Some("tvly-test".to_string());
    settings
}

fn search(settings: &Settings) -> Search {
    let provider = TavilyProvider::from_settings(&settings.provider).unwrap();
    Search::from_settings(settings, Arc::new(provider), None)
}

fn rows(prefix: &str, scores: &[f64]) -> Value {
    let results: Vec<Value> = scores
        .iter()
        .enumerate()
        .map(|(i, score)| {
            json!({
                "title": format!("{} {}", prefix, i),
                "url": format!("https://{}.example/{}", prefix, i),
                "content": format!("About {} number {}", prefix, i),
                "score": score
            })
        })
        .collect();
    json!({ "query": prefix, "results": results, "images": [] })
}

async fn mount_query(server: &MockServer, query: &str, body: Value) {
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({ "query": query })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_two_queries_merge_into_ranked_top_eight() {
    let server = MockServer::start().await;
    mount_query(&server, "acme revenue", rows("revenue", &[0.9, 0.8, 0.7, 0.6, 0.5])).await;
    mount_query(&server, "acme ceo", rows("ceo", &[0.85, 0.75, 0.65])).await;

    let results = search(&settings(&server))
        .execute(&["acme revenue", "acme ceo"])
        .await;

    assert_eq!(results.len(), 8);
    let scores: Vec<f64> = results.results().iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![0.9, 0.85, 0.8, 0.75, 0.7, 0.65, 0.6, 0.5]);
    assert_eq!(results.results()[1].title, "ceo 0");
}

#[tokio::test]
async fn test_only_first_three_queries_are_sent() {
    let server = MockServer::start().await;
    for query in ["q1", "q2", "q3", "q4", "q5"] {
        mount_query(&server, query, rows(query, &[0.5])).await;
    }

    let report = search(&settings(&server))
        .execute_detailed(&["q1", "q2", "q3", "q4", "q5"])
        .await;

    assert_eq!(report.dispatch.skipped, vec!["q4", "q5"]);
    assert_eq!(report.results.len(), 3);

    let sent = server.received_requests().await.unwrap();
    assert_eq!(sent.len(), 3);
    let mut queries: Vec<String> = sent
        .iter()
        .map(|r| r.body_json::<Value>().unwrap()["query"].as_str().unwrap().to_string())
        .collect();
    queries.sort();
    assert_eq!(queries, vec!["q1", "q2", "q3"]);
}

#[tokio::test]
async fn test_slow_query_times_out_without_blocking_others() {
    let server = MockServer::start().await;
    mount_query(&server, "fast", rows("fast", &[0.4, 0.3])).await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({ "query": "slow" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(rows("slow", &[0.99]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut settings = settings(&server);
    settings.search.query_timeout = 0.3;

    let report = search(&settings).execute_detailed(&["slow", "fast"]).await;

    assert_eq!(report.dispatch.outcomes[0].status, QueryStatus::TimedOut);
    assert!(report.dispatch.outcomes[1].status.is_completed());
    assert_eq!(report.results.len(), 2);
    assert!(report.results.results().iter().all(|r| r.title.starts_with("fast")));
    assert!(report.dispatch.elapsed < Duration::from_secs(3));
}

#[tokio::test]
async fn test_failed_query_is_isolated() {
    let server = MockServer::start().await;
    mount_query(&server, "ok", rows("ok", &[0.5])).await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({ "query": "limited" })))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let report = search(&settings(&server))
        .execute_detailed(&["limited", "ok"])
        .await;

    assert_eq!(report.dispatch.failed(), 1);
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results.results()[0].title, "ok 0");
}

#[tokio::test]
async fn test_all_empty_results_give_empty_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;

    let results = search(&settings(&server)).execute(&["a", "b"]).await;
    assert!(results.is_empty());
    assert_eq!(results.total_found(), 0);
}

#[tokio::test]
async fn test_long_snippets_are_truncated() {
    let server = MockServer::start().await;
    let long = "é".repeat(300);
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"title": "t", "url": "u", "content": long, "score": 0.1}]
        })))
        .mount(&server)
        .await;

    let results = search(&settings(&server)).execute(&["x"]).await;
    let content = &results.results()[0].content;
    assert_eq!(content.chars().count(), 203);
    assert!(content.ends_with("..."));
}
