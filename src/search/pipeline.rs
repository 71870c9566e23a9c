//! Search facade: dispatch, aggregate, report

use super::executor::Dispatcher;
use super::models::DispatchOutcome;
use crate::config::Settings;
use crate::providers::{ProviderCall, SearchOptions, SearchProvider};
use crate::report::{BatchSummary, SearchReporter};
use crate::results::ResultSet;
use std::sync::Arc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Full record of one batch: the ranked set plus the per-query detail
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub results: ResultSet,
    pub dispatch: DispatchOutcome,
}

/// Runs a list of queries end to end and returns the ranked, capped results
pub struct Search {
    dispatcher: Dispatcher,
    max_results: usize,
    content_limit: usize,
}

impl Search {
    /// Create a search with default aggregation limits
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            max_results: crate::MAX_RESULTS,
            content_limit: crate::CONTENT_LIMIT,
        }
    }

    /// Build the whole stack from settings around `provider`
    pub fn from_settings(
        settings: &Settings,
        provider: Arc<dyn SearchProvider>,
        reporter: Option<Arc<dyn SearchReporter>>,
    ) -> Self {
        let call = ProviderCall::new(
            provider,
            SearchOptions::from(&settings.provider),
            settings.search.content_limit,
        );
        let mut dispatcher = Dispatcher::new(call).with_settings(&settings.search);
        if let Some(reporter) = reporter {
            dispatcher = dispatcher.with_reporter(reporter);
        }

        Self::new(dispatcher)
            .with_max_results(settings.search.max_results)
            .with_content_limit(settings.search.content_limit)
    }

    /// Set the size cap of the result set
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the snippet length used during aggregation
    pub fn with_content_limit(mut self, content_limit: usize) -> Self {
        self.content_limit = content_limit;
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Run `queries` and return the ranked result set
    pub async fn execute<S: AsRef<str>>(&self, queries: &[S]) -> ResultSet {
        self.execute_detailed(queries).await.results
    }

    /// Run `queries` and keep the per-query detail alongside the ranked set
    pub async fn execute_detailed<S: AsRef<str>>(&self, queries: &[S]) -> SearchReport {
        let span = info_span!("search_batch", batch = %Uuid::new_v4());

        async move {
            info!("Executing search batch of {} queries", queries.len());

            let dispatch = self.dispatcher.dispatch(queries).await;

            let results = ResultSet::aggregate(
                dispatch.outcomes.iter().map(|o| o.results.clone()),
                self.max_results,
                self.content_limit,
            );

            if results.discarded() > 0 {
                info!(
                    "Kept top {} of {} results",
                    results.len(),
                    results.total_found()
                );
            }

            if let Some(reporter) = self.dispatcher.reporter() {
                reporter.batch_summary(&BatchSummary {
                    total_elapsed: dispatch.elapsed,
                    queries_processed: dispatch.outcomes.len(),
                    total_results_found: results.total_found(),
                    results_kept: results.len(),
                    by_query: &dispatch.outcomes,
                });
            }

            SearchReport { results, dispatch }
        }
        .instrument(span)
        .await
    }
}
