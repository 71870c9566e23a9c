//! Progress reporting for search batches
//!
//! A [`SearchReporter`] observes a batch without influencing it: every method
//! has a no-op default and nothing the reporter does changes which queries run
//! or what results come back.

mod console;

pub use console::ConsoleReporter;

use crate::error::ProviderError;
use crate::search::QueryOutcome;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Summary statistics emitted once per batch
#[derive(Debug, Clone, Copy)]
pub struct BatchSummary<'a> {
    /// Wall-clock time of the whole batch
    pub total_elapsed: Duration,
    /// Queries actually dispatched
    pub queries_processed: usize,
    /// Results found across all queries, before capping
    pub total_results_found: usize,
    /// Results kept after capping
    pub results_kept: usize,
    /// Per-query outcomes, in input order
    pub by_query: &'a [QueryOutcome],
}

/// Observer of search batch progress. Query indices are 1-based.
pub trait SearchReporter: Send + Sync {
    /// Called before dispatch with the full input and the skipped tail
    fn queries_skipped(&self, _total: usize, _skipped: &[String]) {}

    fn query_started(&self, _query: &str, _index: usize) {}

    fn query_completed(&self, _query: &str, _index: usize, _elapsed: Duration, _result_count: usize) {}

    fn query_timed_out(&self, _query: &str, _index: usize) {}

    fn query_failed(&self, _query: &str, _index: usize, _error: &ProviderError) {}

    fn batch_summary(&self, _summary: &BatchSummary<'_>) {}
}

/// Reporter that turns every event into a structured tracing event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl SearchReporter for TracingReporter {
    fn queries_skipped(&self, total: usize, skipped: &[String]) {
        info!(
            total,
            skipped = skipped.len(),
            "limiting batch to first {} queries",
            total - skipped.len()
        );
    }

    fn query_started(&self, _query: &str, index: usize) {
        tracing::debug!(index, "query started");
    }

    fn query_completed(&self, _query: &str, index: usize, elapsed: Duration, result_count: usize) {
        info!(
            index,
            elapsed_ms = elapsed.as_millis() as u64,
            result_count,
            "query completed"
        );
    }

    fn query_timed_out(&self, _query: &str, index: usize) {
        warn!(index, "query timed out");
    }

    fn query_failed(&self, _query: &str, index: usize, error: &ProviderError) {
        warn!(index, kind = error.kind(), error = %error, "query failed");
    }

    fn batch_summary(&self, summary: &BatchSummary<'_>) {
        info!(
            elapsed_ms = summary.total_elapsed.as_millis() as u64,
            queries = summary.queries_processed,
            found = summary.total_results_found,
            kept = summary.results_kept,
            "search batch finished"
        );
    }
}

/// Fans every event out to several reporters, in order
#[derive(Clone, Default)]
pub struct ReporterSet {
    reporters: Vec<Arc<dyn SearchReporter>>,
}

impl ReporterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reporter
    pub fn with(mut self, reporter: Arc<dyn SearchReporter>) -> Self {
        self.reporters.push(reporter);
        self
    }

    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }
}

impl SearchReporter for ReporterSet {
    fn queries_skipped(&self, total: usize, skipped: &[String]) {
        for r in &self.reporters {
            r.queries_skipped(total, skipped);
        }
    }

    fn query_started(&self, query: &str, index: usize) {
        for r in &self.reporters {
            r.query_started(query, index);
        }
    }

    fn query_completed(&self, query: &str, index: usize, elapsed: Duration, result_count: usize) {
        for r in &self.reporters {
            r.query_completed(query, index, elapsed, result_count);
        }
    }

    fn query_timed_out(&self, query: &str, index: usize) {
        for r in &self.reporters {
            r.query_timed_out(query, index);
        }
    }

    fn query_failed(&self, query: &str, index: usize, error: &ProviderError) {
        for r in &self.reporters {
            r.query_failed(query, index, error);
        }
    }

    fn batch_summary(&self, summary: &BatchSummary<'_>) {
        for r in &self.reporters {
            r.batch_summary(summary);
        }
    }
}
