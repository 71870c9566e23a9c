//! Bounded concurrent dispatch of search queries

use super::models::{DispatchOutcome, QueryOutcome, QueryPlan, QueryStatus};
use crate::config::SearchSettings;
use crate::error::ProviderError;
use crate::providers::ProviderCall;
use crate::report::SearchReporter;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{debug, info, warn, Instrument};

/// Dispatcher that runs one provider call per query
///
/// Within one dispatch at most `max_concurrency` calls are in flight at once,
/// each call is bounded by `timeout`, and a failing or slow query only empties
/// its own slot. Concurrent dispatches never wait on each other.
pub struct Dispatcher {
    /// Provider-call wrapper
    call: ProviderCall,
    /// Calls allowed in flight per dispatch
    max_concurrency: usize,
    /// Queries past this count are skipped
    max_queries: usize,
    /// Per-call timeout
    timeout: Duration,
    /// Optional progress observer
    reporter: Option<Arc<dyn SearchReporter>>,
}

impl Dispatcher {
    /// Create a dispatcher with the default limits
    pub fn new(call: ProviderCall) -> Self {
        Self {
            call,
            max_concurrency: crate::MAX_CONCURRENCY,
            max_queries: crate::MAX_QUERIES,
            timeout: Duration::from_secs_f64(crate::QUERY_TIMEOUT_SECS),
            reporter: None,
        }
    }

    /// Apply the limits from search settings
    pub fn with_settings(self, settings: &SearchSettings) -> Self {
        self.with_max_queries(settings.max_queries)
            .with_max_concurrency(settings.max_concurrency)
            .with_timeout(settings.timeout())
    }

    /// Set the number of queries dispatched per batch
    pub fn with_max_queries(mut self, max_queries: usize) -> Self {
        self.max_queries = max_queries;
        self
    }

    /// Set the number of provider calls allowed in flight
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Set the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attach a progress reporter
    pub fn with_reporter(mut self, reporter: Arc<dyn SearchReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn max_queries(&self) -> usize {
        self.max_queries
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn reporter(&self) -> Option<&Arc<dyn SearchReporter>> {
        self.reporter.as_ref()
    }

    /// Dispatch `queries` and wait for every call to settle.
    ///
    /// Outcomes come back in input order whatever the completion order.
    /// Never fails: timeouts and provider errors become empty outcomes.
    pub async fn dispatch<S: AsRef<str>>(&self, queries: &[S]) -> DispatchOutcome {
        let start = Instant::now();
        let plan = QueryPlan::new(queries, self.max_queries);

        if plan.is_truncated() {
            info!(
                "Limiting to first {} queries (out of {} total)",
                plan.dispatched.len(),
                plan.total()
            );
            if let Some(reporter) = &self.reporter {
                reporter.queries_skipped(plan.total(), &plan.skipped);
            }
        }

        // Admission is scoped to this batch
        let admission = Arc::new(Semaphore::new(self.max_concurrency));

        // Each task owns its slot; slots are combined only after all settle
        let handles: Vec<_> = plan
            .dispatched
            .iter()
            .enumerate()
            .map(|(i, query)| {
                let task = QueryTask {
                    call: self.call.clone(),
                    admission: admission.clone(),
                    timeout: self.timeout,
                    reporter: self.reporter.clone(),
                };
                let query = query.clone();
                tokio::spawn(task.run(query, i + 1).in_current_span())
            })
            .collect();

        let settled = join_all(handles).await;

        let outcomes = settled
            .into_iter()
            .zip(&plan.dispatched)
            .enumerate()
            .map(|(i, (joined, query))| {
                joined.unwrap_or_else(|e| {
                    warn!(index = i + 1, "search task aborted: {}", e);
                    QueryOutcome {
                        query: query.clone(),
                        index: i + 1,
                        status: QueryStatus::Failed(format!("search task aborted: {}", e)),
                        elapsed: start.elapsed(),
                        results: Vec::new(),
                    }
                })
            })
            .collect();

        DispatchOutcome {
            outcomes,
            skipped: plan.skipped,
            elapsed: start.elapsed(),
        }
    }
}

/// State moved into one spawned query task
struct QueryTask {
    call: ProviderCall,
    admission: Arc<Semaphore>,
    timeout: Duration,
    reporter: Option<Arc<dyn SearchReporter>>,
}

impl QueryTask {
    async fn run(self, query: String, index: usize) -> QueryOutcome {
        let start = Instant::now();
        debug!(index, query = %query, "Searching");
        if let Some(reporter) = &self.reporter {
            reporter.query_started(&query, index);
        }

        let settled = match self.admission.acquire().await {
            Ok(permit) => {
                let result = timeout(self.timeout, self.call.call(&query)).await;
                drop(permit);
                result.unwrap_or(Err(ProviderError::Timeout))
            }
            Err(_) => Err(ProviderError::Network("admission closed".to_string())),
        };

        let elapsed = start.elapsed();

        let (status, results) = match settled {
            Ok(results) => {
                debug!(
                    index,
                    count = results.len(),
                    "Query completed in {:?}",
                    elapsed
                );
                if let Some(reporter) = &self.reporter {
                    reporter.query_completed(&query, index, elapsed, results.len());
                }
                (QueryStatus::Completed, results)
            }
            Err(ProviderError::Timeout) => {
                warn!(index, "Timeout after {:?}", elapsed);
                if let Some(reporter) = &self.reporter {
                    reporter.query_timed_out(&query, index);
                }
                (QueryStatus::TimedOut, Vec::new())
            }
            Err(e) => {
                warn!(index, kind = e.kind(), "Search failed: {}", e);
                if let Some(reporter) = &self.reporter {
                    reporter.query_failed(&query, index, &e);
                }
                (QueryStatus::from_error(&e), Vec::new())
            }
        };

        QueryOutcome {
            query,
            index,
            status,
            elapsed,
            results,
        }
    }
}
