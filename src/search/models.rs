//! Query plan and per-query outcome models

use crate::error::ProviderError;
use crate::results::SearchResult;
use serde::Serialize;
use std::time::Duration;

/// Input queries split into the dispatched head and the skipped tail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    /// Queries that will be sent to the provider, in input order
    pub dispatched: Vec<String>,
    /// Queries past the limit, never sent
    pub skipped: Vec<String>,
}

impl QueryPlan {
    /// Keep the first `max_queries` entries of `queries`
    pub fn new<S: AsRef<str>>(queries: &[S], max_queries: usize) -> Self {
        let split = queries.len().min(max_queries);
        let owned = |qs: &[S]| -> Vec<String> {
            qs.iter().map(|q| q.as_ref().to_string()).collect()
        };
        Self {
            dispatched: owned(&queries[..split]),
            skipped: owned(&queries[split..]),
        }
    }

    /// Total number of input queries
    pub fn total(&self) -> usize {
        self.dispatched.len() + self.skipped.len()
    }

    pub fn is_truncated(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// How a single query's provider call ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "error")]
pub enum QueryStatus {
    Completed,
    TimedOut,
    Failed(String),
}

impl QueryStatus {
    pub fn from_error(error: &ProviderError) -> Self {
        match error {
            ProviderError::Timeout => Self::TimedOut,
            other => Self::Failed(other.to_string()),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Result of one query's provider call, tied to its input position
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    /// The query text
    pub query: String,
    /// 1-based position in the input list
    pub index: usize,
    pub status: QueryStatus,
    /// Time from dispatch to settle
    #[serde(skip)]
    pub elapsed: Duration,
    /// Results of this query; empty on timeout or failure
    pub results: Vec<SearchResult>,
}

/// Everything one dispatch produced
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// One entry per dispatched query, in input order
    pub outcomes: Vec<QueryOutcome>,
    /// Queries that were not dispatched
    pub skipped: Vec<String>,
    /// Wall-clock time of the dispatch
    pub elapsed: Duration,
}

impl DispatchOutcome {
    /// Results found across all queries
    pub fn total_results(&self) -> usize {
        self.outcomes.iter().map(|o| o.results.len()).sum()
    }

    /// Queries whose call timed out
    pub fn timed_out(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == QueryStatus::TimedOut)
            .count()
    }

    /// Queries whose call failed for any reason other than a timeout
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, QueryStatus::Failed(_)))
            .count()
    }
}
