//! Metrics collection module
//!
//! Tracks batch counts, per-query outcomes, and provider latency. Plugged in
//! as a [`SearchReporter`] so it sees exactly what the dispatcher reports.

use crate::error::ProviderError;
use crate::report::{BatchSummary, SearchReporter};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

/// Latency samples kept for the rolling average
const LATENCY_WINDOW: usize = 100;

/// Running counters across every batch this process has served
pub struct SearchMetrics {
    /// Batches finished
    pub total_batches: AtomicU64,
    /// Queries dispatched
    total_queries: AtomicU64,
    /// Queries skipped for exceeding the per-batch limit
    skipped_queries: AtomicU64,
    completed: AtomicU64,
    timeouts: AtomicU64,
    results_found: AtomicU64,
    results_kept: AtomicU64,
    /// Failures by error kind
    failures: RwLock<HashMap<&'static str, u64>>,
    /// Latency of completed queries in ms, most recent last
    latencies: RwLock<VecDeque<u64>>,
}

impl SearchMetrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            total_batches: AtomicU64::new(0),
            total_queries: AtomicU64::new(0),
            skipped_queries: AtomicU64::new(0),
            completed: AtomicU64::new(0),
            timeouts: AtomicU64::new(0),
            results_found: AtomicU64::new(0),
            results_kept: AtomicU64::new(0),
            failures: RwLock::new(HashMap::new()),
            latencies: RwLock::new(VecDeque::with_capacity(LATENCY_WINDOW)),
        }
    }

    /// Record the latency of a completed query
    pub fn record_latency(&self, time_ms: u64) {
        let mut latencies = write(&self.latencies);
        if latencies.len() >= LATENCY_WINDOW {
            latencies.pop_front();
        }
        latencies.push_back(time_ms);
    }

    /// Record a failed query under its error kind
    pub fn record_failure(&self, kind: &'static str) {
        let mut failures = write(&self.failures);
        *failures.entry(kind).or_insert(0) += 1;
    }

    /// Get average latency over the rolling window
    pub fn avg_latency(&self) -> Option<u64> {
        let latencies = read(&self.latencies);
        if latencies.is_empty() {
            None
        } else {
            Some(latencies.iter().sum::<u64>() / latencies.len() as u64)
        }
    }

    /// Share of settled queries that completed, as a percentage
    pub fn success_rate(&self) -> f64 {
        let completed = self.completed.load(Ordering::Relaxed);
        let settled = completed
            + self.timeouts.load(Ordering::Relaxed)
            + read(&self.failures).values().sum::<u64>();
        if settled == 0 {
            100.0
        } else {
            (completed as f64 / settled as f64) * 100.0
        }
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_batches: self.total_batches.load(Ordering::Relaxed),
            total_queries: self.total_queries.load(Ordering::Relaxed),
            skipped_queries: self.skipped_queries.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            failures: read(&self.failures)
                .iter()
                .map(|(kind, count)| (kind.to_string(), *count))
                .collect(),
            results_found: self.results_found.load(Ordering::Relaxed),
            results_kept: self.results_kept.load(Ordering::Relaxed),
            avg_latency_ms: self.avg_latency(),
            success_rate: self.success_rate(),
        }
    }
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

// A panic while holding one of these locks leaves plain counters behind, so
// the data is still usable.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SearchReporter for SearchMetrics {
    fn queries_skipped(&self, _total: usize, skipped: &[String]) {
        self.skipped_queries
            .fetch_add(skipped.len() as u64, Ordering::Relaxed);
    }

    fn query_started(&self, _query: &str, _index: usize) {
        self.total_queries.fetch_add(1, Ordering::Relaxed);
    }

    fn query_completed(&self, _query: &str, _index: usize, elapsed: Duration, _result_count: usize) {
        self.completed.fetch_add(1, Ordering::Relaxed);
        self.record_latency(elapsed.as_millis() as u64);
    }

    fn query_timed_out(&self, _query: &str, _index: usize) {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    fn query_failed(&self, _query: &str, _index: usize, error: &ProviderError) {
        self.record_failure(error.kind());
    }

    fn batch_summary(&self, summary: &BatchSummary<'_>) {
        self.total_batches.fetch_add(1, Ordering::Relaxed);
        self.results_found
            .fetch_add(summary.total_results_found as u64, Ordering::Relaxed);
        self.results_kept
            .fetch_add(summary.results_kept as u64, Ordering::Relaxed);
    }
}

/// Serializable view of [`SearchMetrics`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub total_batches: u64,
    pub total_queries: u64,
    pub skipped_queries: u64,
    pub completed: u64,
    pub timeouts: u64,
    pub failures: HashMap<String, u64>,
    pub results_found: u64,
    pub results_kept: u64,
    pub avg_latency_ms: Option<u64>,
    pub success_rate: f64,
}
