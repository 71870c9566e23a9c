//! Human-readable progress output for the command line

use super::{BatchSummary, SearchReporter};
use crate::error::ProviderError;
use std::fmt::Write as _;
use std::time::Duration;

/// Results listed per query in the breakdown
const PREVIEW_PER_QUERY: usize = 2;

/// Prints batch progress to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Numbered list of the queries about to be searched
    pub fn format_query_list(queries: &[String]) -> String {
        let mut out = format!("Starting search for {} queries:\n", queries.len());
        for (i, query) in queries.iter().enumerate() {
            let _ = writeln!(out, "  Query {}: '{}'", i + 1, query);
        }
        out
    }

    /// Summary block followed by the per-query breakdown
    pub fn format_summary(summary: &BatchSummary<'_>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Search summary:");
        let _ = writeln!(out, "  Total time: {:.2} seconds", summary.total_elapsed.as_secs_f64());
        let _ = writeln!(out, "  Queries processed: {}", summary.queries_processed);
        let _ = writeln!(out, "  Total results found: {}", summary.total_results_found);
        let _ = writeln!(out, "  Filtered to top: {} results", summary.results_kept);

        let _ = writeln!(out, "Results by query:");
        for outcome in summary.by_query {
            let _ = writeln!(out, "  Query {}: '{}'", outcome.index, outcome.query);
            let _ = writeln!(out, "    Found {} results", outcome.results.len());
            for (j, result) in outcome.results.iter().take(PREVIEW_PER_QUERY).enumerate() {
                let _ = writeln!(out, "    {}. {}", j + 1, result.title);
                let _ = writeln!(out, "       URL: {}", result.url);
            }
            if outcome.results.len() > PREVIEW_PER_QUERY {
                let _ = writeln!(
                    out,
                    "       ... and {} more results",
                    outcome.results.len() - PREVIEW_PER_QUERY
                );
            }
        }
        out
    }
}

impl SearchReporter for ConsoleReporter {
    fn queries_skipped(&self, total: usize, skipped: &[String]) {
        println!(
            "Limiting to first {} queries for performance (out of {} total)",
            total - skipped.len(),
            total
        );
    }

    fn query_started(&self, query: &str, index: usize) {
        println!("Searching for query {}: '{}'...", index, query);
    }

    fn query_completed(&self, query: &str, index: usize, elapsed: Duration, result_count: usize) {
        println!(
            "Query {} '{}' completed in {:.2} seconds with {} results",
            index,
            query,
            elapsed.as_secs_f64(),
            result_count
        );
    }

    fn query_timed_out(&self, query: &str, index: usize) {
        println!("Search timed out for query {}: '{}'", index, query);
    }

    fn query_failed(&self, query: &str, index: usize, error: &ProviderError) {
        println!("Error searching for query {}: '{}' - {}", index, query, error);
    }

    fn batch_summary(&self, summary: &BatchSummary<'_>) {
        print!("\n{}", Self::format_summary(summary));
    }
}
