//! Ranked, size-capped result set built from per-query result lists

use super::types::SearchResult;
use serde::Serialize;
use std::cmp::Ordering;

/// Aggregated results of one search batch
///
/// Sorted descending by score, capped at a fixed size. Built once by
/// [`ResultSet::aggregate`] and read-only afterwards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultSet {
    results: Vec<SearchResult>,
    #[serde(skip)]
    total_found: usize,
}

impl ResultSet {
    /// Flatten, normalize, rank and cap per-query result lists.
    ///
    /// Lists are concatenated in the order given. Ties on score keep their
    /// flattened order, so the output is deterministic for deterministic
    /// provider scores.
    pub fn aggregate<I>(lists: I, max_results: usize, content_limit: usize) -> Self
    where
        I: IntoIterator<Item = Vec<SearchResult>>,
    {
        let mut results: Vec<SearchResult> = lists.into_iter().flatten().collect();

        for result in &mut results {
            result.normalize(content_limit);
        }

        // sort_by is stable
        results.sort_by(|a, b| {
            b.rank_key()
                .partial_cmp(&a.rank_key())
                .unwrap_or(Ordering::Equal)
        });

        let total_found = results.len();
        results.truncate(max_results);

        Self {
            results,
            total_found,
        }
    }

    /// Ranked results
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Number of results kept after capping
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of results found across all queries before capping
    pub fn total_found(&self) -> usize {
        self.total_found
    }

    /// Number of results dropped by the size cap
    pub fn discarded(&self) -> usize {
        self.total_found - self.results.len()
    }

    /// Take ownership of the ranked results
    pub fn into_results(self) -> Vec<SearchResult> {
        self.results
    }
}

impl IntoIterator for ResultSet {
    type Item = SearchResult;
    type IntoIter = std::vec::IntoIter<SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}
