//! Result type definitions

use crate::ELLIPSIS;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A single normalized search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The title of the result page
    pub title: String,
    /// The URL of the result
    pub url: String,
    /// Snippet, truncated to the configured limit
    pub content: String,
    /// Provider relevance score; higher is more relevant, never normalized
    pub score: f64,
}

impl SearchResult {
    /// Create a new result, truncating `content` to `content_limit` characters
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        content: &str,
        score: f64,
        content_limit: usize,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: truncate_content(content, content_limit).into_owned(),
            score,
        }
    }

    /// Re-apply snippet truncation in place
    pub fn normalize(&mut self, content_limit: usize) {
        if let Cow::Owned(truncated) = truncate_content(&self.content, content_limit) {
            self.content = truncated;
        }
    }

    /// Score used for ranking; NaN ranks below every real score
    pub fn rank_key(&self) -> f64 {
        if self.score.is_nan() {
            f64::NEG_INFINITY
        } else {
            self.score
        }
    }
}

/// Cut `content` to `limit` characters and append the ellipsis marker.
///
/// Content at or under the limit is borrowed back unchanged. Applying this to
/// already-truncated content yields the same string, so callers may run it
/// more than once.
pub fn truncate_content(content: &str, limit: usize) -> Cow<'_, str> {
    match content.char_indices().nth(limit) {
        None => Cow::Borrowed(content),
        Some((cut, _)) => {
            // Already cut at this limit by an earlier pass
            if &content[cut..] == ELLIPSIS {
                return Cow::Borrowed(content);
            }
            let mut truncated = String::with_capacity(cut + ELLIPSIS.len());
            truncated.push_str(&content[..cut]);
            truncated.push_str(ELLIPSIS);
            Cow::Owned(truncated)
        }
    }
}
