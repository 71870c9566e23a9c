//! company-research: concurrent web search aggregation for company research agents
//!
//! An agent derives a handful of targeted queries about a company; this crate
//! fans them out to a web search provider under a concurrency cap and a
//! per-query timeout, then flattens, ranks and caps the hits so the agent can
//! summarise them.

pub mod config;
pub mod error;
pub mod metrics;
pub mod network;
pub mod providers;
pub mod report;
pub mod research;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use error::{ConfigError, ProviderError, ToolError};
pub use providers::{SearchOptions, SearchProvider};
pub use report::SearchReporter;
pub use results::{ResultSet, SearchResult};
pub use search::{Dispatcher, Search};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Queries dispatched per batch; the rest are skipped
pub const MAX_QUERIES: usize = 3;

/// Provider calls allowed in flight at once
pub const MAX_CONCURRENCY: usize = 5;

/// Per-query timeout in seconds
pub const QUERY_TIMEOUT_SECS: f64 = 10.0;

/// Size cap of the aggregated result set
pub const MAX_RESULTS: usize = 8;

/// Snippet length in characters before truncation
pub const CONTENT_LIMIT: usize = 200;

/// Marker appended to truncated snippets
pub const ELLIPSIS: &str = "...";
