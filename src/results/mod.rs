//! Result types and aggregation for search results
//!
//! Defines the normalized search hit and the ranked, capped result set.

mod container;
mod types;

pub use container::ResultSet;
pub use types::*;
