//! Search orchestration module
//!
//! Fans queries out to the provider under a concurrency cap and a
//! per-query timeout, then aggregates the per-query results.

mod executor;
mod models;
mod pipeline;

pub use executor::Dispatcher;
pub use models::*;
pub use pipeline::{Search, SearchReport};
