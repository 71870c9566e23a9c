//! Search provider module
//!
//! Defines the SearchProvider trait, the Tavily implementation, and the
//! call wrapper that turns raw provider payloads into search results.

mod traits;
mod wrapper;

pub mod tavily;

pub use tavily::TavilyProvider;
pub use traits::*;
pub use wrapper::{parse_results, ProviderCall};
