//! Research workflow support
//!
//! Schemas, tools and per-run tool tracking for an agent that researches a
//! company with the search core.

mod schemas;
mod tools;
mod tracker;

pub use schemas::*;
pub use tools::{create_query, ResearchTools, TargetSearchTool, ToolKind};
pub use tracker::{Notice, ToolCallTracker, ToolEvent, TrackerState, PROGRESS_INTERVALS, SEARCH_REMINDER_SECS};
