//! Research tools exposed to an agent runtime
//!
//! Two tools make up a research run: `create_query` fixes the agent's query
//! list and `target_search` runs it through the search core.

use super::schemas::{CreateQueryInput, CreateQueryOutput, TargetSearchInput, TargetSearchOutput};
use crate::error::ToolError;
use crate::search::Search;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// The tools an agent can call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    CreateQuery,
    TargetSearch,
}

impl ToolKind {
    pub const ALL: [ToolKind; 2] = [ToolKind::CreateQuery, ToolKind::TargetSearch];

    /// Function name the agent calls the tool by
    pub fn name(self) -> &'static str {
        match self {
            Self::CreateQuery => "create_query",
            Self::TargetSearch => "target_search",
        }
    }

    /// Name shown in progress output
    pub fn display_name(self) -> &'static str {
        match self {
            Self::CreateQuery => "Create Search Queries",
            Self::TargetSearch => "Search based on queries",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Keep the first [`crate::MAX_QUERIES`] of the agent's queries
pub fn create_query(query: &str, mut queries: Vec<String>) -> CreateQueryOutput {
    debug!(query, generated = queries.len(), "create_query");
    queries.truncate(crate::MAX_QUERIES);
    CreateQueryOutput { queries }
}

/// Runs a query list through the search core
#[derive(Clone)]
pub struct TargetSearchTool {
    search: Arc<Search>,
}

impl TargetSearchTool {
    pub fn new(search: Arc<Search>) -> Self {
        Self { search }
    }

    pub async fn call(&self, input: TargetSearchInput) -> TargetSearchOutput {
        self.search.execute(&input.queries).await.into()
    }

    /// Call with raw JSON arguments, as an agent runtime would
    pub async fn call_json(&self, arguments: &str) -> Result<String, ToolError> {
        let input = parse_arguments(arguments)?;
        encode(&self.call(input).await)
    }
}

/// Both research tools behind a single by-name entry point
#[derive(Clone)]
pub struct ResearchTools {
    target_search: TargetSearchTool,
}

impl ResearchTools {
    pub fn new(search: Arc<Search>) -> Self {
        Self {
            target_search: TargetSearchTool::new(search),
        }
    }

    pub fn target_search(&self) -> &TargetSearchTool {
        &self.target_search
    }

    /// Invoke the tool called `name` with JSON `arguments`, returning JSON
    pub async fn invoke(&self, name: &str, arguments: &str) -> Result<String, ToolError> {
        match ToolKind::from_name(name) {
            Some(ToolKind::CreateQuery) => {
                let input: CreateQueryInput = parse_arguments(arguments)?;
                encode(&create_query(&input.query, input.queries))
            }
            Some(ToolKind::TargetSearch) => self.target_search.call_json(arguments).await,
            None => Err(ToolError::UnknownTool(name.to_string())),
        }
    }
}

fn parse_arguments<T: DeserializeOwned>(arguments: &str) -> Result<T, ToolError> {
    serde_json::from_str(arguments).map_err(ToolError::InvalidArguments)
}

fn encode<T: Serialize>(output: &T) -> Result<String, ToolError> {
    serde_json::to_string(output).map_err(ToolError::Encode)
}
