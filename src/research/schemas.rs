//! Agent-facing input and output schemas

use crate::results::{ResultSet, SearchResult};
use serde::{Deserialize, Serialize};

/// Queries produced by the query-creation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateQueryOutput {
    /// Search queries to pass straight to the search step
    pub queries: Vec<String>,
}

/// Arguments of the query-creation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateQueryInput {
    /// The user's original question about a company
    pub query: String,
    /// Queries the agent generated for it
    #[serde(default)]
    pub queries: Vec<String>,
}

/// Arguments of the search step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSearchInput {
    pub queries: Vec<String>,
}

/// Ranked results handed back to the agent for summarising
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSearchOutput {
    pub results: Vec<SearchResult>,
}

impl From<ResultSet> for TargetSearchOutput {
    fn from(set: ResultSet) -> Self {
        Self {
            results: set.into_results(),
        }
    }
}

/// One node of the research mindmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindmapNode {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MindmapNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl MindmapNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: None,
            image_url: None,
        }
    }

    /// Append a child node
    pub fn with_child(mut self, child: MindmapNode) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    fn children(&self) -> &[MindmapNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(MindmapNode::node_count).sum::<usize>()
    }

    /// Levels in this subtree; a leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(MindmapNode::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Final structured output of a research run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyResearchOutput {
    pub markdown_summary: String,
    pub mindmap: MindmapNode,
}

impl CompanyResearchOutput {
    /// Parse the agent's final output, tolerating a surrounding code fence
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(strip_code_fence(text))
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.strip_prefix("json").unwrap_or(rest);
    body.strip_suffix("```").unwrap_or(body).trim()
}
