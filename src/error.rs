//! Error types for company-research.
//!
//! Display strings are stable and never include API keys or request bodies.

/// Failure of a single provider call.
///
/// The dispatcher recovers every variant locally: the affected query yields
/// no results and the batch carries on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a non-success status.
    #[error("HTTP error: {0}")]
    Http(u16),

    /// The provider rejected the call with 429 Too Many Requests.
    #[error("rate limited by provider")]
    RateLimited,

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The call exceeded the per-query time budget.
    #[error("provider call timed out")]
    Timeout,
}

impl ProviderError {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network_error",
            Self::Http(_) => "http_error",
            Self::RateLimited => "too_many_requests",
            Self::Parse(_) => "parse_error",
            Self::Timeout => "timeout",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Http(status.as_u16())
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Errors raised while building the search stack from settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A credential the provider needs was not configured.
    #[error("missing API key: {0}")]
    MissingApiKey(String),

    /// A setting holds a value the search stack cannot run with.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors from invoking a research tool with raw JSON arguments.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The arguments did not match the tool's input schema.
    #[error("invalid tool arguments: {0}")]
    InvalidArguments(#[source] serde_json::Error),

    /// The tool output could not be encoded.
    #[error("failed to encode tool output: {0}")]
    Encode(#[source] serde_json::Error),

    /// The agent named a tool this crate does not provide.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}
