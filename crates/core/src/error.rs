//! Error types for the PaperLens domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant. None of these are fatal
//! to the reasoning loop: every adapter recovers them at its own boundary.

use thiserror::Error;

/// The top-level error type for all PaperLens operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Graph store errors ---
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Query generation errors ---
    #[error("Query generation error: {0}")]
    QueryGeneration(#[from] QueryGenerationError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Error)]
pub enum GraphError {
    #[error("Graph store unreachable: {0}")]
    Connection(String),

    #[error("Query failed [{code}]: {message}")]
    QueryFailed { code: String, message: String },

    #[error("Graph store returned status {status_code}: {message}")]
    Http { status_code: u16, message: String },

    #[error("Malformed graph response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid tool arguments for {tool_name}: {reason}")]
    InvalidArguments { tool_name: String, reason: String },

    #[error("Tool execution failed: {tool_name}: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },
}

impl ToolError {
    /// Whether this error means the arguments did not fit the tool's contract.
    pub fn is_argument_mismatch(&self) -> bool {
        matches!(self, ToolError::InvalidArguments { .. })
    }
}

impl From<GraphError> for ToolError {
    fn from(err: GraphError) -> Self {
        ToolError::ExecutionFailed {
            tool_name: "graph".into(),
            reason: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryGenerationError {
    #[error("Could not extract a query from the model output after retry")]
    ParseFailed,

    #[error("Model output had no usable query field")]
    MissingQuery,

    #[error("Unsafe query blocked: contains write operation '{keyword}'")]
    Unsafe { keyword: String },
}
