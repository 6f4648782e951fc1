//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use rmcp::model::ErrorCode;
use thiserror::Error;

use crate::core::client::ApiError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not in the catalogue.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// The arguments do not match the tool's input schema.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The Tavus API rejected the request or could not be reached.
    #[error("Tavus API error: {0}")]
    Upstream(String),

    /// Any other failure while handling the call.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}

impl From<ApiError> for ToolError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Upstream { .. } | ApiError::Transport(_) => Self::Upstream(err.to_string()),
            ApiError::Decode(_) | ApiError::InvalidUrl(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        let message = err.to_string();
        match err {
            ToolError::NotFound(_) => McpError::new(ErrorCode::METHOD_NOT_FOUND, message, None),
            ToolError::InvalidArguments(_) => McpError::invalid_params(message, None),
            ToolError::Upstream(_) | ToolError::Internal(_) => {
                McpError::internal_error(message, None)
            }
        }
    }
}
