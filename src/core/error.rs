//! Error types and handling for the MCP server.
//!
//! This module defines the unified error type for startup and serving.
//! Per-call failures never reach it: they are reported to the client as MCP
//! errors (see `domains::tools::ToolError`).

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The Tavus API client could not be built.
    #[error("Tavus client error: {0}")]
    Client(#[from] super::client::ApiError),

    /// Error raised while serving over a transport.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
