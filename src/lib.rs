//! Tavus MCP Server Library
//!
//! This crate exposes the Tavus video/avatar REST API as Model Context
//! Protocol (MCP) tools, so MCP clients can manage replicas, videos,
//! conversations, personas, lipsync jobs and speech through tool calls.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the Tavus API client, the MCP
//!   server handler and the stdio transport
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: the tool catalogue, dispatcher and one handler per tool
//!
//! # Example
//!
//! ```rust,no_run
//! use tavus_mcp_server::core::{Config, McpServer, StdioTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config)?;
//!     StdioTransport::run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, McpServer, Result};
