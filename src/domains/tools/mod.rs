//! Tools domain module.
//!
//! Each MCP tool maps to exactly one Tavus API endpoint.
//!
//! ## Architecture
//!
//! - `definitions/` - Tool implementations, one module per Tavus resource
//! - `handlers.rs` - The `ToolHandler` trait and argument decoding
//! - `registry.rs` - Tool catalogue and call dispatch
//! - `error.rs` - Tool-specific error types and their MCP error mapping
//!
//! ## Adding a New Tool
//!
//! 1. Add a unit type implementing `ToolHandler` in the resource module
//! 2. Export it in `definitions/mod.rs`
//! 3. Add it to `tool_names`, `get_all_tools` and `call_tool` in `registry.rs`

pub mod definitions;
mod error;
mod handlers;
mod registry;

pub use error::ToolError;
pub use handlers::{ToolHandler, invoke};
pub use registry::ToolRegistry;
