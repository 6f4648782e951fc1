//! Domains module containing business logic organized by bounded contexts.
//!
//! The server currently has a single domain, `tools`: every Tavus operation
//! is exposed as an MCP tool.

pub mod tools;
