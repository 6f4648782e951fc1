//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The tool catalogue returned by `list_tools`
//! - Dispatch of `call_tool` requests by tool name

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, JsonObject, Tool},
};
use tracing::{debug, warn};

use super::ToolError;
use super::definitions::*;
use super::handlers::{ToolHandler, invoke};
use crate::core::client::TavusClient;

/// Tool registry - owns the catalogue and the shared API client.
pub struct ToolRegistry {
    client: Arc<TavusClient>,
    tools: Arc<[Tool]>,
}

impl ToolRegistry {
    /// Create a new tool registry. The catalogue is built once here.
    pub fn new(client: Arc<TavusClient>) -> Self {
        Self {
            client,
            tools: Self::get_all_tools().into(),
        }
    }

    /// The catalogue built at construction, identical on every call.
    pub fn tools(&self) -> Arc<[Tool]> {
        self.tools.clone()
    }

    /// Get all tool names, in catalogue order.
    pub fn tool_names() -> Vec<&'static str> {
        vec![
            CreateReplicaTool::NAME,
            GetReplicaTool::NAME,
            ListReplicasTool::NAME,
            DeleteReplicaTool::NAME,
            RenameReplicaTool::NAME,
            CreateVideoTool::NAME,
            GetVideoTool::NAME,
            ListVideosTool::NAME,
            DeleteVideoTool::NAME,
            RenameVideoTool::NAME,
            CreateConversationTool::NAME,
            GetConversationTool::NAME,
            ListConversationsTool::NAME,
            EndConversationTool::NAME,
            DeleteConversationTool::NAME,
            CreatePersonaTool::NAME,
            GetPersonaTool::NAME,
            ListPersonasTool::NAME,
            PatchPersonaTool::NAME,
            DeletePersonaTool::NAME,
            CreateLipsyncTool::NAME,
            GetLipsyncTool::NAME,
            ListLipsyncsTool::NAME,
            CreateSpeechTool::NAME,
            GetSpeechTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for the catalogue order.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            CreateReplicaTool::to_tool(),
            GetReplicaTool::to_tool(),
            ListReplicasTool::to_tool(),
            DeleteReplicaTool::to_tool(),
            RenameReplicaTool::to_tool(),
            CreateVideoTool::to_tool(),
            GetVideoTool::to_tool(),
            ListVideosTool::to_tool(),
            DeleteVideoTool::to_tool(),
            RenameVideoTool::to_tool(),
            CreateConversationTool::to_tool(),
            GetConversationTool::to_tool(),
            ListConversationsTool::to_tool(),
            EndConversationTool::to_tool(),
            DeleteConversationTool::to_tool(),
            CreatePersonaTool::to_tool(),
            GetPersonaTool::to_tool(),
            ListPersonasTool::to_tool(),
            PatchPersonaTool::to_tool(),
            DeletePersonaTool::to_tool(),
            CreateLipsyncTool::to_tool(),
            GetLipsyncTool::to_tool(),
            ListLipsyncsTool::to_tool(),
            CreateSpeechTool::to_tool(),
            GetSpeechTool::to_tool(),
        ]
    }

    /// Dispatch a tool call to the appropriate handler.
    ///
    /// Unknown names fail with `METHOD_NOT_FOUND` without touching the network.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Dispatching tool call: {}", name);
        let client = self.client.as_ref();

        match name {
            CreateReplicaTool::NAME => invoke::<CreateReplicaTool>(arguments, client).await,
            GetReplicaTool::NAME => invoke::<GetReplicaTool>(arguments, client).await,
            ListReplicasTool::NAME => invoke::<ListReplicasTool>(arguments, client).await,
            DeleteReplicaTool::NAME => invoke::<DeleteReplicaTool>(arguments, client).await,
            RenameReplicaTool::NAME => invoke::<RenameReplicaTool>(arguments, client).await,
            CreateVideoTool::NAME => invoke::<CreateVideoTool>(arguments, client).await,
            GetVideoTool::NAME => invoke::<GetVideoTool>(arguments, client).await,
            ListVideosTool::NAME => invoke::<ListVideosTool>(arguments, client).await,
            DeleteVideoTool::NAME => invoke::<DeleteVideoTool>(arguments, client).await,
            RenameVideoTool::NAME => invoke::<RenameVideoTool>(arguments, client).await,
            CreateConversationTool::NAME => {
                invoke::<CreateConversationTool>(arguments, client).await
            }
            GetConversationTool::NAME => invoke::<GetConversationTool>(arguments, client).await,
            ListConversationsTool::NAME => {
                invoke::<ListConversationsTool>(arguments, client).await
            }
            EndConversationTool::NAME => invoke::<EndConversationTool>(arguments, client).await,
            DeleteConversationTool::NAME => {
                invoke::<DeleteConversationTool>(arguments, client).await
            }
            CreatePersonaTool::NAME => invoke::<CreatePersonaTool>(arguments, client).await,
            GetPersonaTool::NAME => invoke::<GetPersonaTool>(arguments, client).await,
            ListPersonasTool::NAME => invoke::<ListPersonasTool>(arguments, client).await,
            PatchPersonaTool::NAME => invoke::<PatchPersonaTool>(arguments, client).await,
            DeletePersonaTool::NAME => invoke::<DeletePersonaTool>(arguments, client).await,
            CreateLipsyncTool::NAME => invoke::<CreateLipsyncTool>(arguments, client).await,
            GetLipsyncTool::NAME => invoke::<GetLipsyncTool>(arguments, client).await,
            ListLipsyncsTool::NAME => invoke::<ListLipsyncsTool>(arguments, client).await,
            CreateSpeechTool::NAME => invoke::<CreateSpeechTool>(arguments, client).await,
            GetSpeechTool::NAME => invoke::<GetSpeechTool>(arguments, client).await,
            _ => {
                warn!(available = ?Self::tool_names(), "Unknown tool requested: {}", name);
                Err(ToolError::not_found(name).into())
            }
        }
    }
}
