//! Tool handler trait.
//!
//! Every Tavus tool is a unit type implementing [`ToolHandler`]: a name, a
//! description, a typed parameter struct (whose JSON Schema becomes the tool's
//! input schema) and an async `execute` that performs one API call.

use rmcp::{
    ErrorData as McpError,
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use super::error::ToolError;
use crate::core::client::TavusClient;

/// A single MCP tool backed by one Tavus API endpoint.
#[async_trait::async_trait]
pub trait ToolHandler {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Typed input; its schema is published in the tool catalogue.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Perform the API call and shape the response.
    async fn execute(params: Self::Params, client: &TavusClient)
    -> Result<CallToolResult, ToolError>;

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Self::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

/// Deserialize the raw arguments into the tool's params and execute it.
///
/// A shape mismatch is reported as `invalid_params` before any request is made.
pub async fn invoke<T: ToolHandler>(
    arguments: Option<JsonObject>,
    client: &TavusClient,
) -> Result<CallToolResult, McpError> {
    let args = serde_json::Value::Object(arguments.unwrap_or_default());
    let params: T::Params = serde_json::from_value(args)
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

    T::execute(params, client).await.map_err(McpError::from)
}
