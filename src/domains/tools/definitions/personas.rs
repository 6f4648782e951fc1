//! Persona tools.
//!
//! A persona bundles the system prompt, context and model layers a replica
//! uses in conversations. Endpoints live under `/personas`. Updates use
//! JSON Patch (RFC 6902) operation lists.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use super::common::{NoParams, confirmation_result, json_result, request_body};
use crate::core::client::TavusClient;
use crate::domains::tools::{ToolError, ToolHandler};

const COLLECTION: &str = "personas";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Conversation pipeline a persona runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    /// Full speech-to-text, LLM and text-to-speech pipeline.
    Full,
    /// Replica repeats what it is sent, no LLM.
    Echo,
}

/// Parameters for creating a persona.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreatePersonaParams {
    /// System prompt given to the persona's LLM.
    pub system_prompt: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_mode: Option<PipelineMode>,

    /// Background knowledge the persona can draw on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Replica used when a conversation does not name one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_replica_id: Option<String>,

    /// Knowledge-base documents attached to the persona.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_ids: Option<Vec<String>>,

    /// Layer configuration (llm, tts, stt, perception), passed through as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<Map<String, Value>>,

    /// Additional API fields, forwarded unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters identifying one persona.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PersonaIdParams {
    /// Unique identifier of the persona.
    pub persona_id: String,
}

/// JSON Patch operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
    Replace,
    Copy,
    Move,
    Test,
}

/// One JSON Patch operation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PatchOperation {
    pub op: PatchOp,

    /// JSON Pointer to the target field, e.g. "/layers/llm/model".
    pub path: String,

    /// New value for add, replace and test.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Source pointer for copy and move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

/// Parameters for patching a persona.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PatchPersonaParams {
    /// Unique identifier of the persona.
    pub persona_id: String,

    /// Operations applied in order.
    pub operations: Vec<PatchOperation>,
}

// ============================================================================
// Tool Definitions
// ============================================================================

/// Create a persona.
pub struct CreatePersonaTool;

#[async_trait::async_trait]
impl ToolHandler for CreatePersonaTool {
    const NAME: &'static str = "create_persona";
    const DESCRIPTION: &'static str = "Create a persona: the system prompt, context and model layers \
         that define how a replica behaves in conversations.";
    type Params = CreatePersonaParams;

    #[instrument(skip_all)]
    async fn execute(
        params: CreatePersonaParams,
        client: &TavusClient,
    ) -> Result<CallToolResult, ToolError> {
        info!("Creating persona");
        let body = client.post(&[COLLECTION], &request_body(&params)?).await?;
        json_result(&body)
    }
}

/// Fetch a single persona.
pub struct GetPersonaTool;

#[async_trait::async_trait]
impl ToolHandler for GetPersonaTool {
    const NAME: &'static str = "get_persona";
    const DESCRIPTION: &'static str = "Get details of a persona by its ID.";
    type Params = PersonaIdParams;

    #[instrument(skip_all, fields(persona_id = %params.persona_id))]
    async fn execute(params: PersonaIdParams, client: &TavusClient) -> Result<CallToolResult, ToolError> {
        let body = client
            .get(&[COLLECTION, params.persona_id.as_str()], &[])
            .await?;
        json_result(&body)
    }
}

/// List personas.
pub struct ListPersonasTool;

#[async_trait::async_trait]
impl ToolHandler for ListPersonasTool {
    const NAME: &'static str = "list_personas";
    const DESCRIPTION: &'static str = "List all personas, including stock personas provided by Tavus.";
    type Params = NoParams;

    #[instrument(skip_all)]
    async fn execute(_params: NoParams, client: &TavusClient) -> Result<CallToolResult, ToolError> {
        let body = client.get(&[COLLECTION], &[]).await?;
        json_result(&body)
    }
}

/// Patch a persona with JSON Patch operations.
pub struct PatchPersonaTool;

#[async_trait::async_trait]
impl ToolHandler for PatchPersonaTool {
    const NAME: &'static str = "patch_persona";
    const DESCRIPTION: &'static str = "Update a persona with a list of JSON Patch (RFC 6902) operations, \
         e.g. [{\"op\": \"replace\", \"path\": \"/system_prompt\", \"value\": \"...\"}].";
    type Params = PatchPersonaParams;

    #[instrument(skip_all, fields(persona_id = %params.persona_id, operations = params.operations.len()))]
    async fn execute(
        params: PatchPersonaParams,
        client: &TavusClient,
    ) -> Result<CallToolResult, ToolError> {
        let body = client
            .patch(
                &[COLLECTION, params.persona_id.as_str()],
                &request_body(&params.operations)?,
            )
            .await?;
        json_result(&body)
    }
}

/// Delete a persona.
pub struct DeletePersonaTool;

#[async_trait::async_trait]
impl ToolHandler for DeletePersonaTool {
    const NAME: &'static str = "delete_persona";
    const DESCRIPTION: &'static str = "Delete a persona by its ID.";
    type Params = PersonaIdParams;

    #[instrument(skip_all, fields(persona_id = %params.persona_id))]
    async fn execute(params: PersonaIdParams, client: &TavusClient) -> Result<CallToolResult, ToolError> {
        client
            .delete(&[COLLECTION, params.persona_id.as_str()])
            .await?;
        info!("Deleted persona");
        Ok(confirmation_result(format!(
            "Successfully deleted persona {}",
            params.persona_id
        )))
    }
}

// ============================================================================
// Tests
// ============================================================================
