//! Conversation tools.
//!
//! A conversation is a live video call with a replica, optionally driven by a
//! persona. Endpoints live under `/conversations`; ending a call is a `POST`
//! to the `/end` sub-path.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use super::common::{NoParams, confirmation_result, json_result, request_body, verbose_query};
use crate::core::client::TavusClient;
use crate::domains::tools::{ToolError, ToolHandler};

const COLLECTION: &str = "conversations";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Optional call settings for a conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ConversationProperties {
    /// Maximum call length in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_call_duration: Option<u32>,

    /// Seconds to keep the call open after the participant leaves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_left_timeout: Option<u32>,

    /// Seconds to wait for a participant to join before ending the call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_absent_timeout: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_recording: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_closed_captions: Option<bool>,

    /// Replace the replica background with a green screen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_greenscreen: Option<bool>,

    /// Conversation language (full name, e.g. "english", or "multilingual").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_s3_bucket_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_s3_bucket_region: Option<String>,

    /// IAM role Tavus assumes to write recordings to the bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_assume_role_arn: Option<String>,

    /// Additional API fields, forwarded unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for starting a conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CreateConversationParams {
    /// Replica to talk to. Falls back to the persona's default replica.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_id: Option<String>,

    /// Persona that drives the replica's behaviour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona_id: Option<String>,

    /// URL that receives conversation event callbacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_name: Option<String>,

    /// Extra context appended to the persona's prompt for this call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversational_context: Option<String>,

    /// First sentence the replica says when the participant joins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_greeting: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ConversationProperties>,

    /// Additional API fields, forwarded unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters identifying one conversation.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConversationIdParams {
    /// Unique identifier of the conversation.
    pub conversation_id: String,
}

/// Parameters for fetching a single conversation.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetConversationParams {
    /// Unique identifier of the conversation.
    pub conversation_id: String,

    /// Include the conversation transcript and events.
    #[serde(default)]
    pub verbose: Option<bool>,
}

// ============================================================================
// Tool Definitions
// ============================================================================

/// Start a conversation.
pub struct CreateConversationTool;

#[async_trait::async_trait]
impl ToolHandler for CreateConversationTool {
    const NAME: &'static str = "create_conversation";
    const DESCRIPTION: &'static str = "Start a real-time video conversation with a replica. \
         Returns the conversation ID and the URL participants join.";
    type Params = CreateConversationParams;

    #[instrument(skip_all)]
    async fn execute(
        params: CreateConversationParams,
        client: &TavusClient,
    ) -> Result<CallToolResult, ToolError> {
        info!("Creating conversation");
        let body = client.post(&[COLLECTION], &request_body(&params)?).await?;
        json_result(&body)
    }
}

/// Fetch a single conversation.
pub struct GetConversationTool;

#[async_trait::async_trait]
impl ToolHandler for GetConversationTool {
    const NAME: &'static str = "get_conversation";
    const DESCRIPTION: &'static str = "Get details of a conversation by its ID, including its status.";
    type Params = GetConversationParams;

    #[instrument(skip_all, fields(conversation_id = %params.conversation_id))]
    async fn execute(
        params: GetConversationParams,
        client: &TavusClient,
    ) -> Result<CallToolResult, ToolError> {
        let body = client
            .get(
                &[COLLECTION, params.conversation_id.as_str()],
                &verbose_query(params.verbose),
            )
            .await?;
        json_result(&body)
    }
}

/// List conversations.
pub struct ListConversationsTool;

#[async_trait::async_trait]
impl ToolHandler for ListConversationsTool {
    const NAME: &'static str = "list_conversations";
    const DESCRIPTION: &'static str = "List all conversations created with this API key.";
    type Params = NoParams;

    #[instrument(skip_all)]
    async fn execute(_params: NoParams, client: &TavusClient) -> Result<CallToolResult, ToolError> {
        let body = client.get(&[COLLECTION], &[]).await?;
        json_result(&body)
    }
}

/// End an active conversation.
pub struct EndConversationTool;

#[async_trait::async_trait]
impl ToolHandler for EndConversationTool {
    const NAME: &'static str = "end_conversation";
    const DESCRIPTION: &'static str = "End an active conversation. Participants are disconnected.";
    type Params = ConversationIdParams;

    #[instrument(skip_all, fields(conversation_id = %params.conversation_id))]
    async fn execute(
        params: ConversationIdParams,
        client: &TavusClient,
    ) -> Result<CallToolResult, ToolError> {
        let body = client
            .post_empty(&[COLLECTION, params.conversation_id.as_str(), "end"])
            .await?;
        info!("Ended conversation");
        json_result(&body)
    }
}

/// Delete a conversation.
pub struct DeleteConversationTool;

#[async_trait::async_trait]
impl ToolHandler for DeleteConversationTool {
    const NAME: &'static str = "delete_conversation";
    const DESCRIPTION: &'static str = "Delete a conversation by its ID.";
    type Params = ConversationIdParams;

    #[instrument(skip_all, fields(conversation_id = %params.conversation_id))]
    async fn execute(
        params: ConversationIdParams,
        client: &TavusClient,
    ) -> Result<CallToolResult, ToolError> {
        client
            .delete(&[COLLECTION, params.conversation_id.as_str()])
            .await?;
        info!("Deleted conversation");
        Ok(confirmation_result(format!(
            "Successfully deleted conversation {}",
            params.conversation_id
        )))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::super::common::testing::{call, mock_upstream, text_of};
    use super::*;
    use rmcp::model::ErrorCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_create_conversation() {
        let (server, client) = mock_upstream().await;
        Mock::given(method("POST"))
            .and(path("/conversations"))
            .and(body_json(json!({
                "replica_id": "r_1",
                "persona_id": "p_1",
                "properties": {"max_call_duration": 600, "enable_recording": false}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "conversation_id": "c_1",
                "conversation_url": "https://tavus.daily.co/c_1",
                "status": "active"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = call::<CreateConversationTool>(
            &client,
            json!({
                "replica_id": "r_1",
                "persona_id": "p_1",
                "properties": {"max_call_duration": 600, "enable_recording": false}
            }),
        )
        .await
        .unwrap();
        assert!(text_of(&result).contains("conversation_url"));
    }

    #[tokio::test]
    async fn test_create_conversation_forwards_unlisted_fields() {
        let (server, client) = mock_upstream().await;
        let arguments = json!({
            "replica_id": "r_1",
            "test_mode": true,
            "properties": {"enable_transcription": true, "max_call_duration": 60}
        });
        Mock::given(method("POST"))
            .and(path("/conversations"))
            .and(body_json(arguments.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"conversation_id": "c_3"})))
            .expect(1)
            .mount(&server)
            .await;

        call::<CreateConversationTool>(&client, arguments).await.unwrap();
    }

    #[tokio::test]
    async fn test_end_conversation() {
        let (server, client) = mock_upstream().await;
        Mock::given(method("POST"))
            .and(path("/conversations/c_1/end"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"conversation_id": "c_1", "status": "ended"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = call::<EndConversationTool>(&client, json!({"conversation_id": "c_1"}))
            .await
            .unwrap();
        assert_eq!(
            text_of(&result),
            serde_json::to_string_pretty(&json!({"conversation_id": "c_1", "status": "ended"}))
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_end_conversation_empty_body() {
        let (server, client) = mock_upstream().await;
        Mock::given(method("POST"))
            .and(path("/conversations/c_2/end"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let result = call::<EndConversationTool>(&client, json!({"conversation_id": "c_2"}))
            .await
            .unwrap();
        assert_eq!(text_of(&result), "null");
    }

    #[tokio::test]
    async fn test_end_conversation_upstream_error() {
        let (server, client) = mock_upstream().await;
        Mock::given(method("POST"))
            .and(path("/conversations/c_gone/end"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"message": "Conversation has already ended"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = call::<EndConversationTool>(&client, json!({"conversation_id": "c_gone"}))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(err.message, "Tavus API error: Conversation has already ended");
    }

    #[tokio::test]
    async fn test_get_conversation_verbose() {
        let (server, client) = mock_upstream().await;
        Mock::given(method("GET"))
            .and(path("/conversations/c_1"))
            .and(query_param("verbose", "false"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"conversation_id": "c_1"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        call::<GetConversationTool>(&client, json!({"conversation_id": "c_1", "verbose": false}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_conversations() {
        let (server, client) = mock_upstream().await;
        Mock::given(method("GET"))
            .and(path("/conversations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        call::<ListConversationsTool>(&client, json!({})).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_conversation() {
        let (server, client) = mock_upstream().await;
        Mock::given(method("DELETE"))
            .and(path("/conversations/c_1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let result = call::<DeleteConversationTool>(&client, json!({"conversation_id": "c_1"}))
            .await
            .unwrap();
        assert_eq!(text_of(&result), "Successfully deleted conversation c_1");
    }
}
