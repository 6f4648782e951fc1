//! Speech tools.
//!
//! Generates audio of a replica's voice reading a script. Endpoints live
//! under `/speech`.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use super::common::{json_result, request_body};
use crate::core::client::TavusClient;
use crate::domains::tools::{ToolError, ToolHandler};

const COLLECTION: &str = "speech";

/// Parameters for generating speech.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateSpeechParams {
    /// Replica whose voice is used.
    pub replica_id: String,

    /// Text to read.
    pub script: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech_name: Option<String>,

    /// URL that receives generation status callbacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,

    /// Additional API fields, forwarded unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for fetching generated speech.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetSpeechParams {
    /// Unique identifier of the speech.
    pub speech_id: String,
}

/// Generate speech from a script.
pub struct CreateSpeechTool;

#[async_trait::async_trait]
impl ToolHandler for CreateSpeechTool {
    const NAME: &'static str = "create_speech";
    const DESCRIPTION: &'static str = "Generate an audio file of a replica's voice reading a script.";
    type Params = CreateSpeechParams;

    #[instrument(skip_all, fields(replica_id = %params.replica_id))]
    async fn execute(
        params: CreateSpeechParams,
        client: &TavusClient,
    ) -> Result<CallToolResult, ToolError> {
        info!("Creating speech");
        let body = client.post(&[COLLECTION], &request_body(&params)?).await?;
        json_result(&body)
    }
}

/// Fetch generated speech.
pub struct GetSpeechTool;

#[async_trait::async_trait]
impl ToolHandler for GetSpeechTool {
    const NAME: &'static str = "get_speech";
    const DESCRIPTION: &'static str = "Get the status and audio URL of generated speech by its ID.";
    type Params = GetSpeechParams;

    #[instrument(skip_all, fields(speech_id = %params.speech_id))]
    async fn execute(params: GetSpeechParams, client: &TavusClient) -> Result<CallToolResult, ToolError> {
        let body = client
            .get(&[COLLECTION, params.speech_id.as_str()], &[])
            .await?;
        json_result(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::super::common::testing::{call, mock_upstream, text_of};
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_create_speech() {
        let (server, client) = mock_upstream().await;
        Mock::given(method("POST"))
            .and(path("/speech"))
            .and(body_json(json!({
                "replica_id": "r_1",
                "script": "Welcome aboard",
                "speech_name": "intro"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"speech_id": "s_1"})))
            .expect(1)
            .mount(&server)
            .await;

        let result = call::<CreateSpeechTool>(
            &client,
            json!({"replica_id": "r_1", "script": "Welcome aboard", "speech_name": "intro"}),
        )
        .await
        .unwrap();
        assert!(text_of(&result).contains("s_1"));
    }

    #[tokio::test]
    async fn test_get_speech() {
        let (server, client) = mock_upstream().await;
        Mock::given(method("GET"))
            .and(path("/speech/s_1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"speech_id": "s_1", "status": "ready"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = call::<GetSpeechTool>(&client, json!({"speech_id": "s_1"}))
            .await
            .unwrap();
        assert!(text_of(&result).contains("ready"));
    }
}
