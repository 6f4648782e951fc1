//! Lipsync tools.
//!
//! A lipsync job re-renders an existing video so the speaker's lips match a
//! new audio track. Endpoints live under `/lipsync`.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use super::common::{NoParams, json_result, request_body};
use crate::core::client::TavusClient;
use crate::domains::tools::{ToolError, ToolHandler};

const COLLECTION: &str = "lipsync";

/// Parameters for creating a lipsync job.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateLipsyncParams {
    /// URL of the video whose lips are re-synced.
    pub original_video_url: String,

    /// URL of the audio track to sync to.
    pub source_audio_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lipsync_name: Option<String>,

    /// URL that receives job status callbacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,

    /// Additional API fields, forwarded unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for fetching a single lipsync job.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetLipsyncParams {
    /// Unique identifier of the lipsync job.
    pub lipsync_id: String,
}

/// Create a lipsync job.
pub struct CreateLipsyncTool;

#[async_trait::async_trait]
impl ToolHandler for CreateLipsyncTool {
    const NAME: &'static str = "create_lipsync";
    const DESCRIPTION: &'static str =
        "Synchronize the lips in an existing video to a new audio track. Processing is asynchronous.";
    type Params = CreateLipsyncParams;

    #[instrument(skip_all)]
    async fn execute(
        params: CreateLipsyncParams,
        client: &TavusClient,
    ) -> Result<CallToolResult, ToolError> {
        info!("Creating lipsync job");
        let body = client.post(&[COLLECTION], &request_body(&params)?).await?;
        json_result(&body)
    }
}

/// Fetch a single lipsync job.
pub struct GetLipsyncTool;

#[async_trait::async_trait]
impl ToolHandler for GetLipsyncTool {
    const NAME: &'static str = "get_lipsync";
    const DESCRIPTION: &'static str = "Get the status and result URL of a lipsync job by its ID.";
    type Params = GetLipsyncParams;

    #[instrument(skip_all, fields(lipsync_id = %params.lipsync_id))]
    async fn execute(params: GetLipsyncParams, client: &TavusClient) -> Result<CallToolResult, ToolError> {
        let body = client
            .get(&[COLLECTION, params.lipsync_id.as_str()], &[])
            .await?;
        json_result(&body)
    }
}

/// List lipsync jobs.
pub struct ListLipsyncsTool;

#[async_trait::async_trait]
impl ToolHandler for ListLipsyncsTool {
    const NAME: &'static str = "list_lipsyncs";
    const DESCRIPTION: &'static str = "List all lipsync jobs created with this API key.";
    type Params = NoParams;

    #[instrument(skip_all)]
    async fn execute(_params: NoParams, client: &TavusClient) -> Result<CallToolResult, ToolError> {
        let body = client.get(&[COLLECTION], &[]).await?;
        json_result(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::super::common::testing::{call, mock_upstream, text_of};
    use super::*;
    use rmcp::model::ErrorCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_create_lipsync() {
        let (server, client) = mock_upstream().await;
        Mock::given(method("POST"))
            .and(path("/lipsync"))
            .and(body_json(json!({
                "original_video_url": "https://example.com/in.mp4",
                "source_audio_url": "https://example.com/voice.mp3"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"lipsync_id": "l_1", "status": "started"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = call::<CreateLipsyncTool>(
            &client,
            json!({
                "original_video_url": "https://example.com/in.mp4",
                "source_audio_url": "https://example.com/voice.mp3"
            }),
        )
        .await
        .unwrap();
        assert!(text_of(&result).contains("l_1"));
    }

    #[tokio::test]
    async fn test_create_lipsync_requires_audio() {
        let (_server, client) = mock_upstream().await;
        let err = call::<CreateLipsyncTool>(
            &client,
            json!({"original_video_url": "https://example.com/in.mp4"}),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("source_audio_url"));
    }

    #[tokio::test]
    async fn test_get_and_list_lipsyncs() {
        let (server, client) = mock_upstream().await;
        Mock::given(method("GET"))
            .and(path("/lipsync/l_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"lipsync_id": "l_1"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/lipsync"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        call::<GetLipsyncTool>(&client, json!({"lipsync_id": "l_1"}))
            .await
            .unwrap();
        call::<ListLipsyncsTool>(&client, json!({})).await.unwrap();
    }
}
