//! Video tools.
//!
//! Videos are rendered from a replica plus a script or an audio file.
//! Endpoints live under `/videos`.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{info, instrument};

use super::common::{NoParams, confirmation_result, json_result, request_body, verbose_query};
use crate::core::client::TavusClient;
use crate::domains::tools::{ToolError, ToolHandler};

const COLLECTION: &str = "videos";

// ============================================================================
// Tool Parameters
// ============================================================================

/// How a website background scrolls behind the replica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundScrollType {
    /// Scroll as a person would, with pauses.
    Human,
    /// Scroll at a constant speed.
    Smooth,
}

/// How far down the page the background scroll goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundScrollDepth {
    Middle,
    Bottom,
}

/// What the background does once the scroll depth is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundScrollReturn {
    /// Scroll back up and repeat.
    Loop,
    /// Stay at the final position.
    Halt,
}

/// Optional rendering properties for a video.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct VideoProperties {
    /// Scroll the website background while the replica speaks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_scroll: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_scroll_type: Option<BackgroundScrollType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_scroll_depth: Option<BackgroundScrollDepth>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_scroll_return: Option<BackgroundScrollReturn>,

    /// Start the video with the replica waving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_with_wave: Option<bool>,

    /// Additional API fields, forwarded unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for generating a video.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateVideoParams {
    /// Replica that appears in the video.
    pub replica_id: String,

    /// Text the replica speaks. Provide either this or `audio_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,

    /// Audio file the replica lip-syncs to. Provide either this or `script`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,

    /// Display name for the video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_name: Option<String>,

    /// Website URL rendered as the background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_url: Option<String>,

    /// Video file URL used as the background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_source_url: Option<String>,

    /// URL that receives rendering status callbacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,

    /// Use the faster rendering pipeline (fewer features).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fast: Option<bool>,

    /// Render with a transparent background (requires `fast`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparent_background: Option<bool>,

    /// Image URL overlaid as a watermark.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark_image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<VideoProperties>,

    /// Additional API fields, forwarded unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for fetching a single video.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetVideoParams {
    /// Unique identifier of the video.
    pub video_id: String,

    /// Include additional video details in the response.
    #[serde(default)]
    pub verbose: Option<bool>,
}

/// Parameters for deleting a video.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteVideoParams {
    /// Unique identifier of the video to delete.
    pub video_id: String,
}

/// Parameters for renaming a video.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RenameVideoParams {
    /// Unique identifier of the video.
    pub video_id: String,

    /// New display name.
    pub video_name: String,
}

// ============================================================================
// Tool Definitions
// ============================================================================

/// Generate a video.
pub struct CreateVideoTool;

#[async_trait::async_trait]
impl ToolHandler for CreateVideoTool {
    const NAME: &'static str = "create_video";
    const DESCRIPTION: &'static str = "Generate a video of a replica speaking a script or lip-syncing an audio file. \
         Rendering is asynchronous; poll get_video or use callback_url.";
    type Params = CreateVideoParams;

    #[instrument(skip_all, fields(replica_id = %params.replica_id))]
    async fn execute(
        params: CreateVideoParams,
        client: &TavusClient,
    ) -> Result<CallToolResult, ToolError> {
        info!("Creating video");
        let body = client.post(&[COLLECTION], &request_body(&params)?).await?;
        json_result(&body)
    }
}

/// Fetch a single video.
pub struct GetVideoTool;

#[async_trait::async_trait]
impl ToolHandler for GetVideoTool {
    const NAME: &'static str = "get_video";
    const DESCRIPTION: &'static str =
        "Get details of a video by its ID, including rendering status and download URL.";
    type Params = GetVideoParams;

    #[instrument(skip_all, fields(video_id = %params.video_id))]
    async fn execute(params: GetVideoParams, client: &TavusClient) -> Result<CallToolResult, ToolError> {
        let body = client
            .get(&[COLLECTION, params.video_id.as_str()], &verbose_query(params.verbose))
            .await?;
        json_result(&body)
    }
}

/// List videos.
pub struct ListVideosTool;

#[async_trait::async_trait]
impl ToolHandler for ListVideosTool {
    const NAME: &'static str = "list_videos";
    const DESCRIPTION: &'static str = "List all videos created with this API key.";
    type Params = NoParams;

    #[instrument(skip_all)]
    async fn execute(_params: NoParams, client: &TavusClient) -> Result<CallToolResult, ToolError> {
        let body = client.get(&[COLLECTION], &[]).await?;
        json_result(&body)
    }
}

/// Delete a video.
pub struct DeleteVideoTool;

#[async_trait::async_trait]
impl ToolHandler for DeleteVideoTool {
    const NAME: &'static str = "delete_video";
    const DESCRIPTION: &'static str = "Delete a video by its ID.";
    type Params = DeleteVideoParams;

    #[instrument(skip_all, fields(video_id = %params.video_id))]
    async fn execute(
        params: DeleteVideoParams,
        client: &TavusClient,
    ) -> Result<CallToolResult, ToolError> {
        client.delete(&[COLLECTION, params.video_id.as_str()]).await?;
        info!("Deleted video");
        Ok(confirmation_result(format!(
            "Successfully deleted video {}",
            params.video_id
        )))
    }
}

/// Rename a video.
pub struct RenameVideoTool;

#[async_trait::async_trait]
impl ToolHandler for RenameVideoTool {
    const NAME: &'static str = "rename_video";
    const DESCRIPTION: &'static str = "Change the display name of a video.";
    type Params = RenameVideoParams;

    #[instrument(skip_all, fields(video_id = %params.video_id))]
    async fn execute(
        params: RenameVideoParams,
        client: &TavusClient,
    ) -> Result<CallToolResult, ToolError> {
        let body = client
            .patch(
                &[COLLECTION, params.video_id.as_str(), "name"],
                &json!({ "video_name": params.video_name }),
            )
            .await?;
        json_result(&body)
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
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_delete_video_confirmation() {
        let (server, client) = mock_upstream().await;
        Mock::given(method("DELETE"))
            .and(path("/videos/v_9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ignored": true})))
            .expect(1)
            .mount(&server)
            .await;

        let result = call::<DeleteVideoTool>(&client, json!({"video_id": "v_9"}))
            .await
            .unwrap();
        assert_eq!(text_of(&result), "Successfully deleted video v_9");
    }

    #[tokio::test]
    async fn test_create_video_with_properties() {
        let (server, client) = mock_upstream().await;
        Mock::given(method("POST"))
            .and(path("/videos"))
            .and(body_json(json!({
                "replica_id": "r_1",
                "script": "Hello there",
                "properties": {
                    "background_scroll": true,
                    "background_scroll_type": "smooth",
                    "background_scroll_return": "halt"
                }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"video_id": "v_1", "status": "queued"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = call::<CreateVideoTool>(
            &client,
            json!({
                "replica_id": "r_1",
                "script": "Hello there",
                "properties": {
                    "background_scroll": true,
                    "background_scroll_type": "smooth",
                    "background_scroll_return": "halt"
                }
            }),
        )
        .await
        .unwrap();
        assert!(text_of(&result).contains("queued"));
    }

    #[tokio::test]
    async fn test_create_video_rejects_unknown_scroll_type() {
        let (_server, client) = mock_upstream().await;
        let err = call::<CreateVideoTool>(
            &client,
            json!({
                "replica_id": "r_1",
                "script": "Hi",
                "properties": {"background_scroll_type": "sideways"}
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_get_video_without_verbose_sends_no_query() {
        let (server, client) = mock_upstream().await;
        Mock::given(method("GET"))
            .and(path("/videos/v_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"video_id": "v_1"})))
            .expect(1)
            .mount(&server)
            .await;

        call::<GetVideoTool>(&client, json!({"video_id": "v_1"}))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_create_video_forwards_unlisted_fields() {
        let (server, client) = mock_upstream().await;
        let arguments = json!({
            "replica_id": "r_1",
            "script": "Hi",
            "test_mode": true,
            "properties": {"start_with_wave": false, "background_blur": "light"}
        });
        Mock::given(method("POST"))
            .and(path("/videos"))
            .and(body_json(arguments.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"video_id": "v_2"})))
            .expect(1)
            .mount(&server)
            .await;

        call::<CreateVideoTool>(&client, arguments).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_videos() {
        let (server, client) = mock_upstream().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let result = call::<ListVideosTool>(&client, json!({})).await.unwrap();
        assert!(text_of(&result).contains("data"));
    }

    #[tokio::test]
    async fn test_rename_video() {
        let (server, client) = mock_upstream().await;
        Mock::given(method("PATCH"))
            .and(path("/videos/v_1/name"))
            .and(body_json(json!({"video_name": "Launch"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"video_name": "Launch"})))
            .expect(1)
            .mount(&server)
            .await;

        call::<RenameVideoTool>(&client, json!({"video_id": "v_1", "video_name": "Launch"}))
            .await
            .unwrap();
    }
}
