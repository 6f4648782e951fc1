//! Replica tools.
//!
//! Replicas are the trained video avatars every other resource builds on.
//! Endpoints live under `/replicas`.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{info, instrument};

use super::common::{NoParams, confirmation_result, json_result, request_body, verbose_query};
use crate::core::client::TavusClient;
use crate::domains::tools::{ToolError, ToolHandler};

const COLLECTION: &str = "replicas";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for creating a replica.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateReplicaParams {
    /// Direct download URL of the training video.
    pub train_video_url: String,

    /// Display name for the replica.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_name: Option<String>,

    /// URL of a separate consent video, when it is not part of the training video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_video_url: Option<String>,

    /// URL that receives training status callbacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,

    /// Replica model to train (e.g. "phoenix-3").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,

    /// Additional API fields, forwarded unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for fetching a single replica.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetReplicaParams {
    /// Unique identifier of the replica.
    pub replica_id: String,

    /// Include additional replica details in the response.
    #[serde(default)]
    pub verbose: Option<bool>,
}

/// Parameters for deleting a replica.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteReplicaParams {
    /// Unique identifier of the replica to delete.
    pub replica_id: String,
}

/// Parameters for renaming a replica.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RenameReplicaParams {
    /// Unique identifier of the replica.
    pub replica_id: String,

    /// New display name.
    pub replica_name: String,
}

// ============================================================================
// Tool Definitions
// ============================================================================

/// Create a replica from a training video.
pub struct CreateReplicaTool;

#[async_trait::async_trait]
impl ToolHandler for CreateReplicaTool {
    const NAME: &'static str = "create_replica";
    const DESCRIPTION: &'static str = "Create a new replica (AI video avatar) from a training video. \
         Training runs asynchronously; poll get_replica or use callback_url to follow progress.";
    type Params = CreateReplicaParams;

    #[instrument(skip_all)]
    async fn execute(
        params: CreateReplicaParams,
        client: &TavusClient,
    ) -> Result<CallToolResult, ToolError> {
        info!("Creating replica");
        let body = client.post(&[COLLECTION], &request_body(&params)?).await?;
        json_result(&body)
    }
}

/// Fetch a single replica.
pub struct GetReplicaTool;

#[async_trait::async_trait]
impl ToolHandler for GetReplicaTool {
    const NAME: &'static str = "get_replica";
    const DESCRIPTION: &'static str =
        "Get details of a replica by its ID, including training status. Set verbose=true for extra fields.";
    type Params = GetReplicaParams;

    #[instrument(skip_all, fields(replica_id = %params.replica_id))]
    async fn execute(
        params: GetReplicaParams,
        client: &TavusClient,
    ) -> Result<CallToolResult, ToolError> {
        let body = client
            .get(&[COLLECTION, params.replica_id.as_str()], &verbose_query(params.verbose))
            .await?;
        json_result(&body)
    }
}

/// List replicas.
pub struct ListReplicasTool;

#[async_trait::async_trait]
impl ToolHandler for ListReplicasTool {
    const NAME: &'static str = "list_replicas";
    const DESCRIPTION: &'static str = "List all replicas available to this API key.";
    type Params = NoParams;

    #[instrument(skip_all)]
    async fn execute(_params: NoParams, client: &TavusClient) -> Result<CallToolResult, ToolError> {
        let body = client.get(&[COLLECTION], &[]).await?;
        json_result(&body)
    }
}

/// Delete a replica.
pub struct DeleteReplicaTool;

#[async_trait::async_trait]
impl ToolHandler for DeleteReplicaTool {
    const NAME: &'static str = "delete_replica";
    const DESCRIPTION: &'static str = "Delete a replica by its ID.";
    type Params = DeleteReplicaParams;

    #[instrument(skip_all, fields(replica_id = %params.replica_id))]
    async fn execute(
        params: DeleteReplicaParams,
        client: &TavusClient,
    ) -> Result<CallToolResult, ToolError> {
        client.delete(&[COLLECTION, params.replica_id.as_str()]).await?;
        info!("Deleted replica");
        Ok(confirmation_result(format!(
            "Successfully deleted replica {}",
            params.replica_id
        )))
    }
}

/// Rename a replica.
pub struct RenameReplicaTool;

#[async_trait::async_trait]
impl ToolHandler for RenameReplicaTool {
    const NAME: &'static str = "rename_replica";
    const DESCRIPTION: &'static str = "Change the display name of a replica.";
    type Params = RenameReplicaParams;

    #[instrument(skip_all, fields(replica_id = %params.replica_id))]
    async fn execute(
        params: RenameReplicaParams,
        client: &TavusClient,
    ) -> Result<CallToolResult, ToolError> {
        let body = client
            .patch(
                &[COLLECTION, params.replica_id.as_str(), "name"],
                &json!({ "replica_name": params.replica_name }),
            )
            .await?;
        json_result(&body)
    }
}

// ============================================================================
// Tests
// ============================================================================
