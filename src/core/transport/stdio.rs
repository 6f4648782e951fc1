//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP. Serves until the client closes
//! the stream or the process receives an interrupt signal.

use std::future::Future;
use std::io;

use rmcp::ServiceExt;
use tracing::{info, warn};

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let cancel = service.cancellation_token();

        tokio::select! {
            result = service.waiting() => {
                result.map_err(|e| TransportError::service(e.to_string()))?;
                info!("Client closed the connection");
            }
            _ = interrupted(tokio::signal::ctrl_c()) => {
                info!("Interrupt received, closing transport");
                cancel.cancel();
            }
        }

        info!("STDIO transport finished");
        Ok(())
    }
}

/// Resolve once the interrupt signal fires.
///
/// If the handler cannot be installed this never resolves, leaving the
/// transport to run until the client disconnects.
async fn interrupted<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("Failed to listen for interrupt signal: {}", e);
        std::future::pending::<()>().await;
    }
}
