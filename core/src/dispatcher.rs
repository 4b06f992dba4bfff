//! # Dispatcher
//!
//! Delivers the payload to a port found by the [`crate::locator`] in the same
//! invocation. One POST, no retry: a failure is reported back as-is.

use tracing::{info, warn};

use crate::endpoint::DiscoveredEndpoint;
use crate::error::ExecError;
use crate::link::{Reply, ServerLink};

/// 2xx yields the response body; anything else becomes [`ExecError::ServerRejected`].
pub fn classify_reply(reply: Reply) -> Result<String, ExecError> {
    if reply.is_success() {
        Ok(reply.body)
    } else {
        Err(ExecError::ServerRejected {
            status: reply.status,
            body: reply.body,
        })
    }
}

pub async fn dispatch(
    link: &dyn ServerLink,
    endpoint: DiscoveredEndpoint,
    execute_path: &str,
    payload: &str,
) -> Result<String, ExecError> {
    info!("Sending script to {}", endpoint.url(execute_path));

    let reply: Reply = link.post_text(endpoint.port(), execute_path, payload).await?;
    match classify_reply(reply) {
        Ok(body) => {
            info!("Script submitted successfully: {body}");
            Ok(body)
        }
        Err(err) => {
            warn!("Server rejected script: {err}");
            Err(err)
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
