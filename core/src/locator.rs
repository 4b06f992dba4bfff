//! # Locator
//!
//! Finds the execution server by walking a [`PortRange`] on the loopback interface.
//!
//! Each port gets one GET against the handshake path. The first port whose reply is
//! a 2xx with a body **exactly** equal to the sentinel wins, and nothing after it is
//! probed. A port that cannot be reached is recorded as the last error and skipped.
//!
//! Probing is strictly sequential and in ascending order, so the result is
//! deterministic when several servers share the sentinel.

use std::future::Future;

use scriptlink_common::cancel::CancelFlag;
use scriptlink_common::network::range::PortRange;
use tracing::{debug, info};

use crate::endpoint::DiscoveredEndpoint;
use crate::error::ExecError;
use crate::link::{Reply, ServerLink};

/// Outcome of probing a single port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    Matched,
    /// A response arrived but was not a 2xx carrying the sentinel.
    Mismatched { status: u16 },
    /// No response. Holds the transport error message.
    Unreachable(String),
}

/// Compares a handshake reply against the sentinel. No trimming, case sensitive.
pub fn classify_probe(reply: &Reply, sentinel: &str) -> ProbeResult {
    if reply.is_success() && reply.body == sentinel {
        ProbeResult::Matched
    } else {
        ProbeResult::Mismatched {
            status: reply.status,
        }
    }
}

/// Probes one port through `link`.
pub async fn probe_port(link: &dyn ServerLink, port: u16, path: &str, sentinel: &str) -> ProbeResult {
    match link.get(port, path).await {
        Ok(reply) => classify_probe(&reply, sentinel),
        Err(err) => ProbeResult::Unreachable(err.summary()),
    }
}

/// Walks `ports` in ascending order until `prober` reports a match.
///
/// `cancel` is checked before every probe.
pub async fn scan_range<F, Fut>(
    ports: PortRange,
    cancel: &CancelFlag,
    mut prober: F,
) -> Result<DiscoveredEndpoint, ExecError>
where
    F: FnMut(u16) -> Fut,
    Fut: Future<Output = ProbeResult>,
{
    let mut last_error: Option<String> = None;

    for port in ports.iter() {
        if cancel.is_cancelled() {
            return Err(ExecError::Cancelled { range: ports });
        }

        match prober(port).await {
            ProbeResult::Matched => {
                info!("Server found on port {port}");
                return Ok(DiscoveredEndpoint::new(port));
            }
            ProbeResult::Mismatched { status } => {
                debug!(port, status, "handshake did not match");
            }
            ProbeResult::Unreachable(message) => {
                debug!(port, error = %message, "port unreachable");
                last_error = Some(message);
            }
        }
    }

    Err(ExecError::DiscoveryExhausted {
        range: ports,
        last_error,
    })
}

/// Scans `ports` through `link`, calling `on_probe` right before each port is tried.
pub async fn locate(
    link: &dyn ServerLink,
    ports: PortRange,
    probe_path: &str,
    sentinel: &str,
    cancel: &CancelFlag,
    on_probe: Option<&(dyn Fn(u16) + Send + Sync)>,
) -> Result<DiscoveredEndpoint, ExecError> {
    debug!(%ports, probe_path, "starting port scan");
    scan_range(ports, cancel, move |port| {
        if let Some(callback) = on_probe {
            callback(port);
        }
        probe_port(link, port, probe_path, sentinel)
    })
    .await
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
