//! # Server Link
//!
//! The transport seam between the protocol logic and the network.
//!
//! The locator and the dispatcher depend only on [`ServerLink`]; they decide what a
//! reply *means*, while the link only moves bytes to and from the loopback peer.
//! [`crate::network::http::HttpLink`] is the production implementation.

use async_trait::async_trait;

use crate::error::ExecError;

#[cfg(test)]
pub(crate) mod fake;

/// A complete HTTP response from the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Status in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Requests against `127.0.0.1:<port>`.
///
/// An `Err` means no response was received. Any response, whatever its
/// status, is an `Ok(Reply)`. Redirects are returned, never followed.
#[async_trait]
pub trait ServerLink: Send + Sync {
    /// The body of a non-2xx reply is not read and comes back empty.
    async fn get(&self, port: u16, path: &str) -> Result<Reply, ExecError>;

    /// POST `payload` as `text/plain`.
    async fn post_text(&self, port: u16, path: &str, payload: &str) -> Result<Reply, ExecError>;
}
