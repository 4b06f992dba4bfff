use std::error::Error as StdError;

use scriptlink_common::network::range::PortRange;
use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ExecError {
    /// No port in range answered with the sentinel.
    #[error(
        "Could not locate HTTP server on ports {range}. Last error: {}",
        .last_error.as_deref().unwrap_or("none")
    )]
    DiscoveryExhausted {
        range: PortRange,
        last_error: Option<String>,
    },

    /// A probe or the dispatch got no response at all.
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The server answered the dispatch with a non-success status.
    #[error("HTTP {status}: {body}")]
    ServerRejected { status: u16, body: String },

    #[error("scan of ports {range} was cancelled")]
    Cancelled { range: PortRange },

    #[error("failed to initialise HTTP client")]
    HttpClient(#[source] BoxError),
}

impl ExecError {
    pub fn transport(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            url: url.into(),
            source: source.into(),
        }
    }

    /// One-line message including every underlying cause.
    pub fn summary(&self) -> String {
        flatten(self)
    }
}

/// Joins an error and all of its sources with `": "`.
pub fn flatten(err: &(dyn StdError + 'static)) -> String {
    let mut message: String = err.to_string();
    let mut source: Option<&(dyn StdError + 'static)> = err.source();
    while let Some(cause) = source {
        let text: String = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
