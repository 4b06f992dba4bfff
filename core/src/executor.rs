//! # Invocation Boundary
//!
//! [`Executor::execute_script`] is the single entry point the front end calls. It
//! runs the locator, then the dispatcher, and folds every error into an
//! [`ExecutionOutcome`], so the caller never sees a fault.
//!
//! The executor owns its [`Config`] and [`ServerLink`] explicitly; it reads no
//! global state and keeps nothing between invocations.

use std::fmt;

use scriptlink_common::cancel::CancelFlag;
use scriptlink_common::config::Config;
use scriptlink_common::outcome::ExecutionOutcome;
use tracing::{Instrument, debug, error, info_span};

use crate::dispatcher;
use crate::endpoint::DiscoveredEndpoint;
use crate::error::ExecError;
use crate::link::ServerLink;
use crate::locator;
use crate::network::http::HttpLink;

pub const SUCCESS_MESSAGE: &str = "Script sent to server successfully.";

pub type ProbeCallback = Box<dyn Fn(u16) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Idle,
    Scanning,
    Found(u16),
    Dispatching(u16),
    Succeeded,
    Failed,
    Exhausted,
}

impl ExecutionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Exhausted)
    }
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Scanning => write!(f, "scanning"),
            Self::Found(port) => write!(f, "found({port})"),
            Self::Dispatching(port) => write!(f, "dispatching({port})"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
            Self::Exhausted => write!(f, "exhausted"),
        }
    }
}

fn advance(state: &mut ExecutionState, next: ExecutionState) {
    debug!("state {state} -> {next}");
    *state = next;
}

pub struct Executor {
    config: Config,
    link: Box<dyn ServerLink>,
    on_probe: Option<ProbeCallback>,
}

impl Executor {
    pub fn new(config: Config, link: Box<dyn ServerLink>) -> Self {
        Self {
            config,
            link,
            on_probe: None,
        }
    }

    /// Executor talking HTTP through reqwest, honouring `config.probe_timeout`.
    pub fn over_http(config: Config) -> Result<Self, ExecError> {
        let link: HttpLink = HttpLink::new(config.probe_timeout)?;
        Ok(Self::new(config, Box::new(link)))
    }

    /// Called with each port right before it is probed.
    pub fn with_probe_callback(mut self, callback: ProbeCallback) -> Self {
        self.on_probe = Some(callback);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs only the locator. Every call scans the whole range again.
    pub async fn locate(&self, cancel: &CancelFlag) -> Result<DiscoveredEndpoint, ExecError> {
        locator::locate(
            self.link.as_ref(),
            self.config.ports,
            &self.config.probe_path,
            &self.config.sentinel,
            cancel,
            self.on_probe.as_deref(),
        )
        .await
    }

    pub async fn execute_script(&self, payload: &str, cancel: &CancelFlag) -> ExecutionOutcome {
        let span = info_span!("execute_script", bytes = payload.len());
        async {
            let (state, result) = self.run(payload, cancel).await;
            debug!("invocation finished in state {state}");
            match result {
                Ok(body) => ExecutionOutcome::succeeded(SUCCESS_MESSAGE, body),
                Err(err) => {
                    error!("Script execution error: {}", err.summary());
                    into_failure(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, payload: &str, cancel: &CancelFlag) -> (ExecutionState, Result<String, ExecError>) {
        let mut state: ExecutionState = ExecutionState::Idle;

        advance(&mut state, ExecutionState::Scanning);
        let endpoint: DiscoveredEndpoint = match self.locate(cancel).await {
            Ok(endpoint) => endpoint,
            Err(err) => {
                let next = match err {
                    ExecError::DiscoveryExhausted { .. } => ExecutionState::Exhausted,
                    _ => ExecutionState::Failed,
                };
                advance(&mut state, next);
                return (state, Err(err));
            }
        };

        advance(&mut state, ExecutionState::Found(endpoint.port()));
        advance(&mut state, ExecutionState::Dispatching(endpoint.port()));

        let result = dispatcher::dispatch(
            self.link.as_ref(),
            endpoint,
            &self.config.execute_path,
            payload,
        )
        .await;

        let next = if result.is_ok() {
            ExecutionState::Succeeded
        } else {
            ExecutionState::Failed
        };
        advance(&mut state, next);
        (state, result)
    }
}

/// `message` is the flattened error, `details` the full cause listing.
fn into_failure(err: ExecError) -> ExecutionOutcome {
    let message: String = err.summary();
    let details: String = format!("{:?}", anyhow::Error::new(err));
    ExecutionOutcome::failed(message, details)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
