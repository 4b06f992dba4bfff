//! # Execution Outcome
//!
//! The only shape the caller ever receives from an invocation. Failures are
//! values here, never panics or propagated errors.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionOutcome {
    success: bool,
    message: String,
    details: String,
}

impl ExecutionOutcome {
    pub fn succeeded(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            details: details.into(),
        }
    }

    pub fn failed(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            details: details.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    /// Human readable summary.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Server response body on success, error chain on failure.
    pub fn details(&self) -> &str {
        &self.details
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
