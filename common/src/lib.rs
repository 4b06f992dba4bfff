//! # Scriptlink Common
//!
//! Models shared between the core and the command line front end.
//!
//! * **[`config`]**: Fixed protocol constants and the runtime [`config::Config`].
//! * **[`network`]**: Loopback port ranges and discovered endpoints.
//! * **[`outcome`]**: The structured result handed back to the caller.
//! * **[`cancel`]**: Cooperative cancellation for a running scan.

pub mod cancel;
pub mod config;
pub mod network;
pub mod outcome;
