//! # Scriptlink Core
//!
//! Locates a cooperating execution server on the loopback interface and hands it a
//! script.
//!
//! * **[`locator`]**: Sequential port scan with a shared-secret handshake.
//! * **[`dispatcher`]**: One-shot delivery of the payload to the found port.
//! * **[`executor`]**: The invocation boundary that turns everything into an outcome.
//! * **[`endpoint`]**: The port a scan found, valid for one invocation.
//! * **[`link`]**: Transport seam, implemented over HTTP in [`network::http`].

pub mod dispatcher;
pub mod endpoint;
pub mod error;
pub mod executor;
pub mod link;
pub mod locator;
pub mod network;
