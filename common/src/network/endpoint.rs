//! # Loopback Endpoints
//!
//! Every request the core makes targets [`LOOPBACK`]; no other host is ever contacted.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const LOOPBACK: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Builds `http://127.0.0.1:<port>/<path>`.
///
/// Leading slashes on `path` are ignored so both `"secret"` and `"/secret"` work.
pub fn loopback_url(port: u16, path: &str) -> String {
    format!("http://{}/{}", SocketAddr::new(LOOPBACK, port), path.trim_start_matches('/'))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
