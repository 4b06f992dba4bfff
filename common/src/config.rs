use std::time::Duration;

use crate::network::range::PortRange;

pub const DEFAULT_START_PORT: u16 = 6969;
pub const DEFAULT_END_PORT: u16 = 7069;
pub const DEFAULT_PROBE_PATH: &str = "secret";
pub const DEFAULT_EXECUTE_PATH: &str = "execute";
pub const DEFAULT_SENTINEL: &str = "0xdeadbeef";

pub struct Config {
    /// Ports probed in ascending order, inclusive on both ends.
    pub ports: PortRange,
    /// Path of the GET handshake endpoint.
    pub probe_path: String,
    /// Path of the POST endpoint that receives the payload.
    pub execute_path: String,
    /// Exact body the handshake endpoint must return.
    ///
    /// Compared byte for byte: no trimming, no case folding.
    pub sentinel: String,
    /// Per-request timeout. `None` leaves the HTTP client's default in place.
    pub probe_timeout: Option<Duration>,
    /// Output reduction level of the front end. The core ignores it.
    pub quiet: u8,
    /// Skips the front end's banner. The core ignores it.
    pub no_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ports: PortRange::default(),
            probe_path: DEFAULT_PROBE_PATH.to_string(),
            execute_path: DEFAULT_EXECUTE_PATH.to_string(),
            sentinel: DEFAULT_SENTINEL.to_string(),
            probe_timeout: None,
            quiet: 0,
            no_banner: false,
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
