pub mod execute;
pub mod locate;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use scriptlink_common::config::{Config, DEFAULT_EXECUTE_PATH, DEFAULT_PROBE_PATH, DEFAULT_SENTINEL};
use scriptlink_common::network::range::PortRange;

#[derive(Parser)]
#[command(name = "scriptlink", version)]
#[command(about = "Find the local execution server and hand it a script.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Loopback ports to scan, as START-END
    #[arg(long, global = true, value_name = "START-END", default_value_t = PortRange::default())]
    pub ports: PortRange,

    /// Exact body the handshake endpoint must answer with
    #[arg(long, global = true, default_value = DEFAULT_SENTINEL)]
    pub sentinel: String,

    /// Path of the handshake endpoint
    #[arg(long, global = true, default_value = DEFAULT_PROBE_PATH)]
    pub probe_path: String,

    /// Path of the endpoint receiving the script
    #[arg(long, global = true, default_value = DEFAULT_EXECUTE_PATH)]
    pub execute_path: String,

    /// Per-request timeout in milliseconds (no timeout by default)
    #[arg(long, global = true, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Reduce output, repeat for less
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Locate the server and send it a script
    #[command(alias = "e")]
    Exec {
        /// Script file to send, `-` or nothing reads stdin
        file: Option<PathBuf>,
        /// Print the outcome as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Only locate the server and print its port
    #[command(alias = "l")]
    Locate {
        /// Print the result as JSON on stdout
        #[arg(long)]
        json: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            ports: self.ports,
            probe_path: self.probe_path.clone(),
            execute_path: self.execute_path.clone(),
            sentinel: self.sentinel.clone(),
            probe_timeout: self.timeout_ms.map(Duration::from_millis),
            quiet: self.quiet,
            no_banner: self.no_banner,
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
