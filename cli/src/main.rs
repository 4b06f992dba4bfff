mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, execute, locate};
use scriptlink_common::cancel::CancelFlag;
use scriptlink_common::config::Config;
use terminal::{logging, print};
use tracing::warn;

const INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.quiet);

    let cfg: Config = commands.to_config();
    print::banner(cfg.no_banner, cfg.quiet);

    let cancel: CancelFlag = CancelFlag::new();
    watch_interrupt(cancel.clone());

    match commands.command {
        Commands::Exec { file, json } => {
            print::header("dispatching script", cfg.quiet);
            execute::execute(file, json, cfg, &cancel).await
        }
        Commands::Locate { json } => {
            print::header("locating server", cfg.quiet);
            locate::locate(json, cfg, &cancel).await
        }
    }
}

/// First Ctrl-C stops the scan after the probe in flight, a second one exits.
fn watch_interrupt(cancel: CancelFlag) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        warn!("Interrupted, stopping scan");
        cancel.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(INTERRUPTED);
        }
    });
}
