use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use scriptlink_common::cancel::CancelFlag;
use scriptlink_common::config::Config;
use scriptlink_common::network::range::PortRange;
use scriptlink_common::outcome::ExecutionOutcome;
use scriptlink_core::executor::Executor;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::terminal::{colors, print, spinner};

pub async fn execute(
    file: Option<PathBuf>,
    json: bool,
    cfg: Config,
    cancel: &CancelFlag,
) -> anyhow::Result<ExitCode> {
    let payload: String = read_payload(file.as_deref()).await?;
    if payload.is_empty() {
        warn!("Script is empty, sending it anyway");
    }
    debug!("Read {} bytes of script", payload.len());

    let range: PortRange = cfg.ports;
    let quiet: u8 = cfg.quiet;
    let executor: Executor = Executor::over_http(cfg)?
        .with_probe_callback(Box::new(move |port| spinner::report_probe(port, range)));

    spinner::start(&format!("Scanning ports {range}"));
    let start_time: Instant = Instant::now();
    let outcome: ExecutionOutcome = executor.execute_script(&payload, cancel).await;
    spinner::finish();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome, start_time.elapsed(), quiet);
    }

    Ok(if outcome.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// `None` and `-` read standard input.
async fn read_payload(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) if path != Path::new("-") => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read script from {}", path.display())),
        _ => {
            let mut payload = String::new();
            tokio::io::stdin()
                .read_to_string(&mut payload)
                .await
                .context("failed to read script from stdin")?;
            Ok(payload)
        }
    }
}

fn print_outcome(outcome: &ExecutionOutcome, total_time: Duration, q_level: u8) {
    print::header("dispatch result", q_level);

    let status: ColoredString = if outcome.success() {
        "delivered".green().bold()
    } else {
        "failed".red().bold()
    };
    print::aligned_line("Status", status);
    print::aligned_line("Message", outcome.message());

    if q_level < 2 && !outcome.details().is_empty() {
        print::aligned_line("Details", "");
        print::block(outcome.details());
    }

    if q_level == 0 {
        let elapsed: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
        let summary: String = format!("Finished in {elapsed}").color(colors::TEXT_DEFAULT).to_string();
        print::fat_separator();
        print::centerln(&summary);
    }
}
