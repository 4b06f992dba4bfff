use std::process::ExitCode;

use scriptlink_common::cancel::CancelFlag;
use scriptlink_common::config::Config;
use scriptlink_common::network::range::PortRange;
use scriptlink_core::executor::Executor;
use serde_json::json;

use crate::terminal::{print, spinner};

pub async fn locate(json: bool, cfg: Config, cancel: &CancelFlag) -> anyhow::Result<ExitCode> {
    let range: PortRange = cfg.ports;
    let executor: Executor = Executor::over_http(cfg)?
        .with_probe_callback(Box::new(move |port| spinner::report_probe(port, range)));

    spinner::start(&format!("Scanning ports {range}"));
    let result = executor.locate(cancel).await;
    spinner::finish();

    let found: bool = result.is_ok();
    if json {
        let value = match &result {
            Ok(endpoint) => json!({ "success": true, "port": endpoint.port() }),
            Err(err) => json!({ "success": false, "message": err.summary() }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        match &result {
            Ok(endpoint) => {
                print::aligned_line("Server", endpoint.to_string());
                print::aligned_line("Port", endpoint.port().to_string());
            }
            Err(err) => print::aligned_line("Error", err.summary()),
        }
    }

    Ok(if found { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
