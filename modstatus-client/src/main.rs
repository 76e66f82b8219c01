//! Modstatus - command line client for Apache mod_status reports

use anyhow::Result;
use modstatus_client::fetch::fetch_and_parse;
use modstatus_common::{serialize, ModstatusConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("modstatus_client=info".parse()?)
                .add_directive("modstatus_common=warn".parse()?),
        )
        .init();

    // usage: modstatus [--json] [host[:port]] [config.toml]
    let mut json = false;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            _ => positional.push(arg),
        }
    }

    let config_path = positional
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("modstatus.toml"));

    let config = if config_path.exists() {
        info!("Loading configuration from {}", config_path.display());
        ModstatusConfig::load(&config_path)?
    } else {
        ModstatusConfig::default()
    };
    config.validate()?;

    let target = positional
        .first()
        .cloned()
        .unwrap_or_else(|| config.fetch.target.clone());
    let timeout = Duration::from_secs(config.fetch.timeout_secs);

    info!("Querying {}", target);
    let record = fetch_and_parse(&target, timeout).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        match serialize(&record) {
            Ok(text) => print!("{}", text),
            Err(e) => {
                // Low-verbosity servers omit fields; fall back to JSON so
                // partial reports are still printable.
                warn!("Report is incomplete ({}), printing JSON instead", e);
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
        }
    }

    Ok(())
}
