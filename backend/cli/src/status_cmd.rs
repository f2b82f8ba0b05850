//! `paddock status`: ask a running server for its health.

use std::time::Duration;

use anyhow::Result;

use paddock_config::PaddockConfig;

use crate::app;
use crate::terminal_output::{note_error, note_success};

pub async fn run(config: &PaddockConfig, port: Option<u16>) -> Result<()> {
    let mut addr = app::listen_addr(config, port)?;
    if addr.ip().is_unspecified() {
        addr.set_ip([127, 0, 0, 1].into());
    }
    let url = format!("http://{addr}/api/health");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;
    match client.get(&url).send().await {
        Ok(resp) if resp.status().is_success() => {
            let body: serde_json::Value = resp.json().await?;
            note_success(&format!("Paddock is running at {addr}"));
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Ok(resp) => note_error(&format!("{url} answered {}", resp.status())),
        Err(_) => note_error(&format!("Paddock is not running at {addr}")),
    }
    Ok(())
}
