//! `paddock doctor`: check the config and explain what the server would do.

use std::path::Path;

use anyhow::Result;

use paddock_config::{load_config, redacted_config, resolve};

use crate::app;
use crate::terminal_output::{note_error, note_info, note_success, note_warn};

pub async fn run(path: &Path) -> Result<()> {
    println!("\nChecking Paddock configuration\n");
    note_info(&format!("Config file: {}", path.display()));
    if !path.exists() {
        note_warn("Config file not found; running on defaults");
    }

    let raw = load_config(path).await?;
    let (config, report) = match resolve(raw, &std::env::vars().collect()) {
        Ok(resolved) => resolved,
        Err(e) => {
            note_error(&format!("{e:#}"));
            return Ok(());
        }
    };

    for warning in &report.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    for error in &report.errors {
        note_error(&format!("{}: {}", error.path, error.message));
    }

    if report.is_valid() {
        let speaker = app::build_speaker(&config)?;
        note_info(&format!("Messages will be generated by: {}", speaker.primary_name()));
        note_info(&format!("Server would listen on {}", app::listen_addr(&config, None)?));
        println!("\n{}", serde_json::to_string_pretty(&redacted_config(&config))?);
        println!();
        note_success("Configuration is valid");
    } else {
        println!();
        note_error(&format!("{} problem(s) must be fixed", report.errors.len()));
    }
    Ok(())
}
