mod app;
mod data_cmd;
mod doctor_cmd;
mod simulate_cmd;
mod status_cmd;
mod terminal_output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use paddock_config::{default_config_path, load_and_prepare, PaddockConfig};
use paddock_gateway::{start_server, GatewayState};

#[derive(Parser)]
#[command(name = "paddock")]
#[command(about = "Paddock: a Formula 1 driver persona for social media")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $PADDOCK_CONFIG or ~/.paddock/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Check whether a server is running
    Status {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run a race weekend without a server
    Simulate {
        /// Circuit key; defaults to the configured circuit
        #[arg(short, long)]
        circuit: Option<String>,
        /// `standard` or `sprint`
        #[arg(short, long, default_value = "standard")]
        weekend: String,
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        driver: Option<String>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the circuits on the calendar
    Circuits,
    /// List the teams on the grid
    Teams,
    /// Validate the config and show the effective settings
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = cli.config.unwrap_or_else(default_config_path);

    match cli.command {
        Commands::Serve { port } => {
            let config = load_and_prepare(&path).await?;
            init_logging(&config, None);
            serve(config, port).await?;
        }
        Commands::Status { port } => {
            let config = load_and_prepare(&path).await?;
            status_cmd::run(&config, port).await?;
        }
        Commands::Simulate { circuit, weekend, team, driver, json } => {
            let config = load_and_prepare(&path).await?;
            // stdout carries the report
            init_logging(&config, Some("warn"));
            let args = simulate_cmd::SimulateArgs { circuit, weekend, team, driver, json };
            simulate_cmd::run(&config, args).await?;
        }
        Commands::Circuits => data_cmd::circuits(),
        Commands::Teams => data_cmd::teams(),
        Commands::Doctor => doctor_cmd::run(&path).await?,
    }

    Ok(())
}

fn init_logging(config: &PaddockConfig, level_override: Option<&str>) {
    let logging = config.logging.clone().unwrap_or_default();
    let level = level_override
        .map(str::to_string)
        .or(logging.level)
        .unwrap_or_else(|| "info".to_string());
    let dir = logging.dir.map(PathBuf::from);
    paddock_logging::init_logger(&level, dir.as_deref(), logging.json.unwrap_or(false));
}

async fn serve(config: PaddockConfig, port: Option<u16>) -> Result<()> {
    let addr = app::listen_addr(&config, port)?;
    let dispatcher = app::build_dispatcher(&config)?;
    let store = app::start_store(&config)?;

    let mut state = GatewayState::new(store, dispatcher);
    if let Some(cookie) = config.session.as_ref().and_then(|s| s.cookie_name.as_deref()) {
        state = state.with_cookie_name(cookie);
    }

    info!(
        addr = %addr,
        speaker = state.dispatcher.speaker().primary_name(),
        "Starting Paddock"
    );
    start_server(addr, state).await
}
