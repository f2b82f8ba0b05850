//! `paddock simulate`: run a race weekend offline and print the result.

use anyhow::Result;

use paddock_agent::{ContextStore, Dispatcher};
use paddock_config::PaddockConfig;
use paddock_core::TeamKey;

use crate::app;
use crate::terminal_output::{note_info, render_table, Column};

pub struct SimulateArgs {
    pub circuit: Option<String>,
    pub weekend: String,
    pub team: Option<String>,
    pub driver: Option<String>,
    pub json: bool,
}

pub async fn run(config: &PaddockConfig, args: SimulateArgs) -> Result<()> {
    let mut profile = app::agent_profile(config)?;
    if let Some(team) = &args.team {
        profile.team = team.parse::<TeamKey>()?;
    }
    if let Some(driver) = args.driver {
        profile.driver_name = driver;
    }

    let dispatcher: Dispatcher = app::build_dispatcher(config)?;
    let store = ContextStore::new(profile);
    let session_id = format!("cli-{}", uuid::Uuid::new_v4());
    let shared = store.get_or_create(&session_id).await;
    let mut session = shared.lock().await;

    let report = dispatcher
        .simulate_weekend(&mut session, args.circuit.as_deref().unwrap_or(""), &args.weekend)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    note_info(&format!(
        "{} at {} ({}), voiced by {}",
        session.context.driver_name,
        report.circuit_name,
        report.weekend_type,
        dispatcher.speaker().primary_name()
    ));
    let rows: Vec<Vec<String>> = report
        .sessions
        .iter()
        .map(|s| {
            vec![
                format!("{:?}", s.day),
                s.session.label().to_string(),
                format!("P{}", s.result.position),
                s.result.best_time.clone(),
                s.message.clone(),
            ]
        })
        .collect();
    let columns = [
        Column::left("Day"),
        Column::left("Session"),
        Column::right("Pos"),
        Column::right("Best"),
        Column::left("Message").max(72),
    ];
    print!("{}", render_table(&columns, &rows));
    println!("\n{}", report.final_status);
    Ok(())
}
