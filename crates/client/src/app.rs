//! Terminal application: content loading, the command loop and event output.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use tactics_content::{CatalogLoader, ConfigLoader, Scenario, ScenarioLoader};
use tactics_core::{ActionCatalog, TurnConfig};
use tactics_runtime::{Event, EventBus, Runtime, RuntimeConfig, RuntimeHandle, Topic};

use crate::config::CliConfig;
use crate::format::{describe_event, describe_snapshot};
use crate::input::{self, HELP, Input};

/// A running session plus the task that prints its events.
pub struct CliApp {
    runtime: Runtime,
    printer: JoinHandle<()>,
}

impl CliApp {
    /// Loads content, starts the runtime and begins printing events.
    pub async fn build(config: CliConfig) -> Result<Self> {
        let turn = load_turn_config(&config)?;
        let catalog = load_catalog(&config)?;
        let scenario = load_scenario(&config)?;
        tracing::info!(
            actors = scenario.roster.len(),
            actions = catalog.len(),
            "content loaded"
        );

        // Subscribe before the session starts so the opening events print.
        let bus = EventBus::with_capacity(config.event_buffer);
        let printer = spawn_printer(
            bus.subscribe(Topic::Turn),
            bus.subscribe(Topic::Action),
            config.json_events,
        );

        let runtime = Runtime::builder()
            .config(RuntimeConfig {
                turn,
                event_buffer_size: config.event_buffer,
                command_buffer_size: config.command_buffer,
            })
            .event_bus(bus)
            .catalog(catalog)
            .scenario(scenario)
            .build()
            .await
            .context("failed to start session")?;

        Ok(Self { runtime, printer })
    }

    pub async fn run(self) -> Result<()> {
        let handle = self.runtime.handle();
        println!("{HELP}");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
            let input = match input::parse(&line) {
                Ok(Some(input)) => input,
                Ok(None) => continue,
                Err(error) => {
                    println!("{error}");
                    continue;
                }
            };
            if input == Input::Quit {
                break;
            }
            if let Err(error) = dispatch(&handle, input).await {
                match error.as_command_error() {
                    Some(reason) => println!("rejected: {reason}"),
                    None => return Err(error).context("session worker failed"),
                }
            }
        }

        drop(handle);
        self.runtime.shutdown().await?;
        self.printer.abort();
        tracing::info!("session closed");
        Ok(())
    }
}

async fn dispatch(handle: &RuntimeHandle, input: Input) -> tactics_runtime::Result<()> {
    match input {
        Input::Move(direction) => {
            handle.move_actor(direction).await?;
        }
        Input::ToggleActions => {
            handle.toggle_action_mode().await?;
        }
        Input::Use(name) => {
            if handle.select_action(name).await?.is_none() {
                print_targets(handle).await?;
            }
        }
        Input::Target(target) => {
            if handle.select_target(target).await?.is_none() {
                println!("nothing happened");
            }
        }
        Input::Cycle => {
            handle.cycle_actor().await?;
        }
        Input::EndTurn => handle.end_actor_turn().await?,
        Input::EndPhase => {
            handle.force_end_phase().await?;
        }
        Input::ListActions => {
            let actions = handle.available_actions().await?;
            if actions.is_empty() {
                println!("no actions available");
            } else {
                println!("actions: {}", actions.join(", "));
            }
        }
        Input::ListTargets => print_targets(handle).await?,
        Input::Status => println!("{}", describe_snapshot(&handle.snapshot().await?)),
        Input::Help => println!("{HELP}"),
        Input::Quit => {}
    }
    Ok(())
}

async fn print_targets(handle: &RuntimeHandle) -> tactics_runtime::Result<()> {
    let targets = handle.pending_targets().await?;
    if targets.is_empty() {
        println!("no valid targets");
    }
    for (index, id) in targets.iter().enumerate() {
        println!("  [{index}] {id}");
    }
    Ok(())
}

fn spawn_printer(
    mut turn_rx: broadcast::Receiver<Event>,
    mut action_rx: broadcast::Receiver<Event>,
    json: bool,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                biased;
                event = turn_rx.recv() => event,
                event = action_rx.recv() => event,
            };
            match received {
                Ok(event) => print_event(&event, json),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event printer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn print_event(event: &Event, json: bool) {
    if !json {
        println!("* {}", describe_event(&event.event));
        return;
    }
    match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(error) => tracing::warn!(%error, "failed to encode event"),
    }
}

fn load_turn_config(config: &CliConfig) -> Result<TurnConfig> {
    match &config.config_path {
        Some(path) => ConfigLoader::load(path),
        None => ConfigLoader::embedded(),
    }
}

fn load_catalog(config: &CliConfig) -> Result<ActionCatalog> {
    match &config.catalog_path {
        Some(path) => CatalogLoader::load(path),
        None => CatalogLoader::embedded(),
    }
}

fn load_scenario(config: &CliConfig) -> Result<Scenario> {
    match &config.scenario_path {
        Some(path) => ScenarioLoader::load(path),
        None => ScenarioLoader::embedded(),
    }
}
