//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the session.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use tactics_content::Scenario;
use tactics_core::{ActionCatalog, MapOracle, Roster, TurnConfig, TurnCoordinator};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{BusObserver, EventBus};
use crate::workers::{Command, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub turn: TurnConfig,
    /// Broadcast capacity per event topic.
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            turn: TurnConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that hosts one tactics session
///
/// Design: Runtime owns the worker and coordinates its lifetime.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every outstanding [`RuntimeHandle`] clone has
    /// been dropped; this waits for that.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    roster: Option<Roster>,
    catalog: Option<ActionCatalog>,
    map: Option<Box<dyn MapOracle>>,
    event_bus: Option<EventBus>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            roster: None,
            catalog: None,
            map: None,
            event_bus: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the turn rules
    pub fn turn_config(mut self, turn: TurnConfig) -> Self {
        self.config.turn = turn;
        self
    }

    /// Set required starting roster
    pub fn roster(mut self, roster: Roster) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Set the action catalog. Defaults to [`ActionCatalog::with_defaults`].
    pub fn catalog(mut self, catalog: ActionCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set required map oracle
    pub fn map(mut self, map: impl MapOracle + 'static) -> Self {
        self.map = Some(Box::new(map));
        self
    }

    /// Take roster and map from a loaded scenario
    pub fn scenario(self, scenario: Scenario) -> Self {
        self.roster(scenario.roster).map(scenario.map)
    }

    /// Publish onto an existing bus, e.g. to subscribe before the session
    /// starts and see its opening events.
    pub fn event_bus(mut self, bus: EventBus) -> Self {
        self.event_bus = Some(bus);
        self
    }

    /// Build the runtime and start the session
    pub async fn build(self) -> Result<Runtime> {
        let roster = self.roster.ok_or(RuntimeError::MissingRoster)?;
        let map = self.map.ok_or(RuntimeError::MissingMap)?;
        let catalog = self.catalog.unwrap_or_else(ActionCatalog::with_defaults);
        let event_bus = self
            .event_bus
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_buffer_size));

        let mut coordinator = TurnCoordinator::new(roster, self.config.turn.clone());
        coordinator.subscribe(BusObserver::new(event_bus.clone()));
        let first = coordinator.start().map_err(RuntimeError::InitialState)?;
        tracing::info!(actor = %first, "session started");

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus);

        let worker = SessionWorker::new(coordinator, catalog, map, command_rx);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
