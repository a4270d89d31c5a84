//! Session worker that owns the authoritative [`TurnCoordinator`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), runs them
//! against the coordinator, and keeps the coordinator's session clock in step
//! with tokio time so scheduled phase transitions fire on their own.

use std::future;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};

use tactics_core::{
    Action, ActionCatalog, ActionOutcome, ActorId, Direction, MapOracle, Phase, Position,
    SessionSnapshot, TargetRef, TurnCoordinator, TurnEnv,
};

use crate::api::Result;

/// Commands that can be sent to the session worker
pub enum Command {
    CycleActor {
        reply: oneshot::Sender<Result<ActorId>>,
    },
    ToggleActionMode {
        reply: oneshot::Sender<Result<bool>>,
    },
    SelectAction {
        name: String,
        reply: oneshot::Sender<Result<Option<ActionOutcome>>>,
    },
    SelectTarget {
        target: TargetRef,
        reply: oneshot::Sender<Result<Option<ActionOutcome>>>,
    },
    MoveActor {
        direction: Direction,
        reply: oneshot::Sender<Result<Position>>,
    },
    EndActorTurn {
        reply: oneshot::Sender<Result<()>>,
    },
    ForceEndPhase {
        reply: oneshot::Sender<Result<Phase>>,
    },
    RegisterAction {
        action: Action,
        reply: oneshot::Sender<Option<Action>>,
    },
    UnregisterAction {
        name: String,
        reply: oneshot::Sender<Option<Action>>,
    },
    AvailableActions {
        reply: oneshot::Sender<Vec<String>>,
    },
    PendingTargets {
        reply: oneshot::Sender<Vec<ActorId>>,
    },
    /// Query the current session state (read-only).
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::CycleActor { .. } => "cycle_actor",
            Command::ToggleActionMode { .. } => "toggle_action_mode",
            Command::SelectAction { .. } => "select_action",
            Command::SelectTarget { .. } => "select_target",
            Command::MoveActor { .. } => "move_actor",
            Command::EndActorTurn { .. } => "end_actor_turn",
            Command::ForceEndPhase { .. } => "force_end_phase",
            Command::RegisterAction { .. } => "register_action",
            Command::UnregisterAction { .. } => "unregister_action",
            Command::AvailableActions { .. } => "available_actions",
            Command::PendingTargets { .. } => "pending_targets",
            Command::Snapshot { .. } => "snapshot",
        }
    }
}

/// Background task that processes session commands.
pub struct SessionWorker {
    coordinator: TurnCoordinator,
    catalog: ActionCatalog,
    map: Box<dyn MapOracle>,
    command_rx: mpsc::Receiver<Command>,
    /// Tokio instant matching the coordinator's current clock reading.
    synced_at: Instant,
}

impl SessionWorker {
    /// Creates a new session worker around a started coordinator.
    pub fn new(
        coordinator: TurnCoordinator,
        catalog: ActionCatalog,
        map: Box<dyn MapOracle>,
        command_rx: mpsc::Receiver<Command>,
    ) -> Self {
        info!(
            actors = coordinator.roster().len(),
            actions = catalog.len(),
            "SessionWorker initialized"
        );

        Self {
            coordinator,
            catalog,
            map,
            command_rx,
            synced_at: Instant::now(),
        }
    }

    /// Main worker loop. Exits once every handle has been dropped.
    pub async fn run(mut self) {
        loop {
            let deadline = self
                .coordinator
                .time_until_transition()
                .map(|remaining| self.synced_at + remaining);

            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => {
                        self.sync_clock();
                        self.handle_command(cmd);
                    }
                    None => break,
                },
                _ = wait_until(deadline) => {
                    self.sync_clock();
                }
            }
        }
        debug!("SessionWorker stopped: command channel closed");
    }

    /// Advances the session clock to now, firing a due transition.
    fn sync_clock(&mut self) {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.synced_at);
        self.synced_at = now;
        if self.coordinator.advance(elapsed) {
            debug!(phase = %self.coordinator.turn().phase, "scheduled phase transition fired");
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        let command = cmd.name();
        let env = TurnEnv::new(&self.catalog, self.map.as_ref());
        let delivered = match cmd {
            Command::CycleActor { reply } => {
                reply.send(self.coordinator.cycle_actor().map_err(Into::into)).is_ok()
            }
            Command::ToggleActionMode { reply } => reply
                .send(self.coordinator.toggle_action_mode(env).map_err(Into::into))
                .is_ok(),
            Command::SelectAction { name, reply } => reply
                .send(self.coordinator.select_action(env, &name).map_err(Into::into))
                .is_ok(),
            Command::SelectTarget { target, reply } => reply
                .send(self.coordinator.select_target(env, target).map_err(Into::into))
                .is_ok(),
            Command::MoveActor { direction, reply } => reply
                .send(self.coordinator.move_active(env, direction).map_err(Into::into))
                .is_ok(),
            Command::EndActorTurn { reply } => {
                reply.send(self.coordinator.end_actor_turn().map_err(Into::into)).is_ok()
            }
            Command::ForceEndPhase { reply } => {
                reply.send(self.coordinator.force_end_phase().map_err(Into::into)).is_ok()
            }
            Command::RegisterAction { action, reply } => {
                reply.send(self.catalog.register(action)).is_ok()
            }
            Command::UnregisterAction { name, reply } => {
                reply.send(self.catalog.unregister(&name)).is_ok()
            }
            Command::AvailableActions { reply } => {
                reply.send(self.coordinator.available_actions(env)).is_ok()
            }
            Command::PendingTargets { reply } => {
                reply.send(self.coordinator.pending_targets(env)).is_ok()
            }
            Command::Snapshot { reply } => reply.send(self.coordinator.snapshot()).is_ok(),
        };

        if !delivered {
            debug!(command, "reply channel closed (caller dropped)");
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => future::pending().await,
    }
}
