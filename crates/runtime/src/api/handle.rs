//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the session or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use tactics_core::{
    Action, ActionOutcome, ActorId, Direction, Phase, Position, SessionSnapshot, TargetRef,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Sends a command built around a fresh reply channel and awaits the reply.
    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Pass control to the next living actor of the current phase.
    pub async fn cycle_actor(&self) -> Result<ActorId> {
        self.request(|reply| Command::CycleActor { reply }).await?
    }

    /// Switch between movement and action selection. Returns true when the
    /// session is now in action mode.
    pub async fn toggle_action_mode(&self) -> Result<bool> {
        self.request(|reply| Command::ToggleActionMode { reply })
            .await?
    }

    /// Pick an action by name or alias while in action mode.
    pub async fn select_action(&self, name: impl Into<String>) -> Result<Option<ActionOutcome>> {
        let name = name.into();
        self.request(|reply| Command::SelectAction { name, reply })
            .await?
    }

    /// Resolve the pending action against a target.
    pub async fn select_target(&self, target: TargetRef) -> Result<Option<ActionOutcome>> {
        self.request(|reply| Command::SelectTarget { target, reply })
            .await?
    }

    /// Step the active actor one tile.
    pub async fn move_actor(&self, direction: Direction) -> Result<Position> {
        self.request(|reply| Command::MoveActor { direction, reply })
            .await?
    }

    pub async fn end_actor_turn(&self) -> Result<()> {
        self.request(|reply| Command::EndActorTurn { reply }).await?
    }

    /// End the current phase immediately. Returns the phase that started.
    pub async fn force_end_phase(&self) -> Result<Phase> {
        self.request(|reply| Command::ForceEndPhase { reply }).await?
    }

    /// Add or replace a catalog action. Returns the replaced action.
    pub async fn register_action(&self, action: Action) -> Result<Option<Action>> {
        self.request(|reply| Command::RegisterAction { action, reply })
            .await
    }

    pub async fn unregister_action(&self, name: impl Into<String>) -> Result<Option<Action>> {
        let name = name.into();
        self.request(|reply| Command::UnregisterAction { name, reply })
            .await
    }

    /// Actions the active actor could perform right now.
    pub async fn available_actions(&self) -> Result<Vec<String>> {
        self.request(|reply| Command::AvailableActions { reply })
            .await
    }

    /// Valid targets of the action awaiting a target, in index order.
    pub async fn pending_targets(&self) -> Result<Vec<ActorId>> {
        self.request(|reply| Command::PendingTargets { reply })
            .await
    }

    /// Query the current session state (read-only snapshot)
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Turn` - Turn start/end, phase and action mode changes
    /// - `Topic::Action` - Actions performed, defeats, movement, action lists
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use tactics_runtime::Topic;
    ///
    /// let mut turn_rx = handle.subscribe(Topic::Turn);
    /// while let Ok(event) = turn_rx.recv().await {
    ///     // Handle turn events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
