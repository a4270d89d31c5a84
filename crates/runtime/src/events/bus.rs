//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::broadcast;

use tactics_core::{TurnEvent, TurnObserver};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Turn flow: turn start/end, phase changes, action mode changes
    Turn,
    /// What actors did: actions performed, defeats, movement, action lists
    Action,
}

impl Topic {
    pub const ALL: [Topic; 2] = [Topic::Turn, Topic::Action];

    /// Topic a session notification is published on.
    pub fn of(event: &TurnEvent) -> Topic {
        match event {
            TurnEvent::TurnStart { .. }
            | TurnEvent::TurnEnd { .. }
            | TurnEvent::PhaseChange { .. }
            | TurnEvent::ActionModeChanged { .. } => Topic::Turn,
            TurnEvent::AvailableActionsChanged { .. }
            | TurnEvent::ActionPerformed { .. }
            | TurnEvent::ActorDefeated { .. }
            | TurnEvent::ActorMoved { .. } => Topic::Action,
        }
    }
}

/// Session notification stamped with its position in the session's event
/// stream. Sequence numbers are shared across topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub sequence: u64,
    pub event: TurnEvent,
}

impl Event {
    pub fn topic(&self) -> Topic {
        Topic::of(&self.event)
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; slow subscribers lag
/// and see `RecvError::Lagged`.
#[derive(Clone)]
pub struct EventBus {
    turn: broadcast::Sender<Event>,
    action: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            turn: broadcast::channel(capacity).0,
            action: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Turn => &self.turn,
            Topic::Action => &self.action,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Coordinator observer that forwards notifications onto an [`EventBus`].
pub struct BusObserver {
    bus: EventBus,
    next_sequence: u64,
}

impl BusObserver {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            next_sequence: 0,
        }
    }
}

impl TurnObserver for BusObserver {
    fn on_event(&mut self, event: &TurnEvent) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.bus.publish(Event {
            sequence,
            event: event.clone(),
        });
    }
}
