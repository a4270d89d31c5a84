//! Notifications published by the coordinator and by action resolution.
//!
//! Subscribers (presentation, logging, AI) register a [`TurnObserver`] with
//! the coordinator's [`ObserverRegistry`]; the core never knows who they are.

use crate::action::AppliedValue;
use crate::state::{ActorId, Position};

/// One-way, fire-and-forget notification.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnEvent {
    TurnStart {
        actor: ActorId,
    },
    TurnEnd {
        actor: ActorId,
    },
    PhaseChange {
        is_player_phase: bool,
    },
    AvailableActionsChanged {
        actor: ActorId,
        actions: Vec<String>,
    },
    ActionModeChanged {
        active: bool,
    },
    ActionPerformed {
        actor: ActorId,
        action: String,
        target: Option<ActorId>,
        effect: AppliedValue,
    },
    ActorDefeated {
        actor: ActorId,
    },
    ActorMoved {
        actor: ActorId,
        from: Position,
        to: Position,
    },
}

impl TurnEvent {
    /// Snake-case event name for logs and topic routing.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnEvent::TurnStart { .. } => "turn_start",
            TurnEvent::TurnEnd { .. } => "turn_end",
            TurnEvent::PhaseChange { .. } => "phase_change",
            TurnEvent::AvailableActionsChanged { .. } => "available_actions_changed",
            TurnEvent::ActionModeChanged { .. } => "action_mode_changed",
            TurnEvent::ActionPerformed { .. } => "action_performed",
            TurnEvent::ActorDefeated { .. } => "actor_defeated",
            TurnEvent::ActorMoved { .. } => "actor_moved",
        }
    }
}

/// Destination for events produced while resolving a command.
pub trait EventSink {
    fn emit(&mut self, event: TurnEvent);
}

/// Collects events in order; handy for tests and batch consumers.
impl EventSink for Vec<TurnEvent> {
    fn emit(&mut self, event: TurnEvent) {
        self.push(event);
    }
}

/// Subscriber to coordinator notifications.
pub trait TurnObserver: Send {
    fn on_event(&mut self, event: &TurnEvent);
}

impl<F> TurnObserver for F
where
    F: FnMut(&TurnEvent) + Send,
{
    fn on_event(&mut self, event: &TurnEvent) {
        self(event)
    }
}

/// Handle returned by [`ObserverRegistry::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Ordered set of observers. Events are delivered in subscription order.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<(ObserverId, Box<dyn TurnObserver>)>,
    next_id: u64,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl TurnObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn publish(&mut self, event: &TurnEvent) {
        tracing::trace!(event = event.as_str(), "publishing turn event");
        for (_, observer) in &mut self.observers {
            observer.on_event(event);
        }
    }
}

impl EventSink for ObserverRegistry {
    fn emit(&mut self, event: TurnEvent) {
        self.publish(&event);
    }
}

impl core::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn publishes_in_subscription_order_until_unsubscribed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ObserverRegistry::new();

        let first = {
            let seen = Arc::clone(&seen);
            registry.subscribe(move |event: &TurnEvent| {
                seen.lock().unwrap().push(("first", event.as_str()));
            })
        };
        {
            let seen = Arc::clone(&seen);
            registry.subscribe(move |event: &TurnEvent| {
                seen.lock().unwrap().push(("second", event.as_str()));
            });
        }

        registry.publish(&TurnEvent::ActionModeChanged { active: true });
        assert!(registry.unsubscribe(first));
        assert!(!registry.unsubscribe(first));
        registry.emit(TurnEvent::PhaseChange { is_player_phase: false });

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("first", "action_mode_changed"),
                ("second", "action_mode_changed"),
                ("second", "phase_change"),
            ]
        );
    }
}
