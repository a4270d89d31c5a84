//! Deterministic turn rules for a grid-based tactics session.
//!
//! `tactics-core` defines the canonical rules (resource ledgers, action
//! catalog, targeting, phase state machine) and exposes synchronous APIs that
//! the runtime drives one command at a time. All session mutation flows
//! through [`engine::TurnCoordinator`], and supporting crates depend on the
//! types re-exported here.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;

pub use action::{
    Action, ActionBehavior, ActionCatalog, ActionDefinition, ActionOutcome, AppliedValue,
    TargetMask,
};
pub use config::{AutoEndPolicy, TurnConfig};
pub use engine::{
    CommandError, EventSink, ObserverId, ObserverRegistry, PendingTransition, PhaseTimer,
    SessionSnapshot, TargetRef, TurnCoordinator, TurnEnv, TurnEvent, TurnObserver,
};
pub use env::{MapDimensions, MapOracle};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Actor, ActorId, Direction, InitializationError, Phase, Position, Roster, TurnMode, TurnState,
};
pub use stats::{Archetype, ResourceLedger, StatBlock};
