//! Authoritative session state representation.
//!
//! This module owns the data structures that describe actors, the roster, and
//! turn bookkeeping. Runtime layers clone or query this state but mutate it
//! exclusively through the coordinator.
mod error;
mod roster;
pub mod types;

pub use error::InitializationError;
pub use roster::Roster;
pub use types::{Actor, ActorId, Direction, Phase, Position, TurnMode, TurnState};
