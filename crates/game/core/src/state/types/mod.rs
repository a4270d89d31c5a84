pub mod actor;
pub mod common;
pub mod turn;

pub use actor::Actor;
pub use common::{ActorId, Direction, Position};
pub use turn::{Phase, TurnMode, TurnState};
