//! Roster construction errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::ActorId;

/// Errors raised while assembling a session roster.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitializationError {
    #[error("roster is empty")]
    EmptyRoster,

    #[error("actor id {0} appears more than once in the roster")]
    DuplicateActor(ActorId),

    #[error("roster has no living player-controlled actor")]
    NoLivingPlayer,
}

impl GameError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyRoster => "ROSTER_EMPTY",
            Self::DuplicateActor(_) => "ROSTER_DUPLICATE_ACTOR",
            Self::NoLivingPlayer => "ROSTER_NO_LIVING_PLAYER",
        }
    }
}
