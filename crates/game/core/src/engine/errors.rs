//! Error types for coordinator commands.

use core::fmt;

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActorId, Direction, Phase, Position, TurnMode};

/// How a command names its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRef {
    /// A specific actor.
    Id(ActorId),
    /// Position in the pending action's valid-target list.
    Index(usize),
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetRef::Id(id) => write!(f, "actor {id}"),
            TargetRef::Index(index) => write!(f, "target index {index}"),
        }
    }
}

/// Why a command was rejected.
///
/// A rejected command leaves the session exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandError {
    #[error("session has not started")]
    NotStarted,

    #[error("no living actor holds control in this phase")]
    NoActiveActor,

    #[error("{actor} is not part of the roster")]
    UnknownActor { actor: ActorId },

    #[error("{actor} has been defeated")]
    Defeated { actor: ActorId },

    #[error("{actor} does not act during the {phase} phase")]
    OutOfPhase { actor: ActorId, phase: Phase },

    #[error("command requires {expected} mode, but the turn is in {actual} mode")]
    WrongMode { expected: TurnMode, actual: TurnMode },

    #[error("unknown action '{name}'")]
    UnknownAction { name: String },

    #[error("action '{action}' is not available to {actor}")]
    ActionUnavailable { actor: ActorId, action: String },

    #[error("no action is waiting for a target")]
    NoPendingAction,

    #[error("{target} is not a known target")]
    UnknownTarget { target: TargetRef },

    #[error("{actor} has no movement points left")]
    NoMovementPoints { actor: ActorId },

    #[error("no tile lies {direction} of {position}")]
    OffGrid { position: Position, direction: Direction },

    #[error("{position} is outside the map")]
    OutOfBounds { position: Position },

    #[error("{position} cannot be entered")]
    Impassable { position: Position },

    #[error("{position} is occupied by {occupant}")]
    Occupied { position: Position, occupant: ActorId },
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoMovementPoints { .. } | Self::Occupied { .. } | Self::NoActiveActor => {
                ErrorSeverity::Recoverable
            }
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::NoActiveActor => "NO_ACTIVE_ACTOR",
            Self::UnknownActor { .. } => "UNKNOWN_ACTOR",
            Self::Defeated { .. } => "ACTOR_DEFEATED",
            Self::OutOfPhase { .. } => "OUT_OF_PHASE",
            Self::WrongMode { .. } => "WRONG_MODE",
            Self::UnknownAction { .. } => "UNKNOWN_ACTION",
            Self::ActionUnavailable { .. } => "ACTION_UNAVAILABLE",
            Self::NoPendingAction => "NO_PENDING_ACTION",
            Self::UnknownTarget { .. } => "UNKNOWN_TARGET",
            Self::NoMovementPoints { .. } => "NO_MOVEMENT_POINTS",
            Self::OffGrid { .. } => "OFF_GRID",
            Self::OutOfBounds { .. } => "OUT_OF_BOUNDS",
            Self::Impassable { .. } => "IMPASSABLE",
            Self::Occupied { .. } => "OCCUPIED",
        }
    }
}
