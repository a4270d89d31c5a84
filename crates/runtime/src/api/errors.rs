//! Unified error types surfaced by the runtime API.
//!
//! Wraps worker coordination failures and rejected session commands so
//! clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use tactics_core::{CommandError, ErrorSeverity, GameError, InitializationError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a roster before building")]
    MissingRoster,

    #[error("runtime requires a map before building")]
    MissingMap,

    #[error("failed to start session")]
    InitialState(#[source] InitializationError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

impl RuntimeError {
    /// True when the session rejected a command and is otherwise healthy.
    pub fn is_rejection(&self) -> bool {
        matches!(self, RuntimeError::Command(_))
    }

    /// The rejected command's reason, if this is a rejection.
    pub fn as_command_error(&self) -> Option<&CommandError> {
        match self {
            RuntimeError::Command(error) => Some(error),
            _ => None,
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Command(error) => error.severity(),
            RuntimeError::InitialState(error) => error.severity(),
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            RuntimeError::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            RuntimeError::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            RuntimeError::MissingRoster => "RUNTIME_MISSING_ROSTER",
            RuntimeError::MissingMap => "RUNTIME_MISSING_MAP",
            RuntimeError::InitialState(error) => error.error_code(),
            RuntimeError::Command(error) => error.error_code(),
        }
    }
}
