//! Common error infrastructure for tactics-core.
//!
//! Domain-specific errors (`CommandError`, `InitializationError`) live beside
//! the modules that produce them. This module provides the classification
//! shared by all of them.
//!
//! Nothing in the core is fatal: a rejected command leaves the session exactly
//! as it was, and callers decide whether to surface, log, or ignore it.

/// Severity level of an error, used for categorization and logging priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The command may succeed later without changing it.
    ///
    /// Examples: destination occupied, out of movement points.
    Recoverable,

    /// The command does not make sense in the current state.
    ///
    /// Examples: unknown action name, target selected outside target mode.
    Validation,

    /// The session data is inconsistent.
    ///
    /// Examples: duplicate actor ids in a roster.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if retrying the same command later may succeed.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug in the caller's data.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all tactics-core errors.
///
/// Use `#[derive(thiserror::Error)]` for the Display/Error impl and classify
/// severity by recoverability, not impact.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for this error variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
