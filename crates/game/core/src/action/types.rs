//! Results produced by resolving an action.

use crate::state::ActorId;

/// The value an effect actually applied.
///
/// Captures both the planned value and what landed after defense or the
/// health cap.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppliedValue {
    Damage { planned: u32, actual: u32 },
    Healing { planned: u32, actual: u32 },
    /// Effect-free actions (defend, wait).
    None,
}

/// Summary of a resolved action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub actor: ActorId,
    pub action: String,
    pub target: Option<ActorId>,
    pub effect: AppliedValue,
    /// Target whose health this action brought to zero.
    pub defeated: Option<ActorId>,
}
