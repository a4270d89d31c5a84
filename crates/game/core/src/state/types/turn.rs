use super::{Actor, ActorId};

/// Top-level turn partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Player,
    Enemy,
}

impl Phase {
    pub const fn is_player(self) -> bool {
        matches!(self, Phase::Player)
    }

    pub const fn next(self) -> Phase {
        match self {
            Phase::Player => Phase::Enemy,
            Phase::Enemy => Phase::Player,
        }
    }

    /// True when `actor` takes its turns during this phase.
    pub fn controls(self, actor: &Actor) -> bool {
        actor.player_controlled == self.is_player()
    }
}

/// What the active actor is currently doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnMode {
    Movement,
    ActionSelect,
    TargetSelect,
}

impl TurnMode {
    /// True in either action sub-mode.
    pub const fn is_action_mode(self) -> bool {
        matches!(self, TurnMode::ActionSelect | TurnMode::TargetSelect)
    }
}

/// Turn bookkeeping for the coordinator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub phase: Phase,

    /// Actor holding control. `None` before the session starts, or while the
    /// current phase has no living actor.
    pub active: Option<ActorId>,

    pub mode: TurnMode,

    /// Canonical name of the action awaiting a target.
    pub pending_action: Option<String>,

    /// Number of player phases started so far.
    pub round: u32,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Player,
            active: None,
            mode: TurnMode::Movement,
            pending_action: None,
            round: 0,
        }
    }

    /// Drops any pending action and target selection.
    pub fn clear_pending(&mut self) {
        self.pending_action = None;
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
