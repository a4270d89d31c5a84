use core::time::Duration;

/// Turn flow configuration and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TurnConfig {
    /// End the active actor's turn once its movement points run out.
    pub auto_end_turn_when_no_movements: bool,

    /// End the active actor's turn once its action points run out.
    pub auto_end_turn_when_no_actions: bool,

    /// Delay between the last actor of a phase finishing and the next phase
    /// starting, in milliseconds. Zero transitions immediately.
    pub phase_transition_delay_ms: u64,

    /// Hand the enemy phase straight back to the player after the transition
    /// delay. Disable when an external controller drives enemy actors.
    pub enemy_phase_auto_pass: bool,
}

impl TurnConfig {
    pub const DEFAULT_PHASE_TRANSITION_DELAY_MS: u64 = 1_000;

    pub fn new() -> Self {
        Self {
            auto_end_turn_when_no_movements: true,
            auto_end_turn_when_no_actions: true,
            phase_transition_delay_ms: Self::DEFAULT_PHASE_TRANSITION_DELAY_MS,
            enemy_phase_auto_pass: true,
        }
    }

    pub fn phase_transition_delay(&self) -> Duration {
        Duration::from_millis(self.phase_transition_delay_ms)
    }

    #[must_use]
    pub fn with_phase_transition_delay(mut self, delay: Duration) -> Self {
        self.phase_transition_delay_ms = delay.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_auto_end(mut self, on_no_movements: bool, on_no_actions: bool) -> Self {
        self.auto_end_turn_when_no_movements = on_no_movements;
        self.auto_end_turn_when_no_actions = on_no_actions;
        self
    }

    #[must_use]
    pub fn with_enemy_phase_auto_pass(mut self, enabled: bool) -> Self {
        self.enemy_phase_auto_pass = enabled;
        self
    }

    pub fn auto_end_policy(&self) -> AutoEndPolicy {
        AutoEndPolicy::from_toggles(
            self.auto_end_turn_when_no_movements,
            self.auto_end_turn_when_no_actions,
        )
    }
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// When an actor's turn ends without an explicit command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoEndPolicy {
    /// Only `EndActorTurn` / `ForceEndPhase` end a turn.
    Manual,
    /// Movement exhaustion alone ends the turn.
    OnNoMovements,
    /// Action point exhaustion alone ends the turn.
    OnNoActions,
    /// The turn ends once both pools are empty.
    OnBothExhausted,
}

impl AutoEndPolicy {
    pub fn from_toggles(on_no_movements: bool, on_no_actions: bool) -> Self {
        match (on_no_movements, on_no_actions) {
            (true, true) => Self::OnBothExhausted,
            (true, false) => Self::OnNoMovements,
            (false, true) => Self::OnNoActions,
            (false, false) => Self::Manual,
        }
    }

    pub fn should_end(self, movement_points: u32, action_points: u32) -> bool {
        match self {
            Self::Manual => false,
            Self::OnNoMovements => movement_points == 0,
            Self::OnNoActions => action_points == 0,
            Self::OnBothExhausted => movement_points == 0 && action_points == 0,
        }
    }
}
