//! Resource ledger - the mutable half of an actor's stats.
//!
//! Maximums and powers come from a [`StatBlock`] fixed at construction.
//! Current values are game state and change only through the operations
//! below, which keep every pool inside `[0, max]`.

/// Maximums and combat powers for an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub max_health: u32,
    pub max_action_points: u32,
    pub max_movement_points: u32,
    pub attack_power: u32,
    pub heal_power: u32,
    pub defense: u32,
}

impl StatBlock {
    pub const fn new(
        max_health: u32,
        max_action_points: u32,
        max_movement_points: u32,
        attack_power: u32,
        heal_power: u32,
        defense: u32,
    ) -> Self {
        Self {
            max_health,
            max_action_points,
            max_movement_points,
            attack_power,
            heal_power,
            defense,
        }
    }
}

/// Current resource values for one actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceLedger {
    stats: StatBlock,
    health: u32,
    action_points: u32,
    movement_points: u32,
}

impl ResourceLedger {
    /// Creates a ledger with every pool at its maximum.
    pub fn new(stats: StatBlock) -> Self {
        Self {
            stats,
            health: stats.max_health,
            action_points: stats.max_action_points,
            movement_points: stats.max_movement_points,
        }
    }

    /// Creates a ledger with the given current health, clamped to the maximum.
    #[must_use]
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.min(self.stats.max_health);
        self
    }

    /// Creates a ledger with the given current action points, clamped to the maximum.
    #[must_use]
    pub fn with_action_points(mut self, points: u32) -> Self {
        self.action_points = points.min(self.stats.max_action_points);
        self
    }

    /// Creates a ledger with the given current movement points, clamped to the maximum.
    #[must_use]
    pub fn with_movement_points(mut self, points: u32) -> Self {
        self.movement_points = points.min(self.stats.max_movement_points);
        self
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.stats.max_health
    }

    pub fn action_points(&self) -> u32 {
        self.action_points
    }

    pub fn max_action_points(&self) -> u32 {
        self.stats.max_action_points
    }

    pub fn movement_points(&self) -> u32 {
        self.movement_points
    }

    pub fn max_movement_points(&self) -> u32 {
        self.stats.max_movement_points
    }

    pub fn attack_power(&self) -> u32 {
        self.stats.attack_power
    }

    pub fn heal_power(&self) -> u32 {
        self.stats.heal_power
    }

    pub fn defense(&self) -> u32 {
        self.stats.defense
    }

    /// Restores action points. Movement is reset separately by the coordinator.
    pub fn reset_for_turn(&mut self) {
        self.action_points = self.stats.max_action_points;
    }

    pub fn reset_movement(&mut self) {
        self.movement_points = self.stats.max_movement_points;
    }

    pub fn zero_movement(&mut self) {
        self.movement_points = 0;
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.action_points >= cost
    }

    pub fn spend(&mut self, cost: u32) {
        self.action_points = self.action_points.saturating_sub(cost);
    }

    /// Deducts movement points if enough remain. Returns false and leaves the
    /// pool untouched otherwise.
    pub fn spend_movement(&mut self, points: u32) -> bool {
        if self.movement_points < points {
            return false;
        }
        self.movement_points -= points;
        true
    }

    /// Applies `raw` damage reduced by defense. At least one point always lands.
    ///
    /// Returns the damage actually dealt.
    pub fn apply_damage(&mut self, raw: u32) -> u32 {
        let actual = raw.saturating_sub(self.stats.defense).max(1);
        self.health = self.health.saturating_sub(actual);
        actual
    }

    /// Restores up to `amount` health, capped at the maximum.
    ///
    /// Returns the health actually restored.
    pub fn apply_heal(&mut self, amount: u32) -> u32 {
        let healed = self.health.saturating_add(amount).min(self.stats.max_health);
        let actual = healed - self.health;
        self.health = healed;
        actual
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_full_health(&self) -> bool {
        self.health >= self.stats.max_health
    }

    /// True while either point pool still has something to spend.
    pub fn has_remaining(&self) -> bool {
        self.movement_points > 0 || self.action_points > 0
    }

    pub fn health_fraction(&self) -> f32 {
        if self.stats.max_health == 0 {
            return 0.0;
        }
        (self.health as f32 / self.stats.max_health as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn block(max_health: u32, defense: u32) -> StatBlock {
        StatBlock::new(max_health, 2, 4, 35, 45, defense)
    }

    #[test]
    fn attack_scenario_deals_damage_minus_defense() {
        let mut target = ResourceLedger::new(block(80, 3));
        assert_eq!(target.apply_damage(35), 32);
        assert_eq!(target.health(), 48);
    }

    #[test]
    fn defense_never_fully_blocks_damage() {
        let mut target = ResourceLedger::new(block(10, 50));
        assert_eq!(target.apply_damage(5), 1);
        assert_eq!(target.health(), 9);
    }

    #[test]
    fn self_heal_is_capped_at_max() {
        let mut healer = ResourceLedger::new(block(80, 0)).with_health(50);
        assert_eq!(healer.apply_heal(45), 30);
        assert_eq!(healer.health(), 80);
    }

    #[test]
    fn spend_saturates_at_zero() {
        let mut ledger = ResourceLedger::new(block(10, 0));
        ledger.spend(5);
        assert_eq!(ledger.action_points(), 0);
        assert!(!ledger.can_afford(1));
        assert!(ledger.can_afford(0));
    }

    #[test]
    fn reset_for_turn_leaves_movement_alone() {
        let mut ledger = ResourceLedger::new(block(10, 0));
        ledger.spend(2);
        ledger.zero_movement();
        ledger.reset_for_turn();
        assert_eq!(ledger.action_points(), 2);
        assert_eq!(ledger.movement_points(), 0);
        ledger.reset_movement();
        assert_eq!(ledger.movement_points(), 4);
    }

    #[test]
    fn spend_movement_refuses_overdraw() {
        let mut ledger = ResourceLedger::new(block(10, 0)).with_movement_points(1);
        assert!(!ledger.spend_movement(2));
        assert_eq!(ledger.movement_points(), 1);
        assert!(ledger.spend_movement(1));
        assert_eq!(ledger.movement_points(), 0);
        assert!(ledger.has_remaining());
        ledger.spend(2);
        assert!(!ledger.has_remaining());
    }

    #[test]
    fn health_fraction_tracks_damage() {
        let mut ledger = ResourceLedger::new(block(80, 0));
        ledger.apply_damage(40);
        assert!((ledger.health_fraction() - 0.5).abs() < f32::EPSILON);
        ledger.apply_damage(200);
        assert_eq!(ledger.health_fraction(), 0.0);
        assert!(!ledger.is_alive());
    }

    proptest! {
        #[test]
        fn damage_law(max in 1u32..500, health in 0u32..500, defense in 0u32..100, raw in 0u32..300) {
            let mut ledger = ResourceLedger::new(block(max, defense)).with_health(health);
            let before = ledger.health();
            let actual = ledger.apply_damage(raw);
            prop_assert_eq!(actual, raw.saturating_sub(defense).max(1));
            prop_assert_eq!(ledger.health(), before.saturating_sub(actual));
        }

        #[test]
        fn heal_law(max in 1u32..500, health in 0u32..500, amount in 0u32..300) {
            let mut ledger = ResourceLedger::new(block(max, 0)).with_health(health);
            let before = ledger.health();
            let actual = ledger.apply_heal(amount);
            prop_assert_eq!(ledger.health(), (before + amount).min(max));
            prop_assert_eq!(actual, ledger.health() - before);
        }
    }
}
