use super::{ActorId, Position};
use crate::stats::{Archetype, ResourceLedger, StatBlock};

/// A controllable unit taking part in the session.
///
/// # Invariants
///
/// - `alive` only ever flips from true to false (defeat), and only when the
///   ledger's health reaches zero
/// - the ledger is mutated exclusively through [`ResourceLedger`] operations
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub player_controlled: bool,
    pub archetype: Archetype,
    pub position: Position,
    ledger: Option<ResourceLedger>,
    alive: bool,
    selected: bool,
}

impl Actor {
    /// Creates an actor with the archetype's default stats, all pools full.
    pub fn new(
        id: ActorId,
        name: impl Into<String>,
        player_controlled: bool,
        archetype: Archetype,
        position: Position,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            player_controlled,
            archetype,
            position,
            ledger: Some(ResourceLedger::new(archetype.default_stats())),
            alive: true,
            selected: false,
        }
    }

    /// Replaces the ledger with one built from `stats`.
    #[must_use]
    pub fn with_stats(mut self, stats: StatBlock) -> Self {
        self.ledger = Some(ResourceLedger::new(stats));
        self
    }

    /// Installs an explicit ledger (e.g. one restored mid-fight).
    #[must_use]
    pub fn with_ledger(mut self, ledger: ResourceLedger) -> Self {
        self.alive = ledger.is_alive();
        self.ledger = Some(ledger);
        self
    }

    /// Drops the ledger. The coordinator rebuilds it from archetype defaults
    /// the next time the actor's resources are needed.
    #[must_use]
    pub fn without_ledger(mut self) -> Self {
        self.ledger = None;
        self
    }

    pub fn ledger(&self) -> Option<&ResourceLedger> {
        self.ledger.as_ref()
    }

    pub fn ledger_mut(&mut self) -> Option<&mut ResourceLedger> {
        self.ledger.as_mut()
    }

    /// Returns the ledger, rebuilding it from archetype defaults if missing.
    pub fn ensure_ledger(&mut self) -> &mut ResourceLedger {
        let (id, archetype) = (self.id, self.archetype);
        self.ledger.get_or_insert_with(|| {
            tracing::warn!(actor = %id, %archetype, "ledger missing, rebuilding from archetype defaults");
            ResourceLedger::new(archetype.default_stats())
        })
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// True when `other` fights on the same side.
    pub fn is_ally_of(&self, other: &Actor) -> bool {
        self.player_controlled == other.player_controlled
    }

    pub fn action_points(&self) -> u32 {
        self.ledger.as_ref().map_or(0, ResourceLedger::action_points)
    }

    pub fn movement_points(&self) -> u32 {
        self.ledger.as_ref().map_or(0, ResourceLedger::movement_points)
    }

    /// True while the actor is alive and either point pool is non-empty.
    pub fn has_remaining_points(&self) -> bool {
        self.alive && self.ledger.as_ref().is_some_and(ResourceLedger::has_remaining)
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Flips the alive flag once the ledger reports zero health.
    ///
    /// Returns true if this call is the one that defeated the actor.
    pub(crate) fn sync_alive(&mut self) -> bool {
        let ledger_alive = self.ledger.as_ref().is_none_or(ResourceLedger::is_alive);
        if self.alive && !ledger_alive {
            self.alive = false;
            self.selected = false;
            return true;
        }
        false
    }
}
