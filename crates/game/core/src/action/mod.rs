//! Action domain - validation, targeting and effect resolution.
//!
//! An [`Action`] pairs an immutable [`ActionDefinition`] with an
//! [`ActionBehavior`] variant. Every variant goes through the same contract:
//!
//! - `can_perform`: alive, funded, and (when a target is required) targetable
//! - `is_valid_target`: shared range/ally/alive rules plus variant filters
//! - `valid_targets`: roster-order filter by `is_valid_target`
//! - `resolve`: re-validate, apply the effect, charge the cost, notify
//!
//! # Module Structure
//!
//! - `definition`: `ActionDefinition` and `TargetMask`
//! - `targeting`: distance and ally rules shared by all variants
//! - `catalog`: name/alias registry and per-archetype eligibility
//! - `types`: `ActionOutcome` and `AppliedValue`

pub mod catalog;
pub mod definition;
pub mod targeting;
pub mod types;

pub use catalog::ActionCatalog;
pub use definition::{ActionDefinition, TargetMask};
pub use types::{ActionOutcome, AppliedValue};

use tracing::debug;

use crate::engine::{EventSink, TurnEvent};
use crate::state::{Actor, ActorId, Roster};

/// Effect logic of an action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionBehavior {
    /// Damages the target. Melee and ranged attacks share this variant and
    /// differ only in their definition's range.
    Attack {
        /// Fixed damage overriding the performer's attack power.
        base_damage: Option<u32>,
    },

    /// Restores the performer's heal power to the target.
    Heal {
        /// Keep full-health candidates targetable.
        allow_overheal_targeting: bool,
    },

    /// No target and no effect (defend, wait). Only the cost is charged.
    NoTarget,
}

/// A concrete action: what it costs and reaches, and what it does.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    definition: ActionDefinition,
    behavior: ActionBehavior,
}

impl Action {
    pub const ATTACK: &'static str = "Attack";
    pub const RANGED_ATTACK: &'static str = "RangedAttack";
    pub const HEAL: &'static str = "Heal";
    pub const DEFEND: &'static str = "Defend";
    pub const WAIT: &'static str = "Wait";

    pub fn new(definition: ActionDefinition, behavior: ActionBehavior) -> Self {
        Self {
            definition,
            behavior,
        }
    }

    /// Melee attack: one action point, adjacent enemies.
    pub fn attack() -> Self {
        Self::new(
            ActionDefinition::new(Self::ATTACK, 1, 1, true, TargetMask::ENEMIES),
            ActionBehavior::Attack { base_damage: None },
        )
    }

    /// Ranged attack: same effect as [`Action::attack`], reaching three tiles.
    pub fn ranged_attack() -> Self {
        Self::new(
            ActionDefinition::new(Self::RANGED_ATTACK, 1, 3, true, TargetMask::ENEMIES),
            ActionBehavior::Attack { base_damage: None },
        )
    }

    /// Heal: one action point, self or adjacent allies that are hurt.
    pub fn heal() -> Self {
        Self::new(
            ActionDefinition::new(
                Self::HEAL,
                1,
                1,
                true,
                TargetMask::SELF | TargetMask::ALLIES,
            ),
            ActionBehavior::Heal {
                allow_overheal_targeting: false,
            },
        )
    }

    /// Effect-free action costing one action point.
    pub fn no_target(name: impl Into<String>) -> Self {
        Self::new(ActionDefinition::untargeted(name, 1), ActionBehavior::NoTarget)
    }

    pub fn definition(&self) -> &ActionDefinition {
        &self.definition
    }

    pub fn behavior(&self) -> &ActionBehavior {
        &self.behavior
    }

    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn requires_target(&self) -> bool {
        self.definition.requires_target()
    }

    /// Whether `actor` could perform this action now.
    ///
    /// With `target`, defers to [`Action::is_valid_target`]. Without one, a
    /// targeted action needs at least one valid candidate in `roster`.
    pub fn can_perform(&self, actor: &Actor, target: Option<&Actor>, roster: &Roster) -> bool {
        if !actor.is_alive() {
            return false;
        }
        let funded = actor
            .ledger()
            .is_some_and(|ledger| ledger.can_afford(self.definition.action_point_cost()));
        if !funded {
            return false;
        }

        match target {
            Some(candidate) => self.is_valid_target(actor, Some(candidate)),
            None if self.requires_target() => self.has_valid_target(actor, roster),
            None => true,
        }
    }

    pub fn is_valid_target(&self, actor: &Actor, candidate: Option<&Actor>) -> bool {
        if !targeting::is_valid_target(&self.definition, actor, candidate) {
            return false;
        }

        match (&self.behavior, candidate) {
            (
                ActionBehavior::Heal {
                    allow_overheal_targeting: false,
                },
                Some(candidate),
            ) => candidate
                .ledger()
                .is_some_and(|ledger| !ledger.is_full_health()),
            _ => true,
        }
    }

    /// Valid candidates in roster order.
    pub fn valid_targets(&self, actor: &Actor, roster: &Roster) -> Vec<ActorId> {
        roster
            .iter()
            .filter(|candidate| self.is_valid_target(actor, Some(candidate)))
            .map(|candidate| candidate.id)
            .collect()
    }

    fn has_valid_target(&self, actor: &Actor, roster: &Roster) -> bool {
        roster
            .iter()
            .any(|candidate| self.is_valid_target(actor, Some(candidate)))
    }

    /// Applies the action and charges its cost.
    ///
    /// Re-checks [`Action::can_perform`] first; when that fails (or the
    /// performer/target is unknown) nothing changes and `None` is returned.
    /// A heal without a target heals the performer.
    pub fn resolve(
        &self,
        performer: ActorId,
        target: Option<ActorId>,
        roster: &mut Roster,
        sink: &mut dyn EventSink,
    ) -> Option<ActionOutcome> {
        let target = match (&self.behavior, target) {
            (ActionBehavior::Heal { .. }, None) => Some(performer),
            (_, target) => target,
        };

        let stats = {
            let actor = roster.get(performer)?;
            let candidate = match target {
                Some(id) => Some(roster.get(id)?),
                None => None,
            };
            if !self.can_perform(actor, candidate, roster) {
                debug!(actor = %performer, action = self.name(), "action cannot be performed; ignoring");
                return None;
            }
            if self.requires_target() && candidate.is_none() {
                debug!(actor = %performer, action = self.name(), "targeted action resolved without a target; ignoring");
                return None;
            }
            *actor.ledger()?.stats()
        };

        let effect = match (&self.behavior, target) {
            (ActionBehavior::Attack { base_damage }, Some(target)) => {
                let planned = base_damage.unwrap_or(stats.attack_power);
                let actual = roster.get_mut(target)?.ensure_ledger().apply_damage(planned);
                AppliedValue::Damage { planned, actual }
            }
            (ActionBehavior::Heal { .. }, Some(target)) => {
                let planned = stats.heal_power;
                let actual = roster.get_mut(target)?.ensure_ledger().apply_heal(planned);
                AppliedValue::Healing { planned, actual }
            }
            _ => AppliedValue::None,
        };

        let defeated = target.filter(|id| roster.get_mut(*id).is_some_and(Actor::sync_alive));

        roster
            .get_mut(performer)?
            .ensure_ledger()
            .spend(self.definition.action_point_cost());

        sink.emit(TurnEvent::ActionPerformed {
            actor: performer,
            action: self.name().to_owned(),
            target,
            effect: effect.clone(),
        });
        if let Some(defeated) = defeated {
            sink.emit(TurnEvent::ActorDefeated { actor: defeated });
        }

        Some(ActionOutcome {
            actor: performer,
            action: self.name().to_owned(),
            target,
            effect,
            defeated,
        })
    }
}
