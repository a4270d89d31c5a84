//! Target resolution rules shared by every action variant.
//!
//! - Distance is Manhattan distance on integer grid coordinates.
//! - Allies share the performer's player-controlled flag.
//! - Dead candidates are never valid, whatever the action.

use crate::action::ActionDefinition;
use crate::state::{Actor, Position};

pub fn manhattan_distance(from: Position, to: Position) -> u32 {
    from.manhattan_distance(to)
}

pub fn is_ally(actor: &Actor, candidate: &Actor) -> bool {
    actor.is_ally_of(candidate)
}

/// Checks `candidate` against the definition's range and targeting mask.
///
/// Variant-specific filters (such as skipping full-health heal targets) are
/// layered on top by [`crate::action::Action::is_valid_target`].
pub fn is_valid_target(
    definition: &ActionDefinition,
    actor: &Actor,
    candidate: Option<&Actor>,
) -> bool {
    let Some(candidate) = candidate else {
        return false;
    };

    let is_self = candidate.id == actor.id;
    if is_self && !definition.can_target_self() {
        return false;
    }

    if manhattan_distance(actor.position, candidate.position) > definition.range() {
        return false;
    }

    if !is_self {
        let permitted = if is_ally(actor, candidate) {
            definition.can_target_allies()
        } else {
            definition.can_target_enemies()
        };
        if !permitted {
            return false;
        }
    }

    candidate.is_alive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::TargetMask;
    use crate::state::ActorId;
    use crate::stats::Archetype;

    fn at(id: u32, player: bool, x: i32, y: i32) -> Actor {
        Actor::new(ActorId(id), format!("a{id}"), player, Archetype::Warrior, Position::new(x, y))
    }

    fn melee() -> ActionDefinition {
        ActionDefinition::new("Attack", 1, 1, true, TargetMask::ENEMIES)
    }

    #[test]
    fn missing_candidate_is_invalid() {
        assert!(!is_valid_target(&melee(), &at(1, true, 0, 0), None));
    }

    #[test]
    fn range_uses_manhattan_distance() {
        let hero = at(1, true, 0, 0);
        assert!(is_valid_target(&melee(), &hero, Some(&at(2, false, 1, 0))));
        // Diagonal neighbours are two steps away.
        assert!(!is_valid_target(&melee(), &hero, Some(&at(2, false, 1, 1))));
    }

    #[test]
    fn mask_filters_allies_and_self() {
        let hero = at(1, true, 0, 0);
        let friend = at(2, true, 0, 1);
        assert!(!is_valid_target(&melee(), &hero, Some(&hero)));
        assert!(!is_valid_target(&melee(), &hero, Some(&friend)));

        let support = ActionDefinition::new("Heal", 1, 1, true, TargetMask::SELF | TargetMask::ALLIES);
        assert!(is_valid_target(&support, &hero, Some(&hero)));
        assert!(is_valid_target(&support, &hero, Some(&friend)));
        assert!(!is_valid_target(&support, &hero, Some(&at(3, false, 1, 0))));
    }

    #[test]
    fn dead_candidates_are_excluded() {
        let hero = at(1, true, 0, 0);
        let mut goblin = at(2, false, 1, 0);
        goblin.ensure_ledger().apply_damage(10_000);
        goblin.sync_alive();
        assert!(!is_valid_target(&melee(), &hero, Some(&goblin)));
    }
}
