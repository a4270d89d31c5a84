use std::collections::HashSet;

use super::{Actor, ActorId, InitializationError, Phase, Position};

/// The complete, ordered set of actors in a session.
///
/// Roster order is stable and drives actor cycling. Membership is fixed at
/// construction; defeat only flips an actor's alive flag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    actors: Vec<Actor>,
}

impl Roster {
    /// Builds a roster, rejecting empty input and duplicate ids.
    pub fn new(actors: Vec<Actor>) -> Result<Self, InitializationError> {
        if actors.is_empty() {
            return Err(InitializationError::EmptyRoster);
        }

        let mut seen = HashSet::with_capacity(actors.len());
        for actor in &actors {
            if !seen.insert(actor.id) {
                return Err(InitializationError::DuplicateActor(actor.id));
            }
        }

        Ok(Self { actors })
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|actor| actor.id == id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|actor| actor.id == id)
    }

    /// Roster index of `id`.
    pub fn index_of(&self, id: ActorId) -> Option<usize> {
        self.actors.iter().position(|actor| actor.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    /// Actors that take their turns in `phase`, in roster order.
    pub fn group(&self, phase: Phase) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(move |actor| phase.controls(actor))
    }

    pub fn players(&self) -> impl Iterator<Item = &Actor> {
        self.group(Phase::Player)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Actor> {
        self.group(Phase::Enemy)
    }

    /// Living actors of `phase`, in roster order.
    pub fn living(&self, phase: Phase) -> impl Iterator<Item = &Actor> {
        self.group(phase).filter(|actor| actor.is_alive())
    }

    /// Living actor standing on `position`, if any.
    pub fn occupant_at(&self, position: Position) -> Option<&Actor> {
        self.actors
            .iter()
            .find(|actor| actor.is_alive() && actor.position == position)
    }

    /// Next actor of `phase` after `from` (exclusive), wrapping around, that
    /// satisfies `accept`. `from` itself is considered last.
    ///
    /// With `from = None` the scan starts at the front of the roster.
    pub fn next_in_phase(
        &self,
        phase: Phase,
        from: Option<ActorId>,
        accept: impl Fn(&Actor) -> bool,
    ) -> Option<ActorId> {
        let len = self.actors.len();
        let start = match from.and_then(|id| self.index_of(id)) {
            Some(index) => index + 1,
            None => 0,
        };

        (0..len)
            .map(|offset| &self.actors[(start + offset) % len])
            .find(|actor| phase.controls(actor) && accept(actor))
            .map(|actor| actor.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Archetype;

    fn actor(id: u32, player: bool) -> Actor {
        let archetype = if player {
            Archetype::Warrior
        } else {
            Archetype::Monster
        };
        Actor::new(ActorId(id), format!("a{id}"), player, archetype, Position::new(id as i32, 0))
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        assert_eq!(Roster::new(Vec::new()), Err(InitializationError::EmptyRoster));
        assert_eq!(
            Roster::new(vec![actor(1, true), actor(1, false)]),
            Err(InitializationError::DuplicateActor(ActorId(1)))
        );
    }

    #[test]
    fn groups_partition_the_roster() {
        let roster =
            Roster::new(vec![actor(1, true), actor(2, false), actor(3, true), actor(4, false)])
                .unwrap();
        let players: Vec<_> = roster.players().map(|a| a.id).collect();
        let enemies: Vec<_> = roster.enemies().map(|a| a.id).collect();
        assert_eq!(players, vec![ActorId(1), ActorId(3)]);
        assert_eq!(enemies, vec![ActorId(2), ActorId(4)]);
        assert_eq!(players.len() + enemies.len(), roster.len());
    }

    #[test]
    fn next_in_phase_wraps_and_filters() {
        let roster =
            Roster::new(vec![actor(1, true), actor(2, false), actor(3, true), actor(4, false)])
                .unwrap();

        assert_eq!(roster.next_in_phase(Phase::Player, None, |_| true), Some(ActorId(1)));
        assert_eq!(
            roster.next_in_phase(Phase::Player, Some(ActorId(1)), |_| true),
            Some(ActorId(3))
        );
        assert_eq!(
            roster.next_in_phase(Phase::Player, Some(ActorId(3)), |_| true),
            Some(ActorId(1))
        );
        // The starting actor is considered last.
        assert_eq!(
            roster.next_in_phase(Phase::Player, Some(ActorId(1)), |a| a.id == ActorId(1)),
            Some(ActorId(1))
        );
        assert_eq!(roster.next_in_phase(Phase::Enemy, None, |_| false), None);
    }
}
