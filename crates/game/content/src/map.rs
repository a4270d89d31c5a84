//! Grid map with impassable tiles.

use std::collections::BTreeSet;

use tactics_core::{MapDimensions, MapOracle, Position};

/// Rectangular map where some tiles cannot be entered.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMap {
    dimensions: MapDimensions,
    blocked: BTreeSet<Position>,
}

impl GridMap {
    pub fn new(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            blocked: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_blocked(mut self, tiles: impl IntoIterator<Item = Position>) -> Self {
        self.blocked.extend(tiles);
        self
    }

    /// Marks a tile impassable. Returns false if it already was.
    pub fn block(&mut self, position: Position) -> bool {
        self.blocked.insert(position)
    }

    pub fn is_blocked(&self, position: Position) -> bool {
        self.blocked.contains(&position)
    }

    pub fn blocked(&self) -> impl Iterator<Item = Position> + '_ {
        self.blocked.iter().copied()
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn is_passable(&self, position: Position) -> bool {
        !self.is_blocked(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_tiles_are_impassable_but_in_bounds() {
        let map = GridMap::new(MapDimensions::new(4, 4)).with_blocked([Position::new(1, 2)]);
        assert!(map.is_in_bounds(Position::new(1, 2)));
        assert!(!map.is_passable(Position::new(1, 2)));
        assert!(map.is_passable(Position::new(2, 2)));
        assert!(!map.is_in_bounds(Position::new(4, 0)));
    }
}
