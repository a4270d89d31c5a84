use crate::state::Position;

/// Static map oracle answering bounds and passability queries.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;

    fn is_in_bounds(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    /// Whether an actor may stand on `position`. Bounds are checked separately.
    fn is_passable(&self, _position: Position) -> bool {
        true
    }
}

/// Rectangular grid anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        u32::try_from(position.x).is_ok_and(|x| x < self.width)
            && u32::try_from(position.y).is_ok_and(|y| y < self.height)
    }
}

/// An open rectangle with no blocked tiles.
impl MapOracle for MapDimensions {
    fn dimensions(&self) -> MapDimensions {
        *self
    }
}
