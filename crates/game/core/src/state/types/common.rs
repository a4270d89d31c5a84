use std::fmt;

/// Unique identifier for an actor in the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Grid distance with orthogonal steps only: `|dx| + |dy|`, saturating
    /// at `u32::MAX`.
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }

    /// Position one tile away in `direction`, or `None` past the edge of the
    /// coordinate space.
    pub fn step(self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        Some(Position::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orthogonal step direction for grid movement.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    #[strum(to_string = "north", serialize = "up", serialize = "n")]
    North,
    #[strum(to_string = "south", serialize = "down", serialize = "s")]
    South,
    #[strum(to_string = "east", serialize = "right", serialize = "e")]
    East,
    #[strum(to_string = "west", serialize = "left", serialize = "w")]
    West,
}

impl Direction {
    /// Returns the offset (dx, dy) for this direction.
    ///
    /// Coordinate system: Y-axis increases upward (north), X-axis increases rightward (east).
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}
