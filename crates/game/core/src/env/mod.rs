//! Traits describing read-only world data.
//!
//! The world collaborator owns tile geometry and rendering. The turn rules
//! only ask it whether a grid position can be stood on.
mod map;

pub use map::{MapDimensions, MapOracle};
