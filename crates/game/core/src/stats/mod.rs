//! Per-actor resource accounting.
//!
//! - [`StatBlock`]: immutable maximums and combat powers for an archetype
//! - [`ResourceLedger`]: current health, action points and movement points
//! - [`Archetype`]: default stat blocks used to build (or rebuild) a ledger
mod archetype;
mod ledger;

pub use archetype::Archetype;
pub use ledger::{ResourceLedger, StatBlock};
