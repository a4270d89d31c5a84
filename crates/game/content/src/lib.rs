//! Data-driven content definitions and loaders.
//!
//! This crate houses static session content and provides loaders for RON/TOML data files:
//! - Turn configuration (data-driven via TOML)
//! - Action catalogs with aliases and eligibility (data-driven via RON)
//! - Scenarios: map layout plus starting roster (data-driven via RON)
//!
//! Content is consumed by the runtime when a session is built and is never
//! mutated afterwards. Default data files are embedded in the crate.

pub mod map;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use map::GridMap;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActionKindSpec, ActionSpec, ActorSpec, CatalogLoader, ConfigLoader, ContentFactory, Scenario,
    ScenarioLoader,
};
