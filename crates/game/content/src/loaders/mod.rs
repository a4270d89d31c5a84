//! Content loaders for reading session data from files.
//!
//! Each loader accepts either a path or an in-memory string, and falls back
//! to the default data embedded in this crate via `embedded()`.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod scenario;

pub use catalog::{ActionKindSpec, ActionSpec, CatalogLoader};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use scenario::{ActorSpec, Scenario, ScenarioLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
