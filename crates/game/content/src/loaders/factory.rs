//! Content factory for building session content from a data directory.

use std::path::{Path, PathBuf};

use tactics_core::{ActionCatalog, TurnConfig};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult, Scenario, ScenarioLoader};

/// Content factory that loads session content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── actions.ron
/// └── scenarios/
///     └── skirmish.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load turn configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<TurnConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the action catalog from `actions.ron`.
    pub fn load_catalog(&self) -> LoadResult<ActionCatalog> {
        CatalogLoader::load(&self.data_dir.join("actions.ron"))
    }

    /// Load a scenario from `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let path = self.data_dir.join("scenarios").join(format!("{}.ron", name));
        ScenarioLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
