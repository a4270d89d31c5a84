//! Turn configuration loader.

use std::path::Path;

use tactics_core::TurnConfig;

use crate::loaders::{LoadResult, read_file};

const EMBEDDED_CONFIG: &str = include_str!("../../data/config.toml");

/// Loader for turn configuration from TOML files.
///
/// Missing keys take their defaults, so an empty file is a valid config.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<TurnConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<TurnConfig> {
        let config: TurnConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Ok(config)
    }

    /// The configuration shipped with the crate.
    pub fn embedded() -> LoadResult<TurnConfig> {
        Self::parse(EMBEDDED_CONFIG)
    }
}
