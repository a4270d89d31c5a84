//! CLI configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Where session content comes from and how the runtime is sized.
///
/// Unset paths fall back to the content embedded in `tactics-content`.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub config_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub scenario_path: Option<PathBuf>,
    pub event_buffer: usize,
    pub command_buffer: usize,
    /// Print events as JSON lines instead of sentences.
    pub json_events: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            catalog_path: None,
            scenario_path: None,
            event_buffer: 100,
            command_buffer: 32,
            json_events: false,
        }
    }
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_CONFIG` - Turn config TOML file
    /// - `TACTICS_CATALOG` - Action catalog RON file
    /// - `TACTICS_SCENARIO` - Scenario RON file
    /// - `TACTICS_EVENT_BUFFER` - Event capacity per topic (default: 100)
    /// - `TACTICS_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `TACTICS_JSON_EVENTS` - Print events as JSON (default: false)
    pub fn from_env() -> Self {
        let mut config = Self {
            config_path: read_env("TACTICS_CONFIG"),
            catalog_path: read_env("TACTICS_CATALOG"),
            scenario_path: read_env("TACTICS_SCENARIO"),
            ..Self::default()
        };

        if let Some(capacity) = read_env::<usize>("TACTICS_EVENT_BUFFER") {
            config.event_buffer = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("TACTICS_COMMAND_BUFFER") {
            config.command_buffer = capacity.max(1);
        }
        if let Some(json) = read_env::<bool>("TACTICS_JSON_EVENTS") {
            config.json_events = json;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
