//! Line-oriented terminal client for a tactics session.
//!
//! Reads one command per line from stdin, forwards it to the runtime and
//! prints every session event as it is published.
//!
//! ```bash
//! TACTICS_SCENARIO=crates/game/content/data/scenarios/skirmish.ron cargo run -p tactics-cli
//! ```
mod app;
mod config;
mod format;
mod input;

use anyhow::Result;
use app::CliApp;
use config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::from_env();

    CliApp::build(config).await?.run().await
}
