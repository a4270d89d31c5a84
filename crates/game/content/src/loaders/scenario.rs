//! Scenario loader.
//!
//! A scenario is a map layout plus the actors placed on it. Loading checks
//! placement against the map; roster rules (ids, non-empty) are enforced by
//! [`Roster::new`].

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use tactics_core::{
    Actor, ActorId, Archetype, MapDimensions, MapOracle, Position, ResourceLedger, Roster,
    StatBlock,
};

use crate::loaders::{LoadResult, read_file};
use crate::map::GridMap;

const EMBEDDED_SCENARIO: &str = include_str!("../../data/scenarios/skirmish.ron");

#[derive(Debug, Deserialize)]
struct MapSpecRon {
    dimensions: (u32, u32),
    #[serde(default)]
    blocked: Vec<(i32, i32)>,
}

/// One actor placement in a scenario file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ActorSpec {
    pub id: u32,
    pub name: String,
    pub archetype: Archetype,
    pub player: bool,
    pub position: (i32, i32),
    /// Overrides the archetype's default stats.
    #[serde(default)]
    pub stats: Option<StatBlock>,
    /// Starting health; defaults to full.
    #[serde(default)]
    pub health: Option<u32>,
}

impl ActorSpec {
    pub fn into_actor(self) -> Actor {
        let stats = self.stats.unwrap_or_else(|| self.archetype.default_stats());
        let mut ledger = ResourceLedger::new(stats);
        if let Some(health) = self.health {
            ledger = ledger.with_health(health);
        }
        let (x, y) = self.position;
        Actor::new(
            ActorId(self.id),
            self.name,
            self.player,
            self.archetype,
            Position::new(x, y),
        )
        .with_ledger(ledger)
    }
}

#[derive(Debug, Deserialize)]
struct ScenarioRon {
    map: MapSpecRon,
    actors: Vec<ActorSpec>,
}

/// A loaded scenario, ready to hand to a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub map: GridMap,
    pub roster: Roster,
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load scenario {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let data: ScenarioRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        let (width, height) = data.map.dimensions;
        let dimensions = MapDimensions::new(width, height);
        let blocked: Vec<Position> = data
            .map
            .blocked
            .iter()
            .map(|&(x, y)| Position::new(x, y))
            .collect();
        if let Some(outside) = blocked.iter().find(|pos| !dimensions.contains(**pos)) {
            anyhow::bail!("Blocked tile {} lies outside the {}x{} map", outside, width, height);
        }
        let map = GridMap::new(dimensions).with_blocked(blocked);

        let mut occupied = BTreeSet::new();
        let mut actors = Vec::with_capacity(data.actors.len());
        for spec in data.actors {
            let actor = spec.into_actor();
            let position = actor.position;
            if !map.is_in_bounds(position) {
                anyhow::bail!("Actor {} starts outside the map at {}", actor.id, position);
            }
            if !map.is_passable(position) {
                anyhow::bail!("Actor {} starts on blocked tile {}", actor.id, position);
            }
            if !occupied.insert(position) {
                anyhow::bail!("Actor {} starts on occupied tile {}", actor.id, position);
            }
            actors.push(actor);
        }

        let roster = Roster::new(actors).map_err(|e| anyhow::anyhow!("Invalid roster: {}", e))?;
        Ok(Scenario { map, roster })
    }

    /// The scenario shipped with the crate.
    pub fn embedded() -> LoadResult<Scenario> {
        Self::parse(EMBEDDED_SCENARIO)
    }
}
