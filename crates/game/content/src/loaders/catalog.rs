//! Action catalog loader.
//!
//! Builds an [`ActionCatalog`] from a RON file listing action specs, alias
//! pairs and per-archetype eligibility.
//!
//! ```ron
//! (
//!     actions: [
//!         (name: "Attack", kind: Attack(base_damage: None), range: 1, enemies: true),
//!         (name: "Heal", kind: Heal(allow_overheal_targeting: false), range: 1, self_target: true, allies: true),
//!         (name: "Wait", kind: NoTarget),
//!     ],
//!     aliases: [("strike", "Attack")],
//!     eligibility: [(warrior, ["Attack", "Wait"])],
//! )
//! ```

use std::path::Path;

use serde::Deserialize;
use tactics_core::{
    Action, ActionBehavior, ActionCatalog, ActionDefinition, Archetype, TargetMask,
};

use crate::loaders::{LoadResult, read_file};

const EMBEDDED_CATALOG: &str = include_str!("../../data/actions.ron");

/// Effect family of an action entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum ActionKindSpec {
    Attack {
        #[serde(default)]
        base_damage: Option<u32>,
    },
    Heal {
        #[serde(default)]
        allow_overheal_targeting: bool,
    },
    NoTarget,
}

/// One action entry in a catalog file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ActionSpec {
    pub name: String,
    pub kind: ActionKindSpec,
    #[serde(default = "default_cost")]
    pub cost: u32,
    #[serde(default)]
    pub range: u32,
    #[serde(default)]
    pub self_target: bool,
    #[serde(default)]
    pub allies: bool,
    #[serde(default)]
    pub enemies: bool,
}

fn default_cost() -> u32 {
    1
}

impl ActionSpec {
    fn target_mask(&self) -> TargetMask {
        let mut mask = TargetMask::empty();
        mask.set(TargetMask::SELF, self.self_target);
        mask.set(TargetMask::ALLIES, self.allies);
        mask.set(TargetMask::ENEMIES, self.enemies);
        mask
    }

    /// Converts the entry into a catalog action.
    pub fn into_action(self) -> LoadResult<Action> {
        let mask = self.target_mask();
        let behavior = match self.kind {
            ActionKindSpec::Attack { base_damage } => ActionBehavior::Attack { base_damage },
            ActionKindSpec::Heal {
                allow_overheal_targeting,
            } => ActionBehavior::Heal {
                allow_overheal_targeting,
            },
            ActionKindSpec::NoTarget => {
                return Ok(Action::new(
                    ActionDefinition::untargeted(self.name, self.cost),
                    ActionBehavior::NoTarget,
                ));
            }
        };

        if mask.is_empty() {
            anyhow::bail!("Action '{}' needs a target but allows none", self.name);
        }
        Ok(Action::new(
            ActionDefinition::new(self.name, self.cost, self.range, true, mask),
            behavior,
        ))
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFileRon {
    actions: Vec<ActionSpec>,
    #[serde(default)]
    aliases: Vec<(String, String)>,
    #[serde(default)]
    eligibility: Vec<(Archetype, Vec<String>)>,
}

/// Loader for action catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ActionCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load catalog {}: {}", path.display(), e))
    }

    /// Build a catalog from RON text.
    ///
    /// Aliases and eligibility entries must name actions defined in the same
    /// file; anything else is reported as an error rather than skipped.
    pub fn parse(content: &str) -> LoadResult<ActionCatalog> {
        let data: CatalogFileRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;

        let mut catalog = ActionCatalog::new();
        for spec in data.actions {
            let name = spec.name.clone();
            if catalog.register(spec.into_action()?).is_some() {
                anyhow::bail!("Action '{}' is defined twice", name);
            }
        }

        for (alias, name) in data.aliases {
            if !catalog.register_alias(&alias, &name) {
                anyhow::bail!("Alias '{}' points at unknown action '{}'", alias, name);
            }
        }

        for (archetype, names) in data.eligibility {
            for name in names {
                if !catalog.contains(&name) {
                    anyhow::bail!("Eligibility for {} names unknown action '{}'", archetype, name);
                }
                catalog.allow(archetype, &name);
            }
        }

        Ok(catalog)
    }

    /// The catalog shipped with the crate.
    pub fn embedded() -> LoadResult<ActionCatalog> {
        Self::parse(EMBEDDED_CATALOG)
    }
}
