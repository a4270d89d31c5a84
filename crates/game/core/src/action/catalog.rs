//! Action registry and per-archetype eligibility.
//!
//! The catalog is constructed once per session and passed by reference to
//! whoever needs it; there is no global lookup.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::Action;
use crate::state::{Actor, Roster};
use crate::stats::Archetype;

/// Registry mapping action names to actions, with aliases and eligibility.
#[derive(Clone, Debug, Default)]
pub struct ActionCatalog {
    actions: HashMap<String, Action>,
    aliases: HashMap<String, String>,
    eligibility: HashMap<Archetype, Vec<String>>,
}

impl ActionCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog with the stock actions, aliases and eligibility.
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        catalog.register(Action::attack());
        catalog.register(Action::ranged_attack());
        catalog.register(Action::heal());
        catalog.register(Action::no_target(Action::DEFEND));
        catalog.register(Action::no_target(Action::WAIT));

        const ALIASES: &[(&str, &str)] = &[
            ("melee", Action::ATTACK),
            ("melee attack", Action::ATTACK),
            ("strike", Action::ATTACK),
            ("ranged", Action::RANGED_ATTACK),
            ("ranged attack", Action::RANGED_ATTACK),
            ("shoot", Action::RANGED_ATTACK),
            ("cure", Action::HEAL),
            ("mend", Action::HEAL),
            ("guard", Action::DEFEND),
            ("block", Action::DEFEND),
            ("skip", Action::WAIT),
            ("pass", Action::WAIT),
        ];
        for (alias, name) in ALIASES {
            catalog.register_alias(alias, name);
        }

        const ELIGIBILITY: &[(Archetype, &[&str])] = &[
            (Archetype::Warrior, &[Action::ATTACK, Action::DEFEND, Action::WAIT]),
            (Archetype::Archer, &[Action::ATTACK, Action::RANGED_ATTACK, Action::WAIT]),
            (Archetype::Healer, &[Action::ATTACK, Action::HEAL, Action::WAIT]),
            (Archetype::Monster, &[Action::ATTACK, Action::WAIT]),
        ];
        for (archetype, names) in ELIGIBILITY {
            for name in *names {
                catalog.allow(*archetype, name);
            }
        }

        catalog
    }

    /// Registers (or replaces) an action under its definition name.
    ///
    /// The name also becomes an alias of itself. Other entries are untouched.
    /// Returns the action previously registered under that name.
    pub fn register(&mut self, action: Action) -> Option<Action> {
        let name = action.name().to_owned();
        self.aliases.insert(normalize(&name), name.clone());
        let previous = self.actions.insert(name.clone(), action);
        debug!(action = %name, replaced = previous.is_some(), "registered action");
        previous
    }

    /// Removes an action and every alias pointing at it.
    ///
    /// Eligibility lists keep the name; it is skipped until re-registered.
    pub fn unregister(&mut self, name: &str) -> Option<Action> {
        let removed = self.actions.remove(name)?;
        self.aliases.retain(|_, target| target != name);
        debug!(action = %name, "unregistered action");
        Some(removed)
    }

    /// Adds a case-insensitive synonym for a registered action.
    ///
    /// Returns false when `name` is not registered.
    pub fn register_alias(&mut self, alias: &str, name: &str) -> bool {
        if !self.actions.contains_key(name) {
            warn!(%alias, action = %name, "alias points at an unregistered action");
            return false;
        }
        self.aliases.insert(normalize(alias), name.to_owned());
        true
    }

    /// Lets `archetype` use the action called `name`. Duplicates are ignored.
    pub fn allow(&mut self, archetype: Archetype, name: &str) {
        let names = self.eligibility.entry(archetype).or_default();
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_owned());
        }
    }

    pub fn disallow(&mut self, archetype: Archetype, name: &str) {
        if let Some(names) = self.eligibility.get_mut(&archetype) {
            names.retain(|existing| existing != name);
        }
    }

    /// Action names the archetype may use, in eligibility order.
    pub fn actions_for(&self, archetype: Archetype) -> &[String] {
        self.eligibility
            .get(&archetype)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Exact, case-sensitive lookup by canonical name.
    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Resolves a canonical name or alias to its canonical name.
    pub fn resolve_name(&self, text: &str) -> Option<&str> {
        if let Some((name, _)) = self.actions.get_key_value(text) {
            return Some(name.as_str());
        }
        self.aliases.get(&normalize(text)).map(String::as_str)
    }

    /// Builds an action instance from free text such as "melee attack".
    ///
    /// Unresolved text yields `None` and a logged diagnostic.
    pub fn create_by_alias(&self, text: &str) -> Option<Action> {
        let action = self.resolve_name(text).and_then(|name| self.actions.get(name));
        if action.is_none() {
            warn!(alias = %text, "no action matches alias");
        }
        action.cloned()
    }

    /// Registered canonical names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions the actor's archetype may use that it could perform right now.
    pub fn available_actions(&self, actor: &Actor, roster: &Roster) -> Vec<String> {
        self.actions_for(actor.archetype)
            .iter()
            .filter(|name| match self.actions.get(name.as_str()) {
                Some(action) => action.can_perform(actor, None, roster),
                None => {
                    debug!(action = %name, archetype = %actor.archetype, "eligible action is not registered");
                    false
                }
            })
            .cloned()
            .collect()
    }
}

/// Lowercases and collapses separators so "Melee_Attack" matches "melee attack".
fn normalize(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
