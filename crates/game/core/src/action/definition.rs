//! Immutable action definitions.

bitflags::bitflags! {
    /// Which candidates an action may target, relative to the performer.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TargetMask: u8 {
        const SELF = 0b001;
        const ALLIES = 0b010;
        const ENEMIES = 0b100;
    }
}

/// Name, cost, reach and targeting rules of an action.
///
/// Immutable after construction; the catalog hands out clones.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDefinition {
    name: String,
    action_point_cost: u32,
    range: u32,
    requires_target: bool,
    targeting: TargetMask,
}

impl ActionDefinition {
    pub fn new(
        name: impl Into<String>,
        action_point_cost: u32,
        range: u32,
        requires_target: bool,
        targeting: TargetMask,
    ) -> Self {
        Self {
            name: name.into(),
            action_point_cost,
            range,
            requires_target,
            targeting,
        }
    }

    /// A definition that never takes a target.
    pub fn untargeted(name: impl Into<String>, action_point_cost: u32) -> Self {
        Self::new(name, action_point_cost, 0, false, TargetMask::empty())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action_point_cost(&self) -> u32 {
        self.action_point_cost
    }

    /// Maximum Manhattan distance to a target.
    pub fn range(&self) -> u32 {
        self.range
    }

    pub fn requires_target(&self) -> bool {
        self.requires_target
    }

    pub fn targeting(&self) -> TargetMask {
        self.targeting
    }

    pub fn can_target_self(&self) -> bool {
        self.targeting.contains(TargetMask::SELF)
    }

    pub fn can_target_allies(&self) -> bool {
        self.targeting.contains(TargetMask::ALLIES)
    }

    pub fn can_target_enemies(&self) -> bool {
        self.targeting.contains(TargetMask::ENEMIES)
    }
}
