use super::StatBlock;

/// Actor class. Decides default stats and which catalog actions an actor may use.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Archetype {
    Warrior,
    Archer,
    Healer,
    Monster,
}

impl Archetype {
    /// Stat block used when an actor is created without explicit stats, or
    /// when its ledger has to be rebuilt.
    pub const fn default_stats(self) -> StatBlock {
        match self {
            //                          hp  ap mp  atk heal def
            Archetype::Warrior => StatBlock::new(100, 2, 4, 35, 0, 5),
            Archetype::Archer => StatBlock::new(80, 2, 5, 25, 0, 3),
            Archetype::Healer => StatBlock::new(80, 2, 4, 10, 45, 2),
            Archetype::Monster => StatBlock::new(80, 2, 3, 20, 0, 3),
        }
    }
}
