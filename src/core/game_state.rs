use crate::character::helper::Helper;
use crate::core::constants::{SKILL_COUNT, STARTING_SP};
use serde::{Deserialize, Serialize};

/// All persisted player progress. Field names match the save format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub coins: u64,
    pub diamonds: u64,
    /// Current encounter, starting at 1.
    pub stage: u32,
    pub player_lv: u32,
    pub sp: u32,
    pub skill_levels: [u32; SKILL_COUNT],
    /// Indexed by relic identity; 0 means not yet found.
    pub relic_levels: Vec<u32>,
    /// Roster order is stable across save/load.
    pub helpers: Vec<Helper>,
    pub skill_cooldowns: [u32; SKILL_COUNT],
    pub active_skill_timers: [u32; SKILL_COUNT],
}

impl GameState {
    /// Default state for a brand-new game with `relic_count` relic slots.
    pub fn new(relic_count: usize) -> Self {
        Self {
            coins: 0,
            diamonds: 0,
            stage: 1,
            player_lv: 1,
            sp: STARTING_SP,
            skill_levels: [0; SKILL_COUNT],
            relic_levels: vec![0; relic_count],
            helpers: Vec::new(),
            skill_cooldowns: [0; SKILL_COUNT],
            active_skill_timers: [0; SKILL_COUNT],
        }
    }

    pub fn is_boss_stage(&self) -> bool {
        crate::data::curves::is_boss_stage(self.stage)
    }

    pub fn relic_level(&self, index: usize) -> u32 {
        self.relic_levels.get(index).copied().unwrap_or(0)
    }

    pub fn skill_level(&self, index: usize) -> u32 {
        self.skill_levels.get(index).copied().unwrap_or(0)
    }

    pub fn is_skill_active(&self, index: usize) -> bool {
        self.active_skill_timers.get(index).is_some_and(|t| *t > 0)
    }

    /// Sum of relic damage levels (each owned level counts once).
    pub fn total_relic_levels(&self) -> u64 {
        self.relic_levels.iter().map(|level| u64::from(*level)).sum()
    }
}
