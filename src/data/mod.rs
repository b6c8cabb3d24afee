//! Read-only reference data: scaling curves, skills, relics and job trees.
//!
//! The engine only talks to [`ReferenceData`]. [`StandardData`] is the
//! built-in table set; tests swap in their own implementation.

pub mod curves;
pub mod jobs;
pub mod relics;
pub mod skills;

pub use jobs::{JobCamp, JobGroup, JobTierEntry, JobTree, Series};
pub use relics::RelicDef;
pub use skills::SkillDef;

use std::collections::BTreeSet;

/// Queries the engine makes against static game data.
pub trait ReferenceData {
    fn player_damage(&self, level: u32) -> f64;
    fn player_upgrade_cost(&self, level: u32) -> f64;
    fn helper_damage(&self, level: u32, tier_multiplier: f64) -> f64;
    fn helper_upgrade_cost(&self, level: u32, tier_multiplier: f64) -> f64;
    fn monster_hp(&self, stage: u32) -> f64;
    fn monster_coin(&self, stage: u32) -> f64;
    fn max_sp(&self, level: u32) -> u32;
    fn skill_cost(&self, skill: usize, level: u32) -> u32;
    fn job_tree(&self, series: Series) -> &JobTree;
    fn skills(&self) -> &[SkillDef];
    fn relics(&self) -> &[RelicDef];

    fn relic_count(&self) -> usize {
        self.relics().len()
    }

    /// Total terminal branches a series can field.
    fn series_branch_count(&self, series: Series) -> usize {
        self.job_tree(series).branch_count()
    }

    /// Distinct tier-4 job names across both series.
    fn terminal_jobs(&self) -> BTreeSet<&str> {
        Series::ALL
            .iter()
            .flat_map(|s| self.job_tree(*s).terminal_jobs())
            .collect()
    }
}

/// The game's built-in tables.
#[derive(Debug, Clone)]
pub struct StandardData {
    maple: JobTree,
    ro: JobTree,
    skills: Vec<SkillDef>,
    relics: Vec<RelicDef>,
}

impl StandardData {
    pub fn new() -> Self {
        Self {
            maple: jobs::maple_tree(),
            ro: jobs::ro_tree(),
            skills: skills::all_skills(),
            relics: relics::all_relics(),
        }
    }

    /// Replaces the job trees, keeping the standard curves.
    pub fn with_job_trees(maple: JobTree, ro: JobTree) -> Self {
        Self {
            maple,
            ro,
            ..Self::new()
        }
    }
}

impl Default for StandardData {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceData for StandardData {
    fn player_damage(&self, level: u32) -> f64 {
        curves::player_damage(level)
    }

    fn player_upgrade_cost(&self, level: u32) -> f64 {
        curves::player_upgrade_cost(level)
    }

    fn helper_damage(&self, level: u32, tier_multiplier: f64) -> f64 {
        curves::helper_damage(level, tier_multiplier)
    }

    fn helper_upgrade_cost(&self, level: u32, tier_multiplier: f64) -> f64 {
        curves::helper_upgrade_cost(level, tier_multiplier)
    }

    fn monster_hp(&self, stage: u32) -> f64 {
        curves::monster_hp(stage)
    }

    fn monster_coin(&self, stage: u32) -> f64 {
        curves::monster_coin(stage)
    }

    fn max_sp(&self, level: u32) -> u32 {
        curves::max_sp(level)
    }

    fn skill_cost(&self, skill: usize, level: u32) -> u32 {
        let base = self.skills.get(skill).map_or(0, |s| s.base_sp);
        curves::skill_cost(base, level)
    }

    fn job_tree(&self, series: Series) -> &JobTree {
        match series {
            Series::Maple => &self.maple,
            Series::Ro => &self.ro,
        }
    }

    fn skills(&self) -> &[SkillDef] {
        &self.skills
    }

    fn relics(&self) -> &[RelicDef] {
        &self.relics
    }
}
