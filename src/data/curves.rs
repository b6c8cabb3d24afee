//! Built-in scaling curves.
//!
//! All curves return raw `f64`; callers floor costs and rewards.

use crate::core::constants::BOSS_STAGE_INTERVAL;

pub const PLAYER_DAMAGE_BASE: f64 = 10.0;
pub const PLAYER_DAMAGE_GROWTH: f64 = 1.02;
pub const PLAYER_COST_BASE: f64 = 20.0;
pub const PLAYER_COST_GROWTH: f64 = 1.12;

pub const HELPER_DAMAGE_BASE: f64 = 4.0;
pub const HELPER_DAMAGE_GROWTH: f64 = 1.03;
pub const HELPER_COST_BASE: f64 = 15.0;
pub const HELPER_COST_GROWTH: f64 = 1.10;

pub const MONSTER_HP_BASE: f64 = 50.0;
pub const MONSTER_HP_GROWTH: f64 = 1.18;
pub const BOSS_HP_MULTIPLIER: f64 = 8.0;
pub const MONSTER_COIN_BASE: f64 = 5.0;
pub const MONSTER_COIN_GROWTH: f64 = 1.15;

pub const BASE_MAX_SP: u32 = 10;
pub const MAX_SP_PER_LEVEL: u32 = 2;
/// Skill SP cost grows by one every this many levels.
pub const SKILL_COST_LEVEL_STEP: u32 = 5;

fn growth(base: f64, rate: f64, level: u32) -> f64 {
    base * rate.powf(f64::from(level.max(1) - 1))
}

pub fn player_damage(level: u32) -> f64 {
    growth(PLAYER_DAMAGE_BASE * f64::from(level.max(1)), PLAYER_DAMAGE_GROWTH, level)
}

pub fn player_upgrade_cost(level: u32) -> f64 {
    growth(PLAYER_COST_BASE, PLAYER_COST_GROWTH, level)
}

pub fn helper_damage(level: u32, tier_multiplier: f64) -> f64 {
    growth(
        HELPER_DAMAGE_BASE * f64::from(level.max(1)) * tier_multiplier,
        HELPER_DAMAGE_GROWTH,
        level,
    )
}

pub fn helper_upgrade_cost(level: u32, tier_multiplier: f64) -> f64 {
    growth(HELPER_COST_BASE * tier_multiplier, HELPER_COST_GROWTH, level)
}

pub fn is_boss_stage(stage: u32) -> bool {
    stage % BOSS_STAGE_INTERVAL == 0
}

pub fn monster_hp(stage: u32) -> f64 {
    let hp = growth(MONSTER_HP_BASE, MONSTER_HP_GROWTH, stage);
    if is_boss_stage(stage) {
        hp * BOSS_HP_MULTIPLIER
    } else {
        hp
    }
}

pub fn monster_coin(stage: u32) -> f64 {
    growth(MONSTER_COIN_BASE, MONSTER_COIN_GROWTH, stage)
}

pub fn max_sp(level: u32) -> u32 {
    BASE_MAX_SP.saturating_add(MAX_SP_PER_LEVEL.saturating_mul(level.max(1) - 1))
}

pub fn skill_cost(base_sp: u32, level: u32) -> u32 {
    base_sp.saturating_add((level.max(1) - 1) / SKILL_COST_LEVEL_STEP)
}
