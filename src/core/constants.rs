//! Balance and timing constants shared by the engine, the headless runner
//! and the simulator.

// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 1000;
pub const PLAYER_ATTACK_INTERVAL_MS: i64 = 3000;
/// Assumed manual clicks per second, used only for the displayed DPS.
pub const CLICK_CPS_RATIO: f64 = 5.0;

// Skills and relics
pub const SKILL_COUNT: usize = 4;
pub const MAX_SKILL_LEVEL: u32 = 100;
pub const SKILL_UPGRADE_COST_STEP: u64 = 500;
pub const RELIC_BONUS_PER_LEVEL: f64 = 0.02;
pub const RELIC_FIRST_UPGRADE_COST: u64 = 10;
pub const RELIC_UPGRADE_COST_PER_LEVEL: u64 = 5;
pub const MAX_RELIC_LEVEL: u32 = 10_000;

/// Skill slot indices.
pub const SKILL_HEAVY_STRIKE: usize = 0;
pub const SKILL_CRITICAL: usize = 1;
pub const SKILL_RAGE: usize = 2;
pub const SKILL_SHADOW_CLONE: usize = 3;

// Damage buffs
pub const RAGE_BASE_MULTIPLIER: f64 = 2.0;
pub const RAGE_MULTIPLIER_PER_LEVEL: f64 = 0.5;
pub const SHADOW_CLONE_MULTIPLIER: f64 = 2.0;
pub const CRIT_CHANCE_PER_LEVEL: f64 = 0.005;
pub const CRIT_MULTIPLIER: f64 = 2.0;
pub const HEAVY_STRIKE_BASE_MULTIPLIER: f64 = 100.0;
pub const BUFF_BASE_DURATION_SECS: u32 = 30;

// Helpers and promotion
pub const MAX_HELPER_LEVEL: u32 = 200;
pub const CAMP_GATE_LEVEL: u32 = 1;
pub const FIRST_JOB_LEVEL: u32 = 10;
pub const SECOND_JOB_LEVEL: u32 = 30;
pub const THIRD_JOB_LEVEL: u32 = 70;
pub const FOURTH_JOB_LEVEL: u32 = 120;
/// Damage and cost multiplier indexed by attained tier (0 = no job).
pub const TIER_MULTIPLIERS: [f64; 5] = [1.0, 5.0, 10.0, 20.0, 50.0];
pub const GRAND_SLAM_MULTIPLIER: f64 = 100.0;

// Player
/// Level cap. Upgrade costs stay finite well past it.
pub const MAX_PLAYER_LEVEL: u32 = 5_000;

// Monsters and rewards
/// Highest stage a save may resume on. Monster health stays finite up to it.
pub const MAX_STAGE: u32 = 4_000;
pub const BOSS_STAGE_INTERVAL: u32 = 10;
pub const BOSS_COIN_MULTIPLIER: f64 = 5.0;
/// Relic slots that also raise coin rewards, with their per-level bonus.
pub const COIN_RELICS: [(usize, f64); 2] = [(2, 0.05), (8, 0.04)];
pub const BOSS_RELIC_DROP_CHANCE: f64 = 0.4;
pub const BOSS_DIAMONDS: u64 = 5;
pub const FULL_COLLECTION_DIAMONDS: u64 = 10;

// Starting values
pub const STARTING_SP: u32 = 10;

// Persistence
/// Durable-store key. Bumped when the schema changes incompatibly.
pub const SAVE_KEY: &str = "rpg_adventure.save.v1";
pub const EXPORT_CHECKSUM_HEX_LEN: usize = 8;
