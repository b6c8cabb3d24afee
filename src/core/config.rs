//! Runtime engine settings.

use crate::core::constants::{
    CLICK_CPS_RATIO, PLAYER_ATTACK_INTERVAL_MS, SAVE_KEY, TICK_INTERVAL_MS,
};

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Wall-clock spacing of scheduler ticks.
    pub tick_interval_ms: u64,
    /// Minimum time between player auto-attacks.
    pub player_attack_interval_ms: i64,
    /// Assumed manual clicks per second for the displayed DPS.
    pub click_cps_ratio: f64,
    /// Store key for the save blob.
    pub save_key: String,
    /// Persist after every tick and successful action.
    pub autosave: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            player_attack_interval_ms: PLAYER_ATTACK_INTERVAL_MS,
            click_cps_ratio: CLICK_CPS_RATIO,
            save_key: SAVE_KEY.to_string(),
            autosave: true,
        }
    }
}

impl EngineConfig {
    /// Settings for headless runs that never touch the store.
    pub fn without_autosave() -> Self {
        Self {
            autosave: false,
            ..Self::default()
        }
    }
}
