//! Currency sinks: player, helper, skill and relic level-ups.
//!
//! Every function checks affordability before touching the state and
//! returns the amount spent.

use super::promotion::pending_gate;
use crate::core::constants::{
    MAX_PLAYER_LEVEL, MAX_RELIC_LEVEL, MAX_SKILL_LEVEL, RELIC_FIRST_UPGRADE_COST,
    RELIC_UPGRADE_COST_PER_LEVEL, SKILL_UPGRADE_COST_STEP,
};
use crate::core::error::{finite, ActionError};
use crate::core::game_state::GameState;
use crate::data::ReferenceData;

fn floor_cost(value: f64) -> u64 {
    value.floor().max(0.0) as u64
}

fn spend_coins(state: &mut GameState, cost: u64) -> Result<(), ActionError> {
    if state.coins < cost {
        return Err(ActionError::InsufficientCoins {
            needed: cost,
            have: state.coins,
        });
    }
    state.coins -= cost;
    Ok(())
}

pub fn player_upgrade_cost(
    state: &GameState,
    data: &dyn ReferenceData,
) -> Result<u64, ActionError> {
    let cost = finite("player_upgrade_cost", data.player_upgrade_cost(state.player_lv))?;
    Ok(floor_cost(cost))
}

pub fn upgrade_player(state: &mut GameState, data: &dyn ReferenceData) -> Result<u64, ActionError> {
    if state.player_lv >= MAX_PLAYER_LEVEL {
        return Err(ActionError::MaxLevel);
    }
    let cost = player_upgrade_cost(state, data)?;
    spend_coins(state, cost)?;
    state.player_lv += 1;
    Ok(cost)
}

/// Cost of the helper's next ordinary level-up.
pub fn helper_upgrade_cost(
    state: &GameState,
    index: usize,
    data: &dyn ReferenceData,
) -> Result<u64, ActionError> {
    let helper = state.helpers.get(index).ok_or(ActionError::InvalidIndex {
        kind: "helper",
        index,
    })?;
    let cost = finite(
        "helper_upgrade_cost",
        data.helper_upgrade_cost(helper.level, helper.tier_multiplier()),
    )?;
    Ok(floor_cost(cost))
}

/// Levels a helper up by one.
///
/// A pending promotion gate takes precedence: the caller is told which gate
/// to resolve and nothing is spent.
pub fn upgrade_helper(
    state: &mut GameState,
    index: usize,
    data: &dyn ReferenceData,
) -> Result<u64, ActionError> {
    let helper = state.helpers.get(index).ok_or(ActionError::InvalidIndex {
        kind: "helper",
        index,
    })?;
    if let Some(gate) = pending_gate(helper) {
        return Err(ActionError::PromotionPending { index, gate });
    }
    if helper.is_max_level() {
        return Err(ActionError::MaxLevel);
    }
    let cost = helper_upgrade_cost(state, index, data)?;
    spend_coins(state, cost)?;
    state.helpers[index].level += 1;
    Ok(cost)
}

pub fn skill_upgrade_cost(level: u32) -> u64 {
    u64::from(level + 1) * SKILL_UPGRADE_COST_STEP
}

pub fn upgrade_skill(state: &mut GameState, skill: usize) -> Result<u64, ActionError> {
    let level = *state
        .skill_levels
        .get(skill)
        .ok_or(ActionError::InvalidIndex {
            kind: "skill",
            index: skill,
        })?;
    if level >= MAX_SKILL_LEVEL {
        return Err(ActionError::MaxLevel);
    }
    let cost = skill_upgrade_cost(level);
    spend_coins(state, cost)?;
    state.skill_levels[skill] += 1;
    Ok(cost)
}

/// Diamond cost to raise a relic from `level`.
pub fn relic_upgrade_cost(level: u32) -> u64 {
    if level == 0 {
        RELIC_FIRST_UPGRADE_COST
    } else {
        u64::from(level) * RELIC_UPGRADE_COST_PER_LEVEL
    }
}

/// Raises a relic by one level. An unowned relic can be bought outright
/// at the flat first-level price.
pub fn upgrade_relic(state: &mut GameState, relic: usize) -> Result<u64, ActionError> {
    let level = *state
        .relic_levels
        .get(relic)
        .ok_or(ActionError::InvalidIndex {
            kind: "relic",
            index: relic,
        })?;
    if level >= MAX_RELIC_LEVEL {
        return Err(ActionError::MaxLevel);
    }
    let cost = relic_upgrade_cost(level);
    if state.diamonds < cost {
        return Err(ActionError::InsufficientDiamonds {
            needed: cost,
            have: state.diamonds,
        });
    }
    state.diamonds -= cost;
    state.relic_levels[relic] += 1;
    Ok(cost)
}
