//! Active skill casting.
//!
//! Slot 0 is an instant strike against the current monster. The other slots
//! start a buff timer that the damage engine reads while it is positive.

use crate::core::constants::HEAVY_STRIKE_BASE_MULTIPLIER;
use crate::core::damage::{self, Hit};
use crate::core::error::{finite, ActionError};
use crate::core::game_state::GameState;
use crate::core::monster::{apply_damage, KillReport, Monster};
use crate::data::ReferenceData;
use rand::Rng;

/// What a cast did.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillEffect {
    Strike {
        hit: Hit,
        kill: Option<KillReport>,
    },
    Buff {
        duration_secs: u32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillCast {
    pub skill: usize,
    pub sp_spent: u32,
    pub effect: SkillEffect,
}

/// SP needed to cast `skill` at its current level.
pub fn skill_sp_cost(state: &GameState, skill: usize, data: &dyn ReferenceData) -> u32 {
    data.skill_cost(skill, state.skill_level(skill).max(1))
}

/// Seconds until `skill` can be cast, 0 when ready.
pub fn cooldown_remaining(state: &GameState, skill: usize) -> u32 {
    state.skill_cooldowns.get(skill).copied().unwrap_or(0)
}

/// Checks every cast precondition without changing anything.
pub fn can_cast(
    state: &GameState,
    skill: usize,
    data: &dyn ReferenceData,
) -> Result<u32, ActionError> {
    if skill >= state.skill_levels.len() || data.skills().get(skill).is_none() {
        return Err(ActionError::InvalidIndex {
            kind: "skill",
            index: skill,
        });
    }
    if state.skill_level(skill) == 0 {
        return Err(ActionError::SkillNotLearned(skill));
    }
    let remaining = cooldown_remaining(state, skill);
    if remaining > 0 {
        return Err(ActionError::OnCooldown { skill, remaining });
    }
    let cost = skill_sp_cost(state, skill, data);
    if state.sp < cost {
        return Err(ActionError::InsufficientSp {
            needed: cost,
            have: state.sp,
        });
    }
    Ok(cost)
}

/// Casts `skill`, spending SP and starting its cooldown.
///
/// An instant strike is applied to `monster` before anything is paid, so a
/// failed strike leaves SP and cooldowns unchanged.
pub fn cast_skill(
    state: &mut GameState,
    monster: &mut Monster,
    skill: usize,
    data: &dyn ReferenceData,
    rng: &mut impl Rng,
) -> Result<SkillCast, ActionError> {
    let cost = can_cast(state, skill, data)?;
    let Some(def) = data.skills().get(skill) else {
        return Err(ActionError::InvalidIndex {
            kind: "skill",
            index: skill,
        });
    };
    let level = state.skill_level(skill);
    let cooldown = def.cooldown_secs;

    let effect = if def.is_instant() {
        let base = finite("player_damage", data.player_damage(state.player_lv))?;
        let rolled = damage::roll(state, base, rng);
        let hit = Hit {
            value: rolled.value * (HEAVY_STRIKE_BASE_MULTIPLIER + f64::from(level - 1)),
            is_critical: rolled.is_critical,
        };
        let kill = apply_damage(state, monster, hit.value, data, rng)?;
        SkillEffect::Strike { hit, kill }
    } else {
        let duration_secs = def.duration_at(level);
        state.active_skill_timers[skill] = duration_secs;
        SkillEffect::Buff { duration_secs }
    };

    state.sp -= cost;
    state.skill_cooldowns[skill] = cooldown;
    log::debug!("cast {} (level {level}) for {cost} SP", def.name);

    Ok(SkillCast {
        skill,
        sp_spent: cost,
        effect,
    })
}
