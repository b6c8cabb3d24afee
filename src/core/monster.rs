//! Monster lifecycle: health pool, kills, coin rewards and boss drops.

use crate::core::constants::{
    BOSS_COIN_MULTIPLIER, BOSS_DIAMONDS, BOSS_RELIC_DROP_CHANCE, COIN_RELICS,
    FULL_COLLECTION_DIAMONDS,
};
use crate::core::error::{finite, NonFiniteValue};
use crate::core::game_state::GameState;
use crate::data::ReferenceData;
use rand::Rng;

/// The current encounter. Never persisted; rebuilt from `stage`.
#[derive(Debug, Clone, PartialEq)]
pub struct Monster {
    pub current_hp: f64,
    pub max_hp: f64,
}

impl Monster {
    /// Spawns the monster for `stage` at full health.
    pub fn spawn(stage: u32, data: &dyn ReferenceData) -> Result<Self, NonFiniteValue> {
        let max_hp = finite("monster_hp", data.monster_hp(stage))?;
        Ok(Self {
            current_hp: max_hp,
            max_hp,
        })
    }

    /// A placeholder that [`Monster::is_valid`] rejects.
    pub fn unspawned() -> Self {
        Self {
            current_hp: 0.0,
            max_hp: 0.0,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.current_hp.is_finite() && self.current_hp > 0.0 && self.max_hp.is_finite()
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp > 0.0 {
            (self.current_hp / self.max_hp).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Outcome of a boss drop roll. Exactly one happens per boss kill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossDrop {
    /// First copy of the relic at this index.
    Relic(usize),
    /// Relic roll succeeded but every relic is already owned.
    CollectionBonus { diamonds: u64 },
    Diamonds { diamonds: u64 },
}

/// What a kill paid out.
#[derive(Debug, Clone, PartialEq)]
pub struct KillReport {
    /// Stage the monster was killed on.
    pub stage: u32,
    pub was_boss: bool,
    pub coins: u64,
    pub drop: Option<BossDrop>,
}

/// Coin reward for a kill on the current stage.
pub fn kill_reward(state: &GameState, data: &dyn ReferenceData) -> Result<u64, NonFiniteValue> {
    let base = finite("monster_coin", data.monster_coin(state.stage))?;
    let boss = if state.is_boss_stage() {
        BOSS_COIN_MULTIPLIER
    } else {
        1.0
    };
    let relic_bonus: f64 = COIN_RELICS
        .iter()
        .map(|(index, per_level)| f64::from(state.relic_level(*index)) * per_level)
        .sum();
    Ok((base * boss * (1.0 + relic_bonus)).floor().max(0.0) as u64)
}

/// Rolls the boss drop and applies it to the state.
pub fn roll_boss_drop(state: &mut GameState, rng: &mut impl Rng) -> BossDrop {
    if rng.gen::<f64>() < BOSS_RELIC_DROP_CHANCE {
        let unowned: Vec<usize> = state
            .relic_levels
            .iter()
            .enumerate()
            .filter(|(_, level)| **level == 0)
            .map(|(i, _)| i)
            .collect();
        if unowned.is_empty() {
            state.diamonds = state.diamonds.saturating_add(FULL_COLLECTION_DIAMONDS);
            BossDrop::CollectionBonus {
                diamonds: FULL_COLLECTION_DIAMONDS,
            }
        } else {
            let index = unowned[rng.gen_range(0..unowned.len())];
            state.relic_levels[index] = 1;
            BossDrop::Relic(index)
        }
    } else {
        state.diamonds = state.diamonds.saturating_add(BOSS_DIAMONDS);
        BossDrop::Diamonds {
            diamonds: BOSS_DIAMONDS,
        }
    }
}

/// Subtracts `amount` from the monster. On a kill, pays out, advances the
/// stage and replaces the monster with the next one.
///
/// Reference values are checked before anything is mutated, so an error
/// leaves both the state and the monster untouched.
pub fn apply_damage(
    state: &mut GameState,
    monster: &mut Monster,
    amount: f64,
    data: &dyn ReferenceData,
    rng: &mut impl Rng,
) -> Result<Option<KillReport>, NonFiniteValue> {
    let amount = finite("damage", amount)?;
    let remaining = monster.current_hp - amount;
    if remaining > 0.0 {
        monster.current_hp = remaining;
        return Ok(None);
    }

    let coins = kill_reward(state, data)?;
    let next = Monster::spawn(state.stage.saturating_add(1), data)?;

    monster.current_hp = 0.0;
    let stage = state.stage;
    let was_boss = state.is_boss_stage();
    state.coins = state.coins.saturating_add(coins);
    let drop = was_boss.then(|| roll_boss_drop(state, rng));
    state.stage = state.stage.saturating_add(1);
    *monster = next;

    Ok(Some(KillReport {
        stage,
        was_boss,
        coins,
        drop,
    }))
}
