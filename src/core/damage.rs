//! Damage formulas shared by the tick loop, manual attacks and skills.
//!
//! These are pure given the game state and the random source. `roll`
//! produces an actual hit; `average` produces the expected value shown to
//! the player.

use crate::core::constants::{
    CRIT_CHANCE_PER_LEVEL, CRIT_MULTIPLIER, RAGE_BASE_MULTIPLIER, RAGE_MULTIPLIER_PER_LEVEL,
    RELIC_BONUS_PER_LEVEL, SHADOW_CLONE_MULTIPLIER, SKILL_CRITICAL, SKILL_RAGE,
    SKILL_SHADOW_CLONE,
};
use crate::core::game_state::GameState;
use rand::Rng;

/// Result of a rolled hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub value: f64,
    pub is_critical: bool,
}

/// Damage after active buffs and relic bonuses, before any crit.
pub fn buffed_damage(state: &GameState, base: f64) -> f64 {
    let mut damage = if base.is_nan() { 0.0 } else { base.max(0.0) };

    if state.is_skill_active(SKILL_RAGE) {
        let level = state.skill_level(SKILL_RAGE).max(1);
        damage *= RAGE_BASE_MULTIPLIER + f64::from(level - 1) * RAGE_MULTIPLIER_PER_LEVEL;
    }

    if state.is_skill_active(SKILL_SHADOW_CLONE) {
        damage *= SHADOW_CLONE_MULTIPLIER;
    }

    damage * (1.0 + relic_bonus(state))
}

/// Fractional damage bonus from all owned relics.
pub fn relic_bonus(state: &GameState) -> f64 {
    state.total_relic_levels() as f64 * RELIC_BONUS_PER_LEVEL
}

/// Chance for a hit to crit, 0.0 unless the Critical skill is active.
pub fn crit_chance(state: &GameState) -> f64 {
    if !state.is_skill_active(SKILL_CRITICAL) {
        return 0.0;
    }
    let level = state.skill_level(SKILL_CRITICAL).max(1);
    (f64::from(level) * CRIT_CHANCE_PER_LEVEL).min(1.0)
}

/// Rolls one hit. A crit deals exactly double.
pub fn roll(state: &GameState, base: f64, rng: &mut impl Rng) -> Hit {
    let damage = buffed_damage(state, base);
    let is_critical = rng.gen::<f64>() < crit_chance(state);
    Hit {
        value: if is_critical {
            damage * CRIT_MULTIPLIER
        } else {
            damage
        },
        is_critical,
    }
}

/// Expected damage of one hit, assuming crits deal exactly double.
pub fn average(state: &GameState, base: f64) -> f64 {
    buffed_damage(state, base) * (1.0 + crit_chance(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn state() -> GameState {
        GameState::new(10)
    }

    #[test]
    fn test_no_buffs_is_identity() {
        let s = state();
        assert_eq!(average(&s, 100.0), 100.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            roll(&s, 100.0, &mut rng),
            Hit {
                value: 100.0,
                is_critical: false
            }
        );
    }

    #[test]
    fn test_invalid_base_is_zero() {
        let s = state();
        assert_eq!(average(&s, f64::NAN), 0.0);
        assert_eq!(average(&s, -5.0), 0.0);
    }

    #[test]
    fn test_rage_scales_with_level() {
        let mut s = state();
        s.active_skill_timers[SKILL_RAGE] = 10;
        // Level 0 counts as level 1.
        assert_eq!(average(&s, 10.0), 20.0);
        s.skill_levels[SKILL_RAGE] = 5;
        assert_eq!(average(&s, 10.0), 40.0);
    }

    #[test]
    fn test_shadow_clone_ignores_level() {
        let mut s = state();
        s.active_skill_timers[SKILL_SHADOW_CLONE] = 1;
        s.skill_levels[SKILL_SHADOW_CLONE] = 80;
        assert_eq!(average(&s, 10.0), 20.0);
    }

    #[test]
    fn test_relic_bonus_sums_levels() {
        let mut s = state();
        s.relic_levels[0] = 5;
        s.relic_levels[9] = 5;
        assert!((average(&s, 100.0) - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_crit_chance_capped() {
        let mut s = state();
        assert_eq!(crit_chance(&s), 0.0);
        s.active_skill_timers[SKILL_CRITICAL] = 5;
        assert_eq!(crit_chance(&s), 0.005);
        s.skill_levels[SKILL_CRITICAL] = 100;
        assert_eq!(crit_chance(&s), 0.5);
        s.skill_levels[SKILL_CRITICAL] = 1000;
        assert_eq!(crit_chance(&s), 1.0);
    }

    #[test]
    fn test_full_crit_always_doubles() {
        let mut s = state();
        s.active_skill_timers[SKILL_CRITICAL] = 5;
        s.skill_levels[SKILL_CRITICAL] = 200;
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let hit = roll(&s, 10.0, &mut rng);
            assert!(hit.is_critical);
            assert_eq!(hit.value, 20.0);
        }
        assert_eq!(average(&s, 10.0), 20.0);
    }

    #[test]
    fn test_average_is_monotonic_and_bounded() {
        let mut s = state();
        s.active_skill_timers = [0, 3, 3, 3];
        s.skill_levels = [0, 40, 3, 1];
        s.relic_levels[4] = 7;
        let ceiling = |base: f64| {
            let buffs = (RAGE_BASE_MULTIPLIER + 2.0 * RAGE_MULTIPLIER_PER_LEVEL) * 2.0;
            base * buffs * (1.0 + relic_bonus(&s)) * 2.0
        };
        let mut previous = 0.0;
        for base in (0..200).map(|b| b as f64 * 3.5) {
            let avg = average(&s, base);
            assert!(avg >= previous);
            assert!(avg <= ceiling(base) + 1e-9);
            previous = avg;
        }
    }

    #[test]
    fn test_crit_rate_roughly_matches_chance() {
        let mut s = state();
        s.active_skill_timers[SKILL_CRITICAL] = 5;
        s.skill_levels[SKILL_CRITICAL] = 50;
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let crits = (0..10_000)
            .filter(|_| roll(&s, 1.0, &mut rng).is_critical)
            .count();
        assert!((2000..3000).contains(&crits), "crits = {crits}");
    }
}
