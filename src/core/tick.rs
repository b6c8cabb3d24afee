//! The per-second combat tick.
//!
//! [`game_tick`] is the state transition the scheduler drives once per
//! interval. It returns a [`TickResult`] describing what happened so the
//! presentation layer can react without the game logic depending on it.

use crate::core::config::EngineConfig;
use crate::core::damage::{self, Hit};
use crate::core::error::{finite, EngineError, NonFiniteValue};
use crate::core::game_state::GameState;
use crate::core::grand_slam::helper_multiplier;
use crate::core::monster::{apply_damage, KillReport, Monster};
use crate::data::ReferenceData;
use rand::Rng;

/// A single event produced by a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    /// The player's auto-attack fired.
    PlayerAttack { hit: Hit },
    /// The helpers' shared attack landed.
    HelperAttack { hit: Hit },
    /// The monster died; the stage has already advanced.
    MonsterKilled(KillReport),
}

/// Display-only damage-per-second estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DpsBreakdown {
    pub player_auto: f64,
    pub helpers: f64,
    pub click: f64,
}

impl DpsBreakdown {
    pub fn total(&self) -> f64 {
        self.player_auto + self.helpers + self.click
    }
}

/// Result of processing a single tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// Events in the order they happened.
    pub events: Vec<TickEvent>,
    pub dps: DpsBreakdown,
}

impl TickResult {
    pub fn kills(&self) -> impl Iterator<Item = &KillReport> {
        self.events.iter().filter_map(|e| match e {
            TickEvent::MonsterKilled(kill) => Some(kill),
            _ => None,
        })
    }
}

/// Player base damage at the current level.
pub fn player_base_damage(
    state: &GameState,
    data: &dyn ReferenceData,
) -> Result<f64, NonFiniteValue> {
    finite("player_damage", data.player_damage(state.player_lv))
}

/// Aggregate raw helper damage, with the Grand Slam multiplier applied.
pub fn helper_raw_damage(
    state: &GameState,
    data: &dyn ReferenceData,
) -> Result<f64, NonFiniteValue> {
    let mut total = 0.0;
    for helper in &state.helpers {
        total += finite(
            "helper_damage",
            data.helper_damage(helper.level, helper.tier_multiplier()),
        )?;
    }
    Ok(total * helper_multiplier(&state.helpers, data))
}

/// Expected helper damage per second.
pub fn helper_dps(state: &GameState, data: &dyn ReferenceData) -> Result<f64, NonFiniteValue> {
    Ok(damage::average(state, helper_raw_damage(state, data)?))
}

pub fn dps_breakdown(
    state: &GameState,
    data: &dyn ReferenceData,
    config: &EngineConfig,
) -> Result<DpsBreakdown, NonFiniteValue> {
    let player_avg = damage::average(state, player_base_damage(state, data)?);
    let interval_secs = config.player_attack_interval_ms.max(1) as f64 / 1000.0;
    Ok(DpsBreakdown {
        player_auto: player_avg / interval_secs,
        helpers: helper_dps(state, data)?,
        click: player_avg * config.click_cps_ratio,
    })
}

/// Processes one tick at time `now_ms`.
///
/// The player attacks when at least one attack interval has passed since
/// `last_player_attack_ms`; the helpers attack every tick. Afterwards SP
/// regenerates by one and every cooldown and buff timer counts down.
///
/// On error the state may be partially updated; the caller is expected to
/// discard the tick (see `Engine::tick`).
pub fn game_tick(
    state: &mut GameState,
    monster: &mut Monster,
    last_player_attack_ms: &mut i64,
    now_ms: i64,
    config: &EngineConfig,
    data: &dyn ReferenceData,
    rng: &mut impl Rng,
) -> Result<TickResult, EngineError> {
    let mut result = TickResult::default();

    let player_base = player_base_damage(state, data)?;
    let helper_raw = helper_raw_damage(state, data)?;

    if now_ms - *last_player_attack_ms >= config.player_attack_interval_ms {
        let hit = damage::roll(state, player_base, rng);
        result.events.push(TickEvent::PlayerAttack { hit });
        if let Some(kill) = apply_damage(state, monster, hit.value, data, rng)? {
            result.events.push(TickEvent::MonsterKilled(kill));
        }
        *last_player_attack_ms = now_ms;
    }

    let hit = damage::roll(state, helper_raw, rng);
    result.events.push(TickEvent::HelperAttack { hit });
    if let Some(kill) = apply_damage(state, monster, hit.value, data, rng)? {
        result.events.push(TickEvent::MonsterKilled(kill));
    }

    result.dps = dps_breakdown(state, data, config)?;

    state.sp = (state.sp + 1).min(data.max_sp(state.player_lv));
    for timer in state
        .skill_cooldowns
        .iter_mut()
        .chain(state.active_skill_timers.iter_mut())
    {
        *timer = timer.saturating_sub(1);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::helper::Helper;
    use crate::core::constants::SKILL_RAGE;
    use crate::data::{Series, StandardData};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Fixture {
        state: GameState,
        monster: Monster,
        last_attack: i64,
        config: EngineConfig,
        data: StandardData,
        rng: ChaCha8Rng,
    }

    impl Fixture {
        fn new() -> Self {
            let data = StandardData::new();
            let state = GameState::new(data.relic_count());
            let monster = Monster::spawn(1, &data).unwrap();
            Self {
                state,
                monster,
                last_attack: 0,
                config: EngineConfig::without_autosave(),
                data,
                rng: ChaCha8Rng::seed_from_u64(11),
            }
        }

        fn tick(&mut self, now_ms: i64) -> TickResult {
            game_tick(
                &mut self.state,
                &mut self.monster,
                &mut self.last_attack,
                now_ms,
                &self.config,
                &self.data,
                &mut self.rng,
            )
            .unwrap()
        }
    }

    fn player_attacks(result: &TickResult) -> usize {
        result
            .events
            .iter()
            .filter(|e| matches!(e, TickEvent::PlayerAttack { .. }))
            .count()
    }

    #[test]
    fn test_player_attack_interval() {
        let mut f = Fixture::new();
        assert_eq!(player_attacks(&f.tick(1000)), 0);
        assert_eq!(player_attacks(&f.tick(2000)), 0);
        assert_eq!(player_attacks(&f.tick(3000)), 1);
        assert_eq!(f.last_attack, 3000);
        assert_eq!(player_attacks(&f.tick(4000)), 0);
        assert_eq!(player_attacks(&f.tick(6000)), 1);
    }

    #[test]
    fn test_player_hit_reduces_monster() {
        let mut f = Fixture::new();
        f.tick(3000);
        assert_eq!(f.monster.current_hp, 50.0 - 10.0);
    }

    #[test]
    fn test_helpers_attack_every_tick() {
        let mut f = Fixture::new();
        f.state.helpers.push(Helper::new(Series::Ro));
        let result = f.tick(1000);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::HelperAttack { hit } if hit.value == 4.0)));
        assert_eq!(f.monster.current_hp, 46.0);
    }

    #[test]
    fn test_sp_regenerates_to_cap() {
        let mut f = Fixture::new();
        f.state.sp = 8;
        f.tick(1000);
        assert_eq!(f.state.sp, 9);
        f.tick(2000);
        f.tick(2500);
        assert_eq!(f.state.sp, 10);
    }

    #[test]
    fn test_timers_count_down_to_zero() {
        let mut f = Fixture::new();
        f.state.skill_cooldowns = [2, 0, 1, 5];
        f.state.active_skill_timers = [0, 1, 3, 0];
        f.tick(1000);
        assert_eq!(f.state.skill_cooldowns, [1, 0, 0, 4]);
        assert_eq!(f.state.active_skill_timers, [0, 0, 2, 0]);
        f.tick(2000);
        f.tick(2100);
        assert_eq!(f.state.skill_cooldowns, [0, 0, 0, 2]);
        assert_eq!(f.state.active_skill_timers, [0, 0, 0, 0]);
    }

    #[test]
    fn test_dps_breakdown() {
        let mut f = Fixture::new();
        f.state.helpers.push(Helper::new(Series::Maple));
        let dps = f.tick(1000).dps;
        assert!((dps.player_auto - 10.0 / 3.0).abs() < 1e-9);
        assert_eq!(dps.helpers, 4.0);
        assert_eq!(dps.click, 50.0);
        assert!((dps.total() - (10.0 / 3.0 + 54.0)).abs() < 1e-9);
    }

    #[test]
    fn test_buffs_apply_to_tick_damage() {
        let mut f = Fixture::new();
        f.state.active_skill_timers[SKILL_RAGE] = 5;
        f.tick(3000);
        assert_eq!(f.monster.current_hp, 50.0 - 20.0);
    }

    #[test]
    fn test_kill_during_tick() {
        let mut f = Fixture::new();
        f.state.player_lv = 10;
        let result = f.tick(3000);
        let kills: Vec<_> = result.kills().collect();
        assert_eq!(kills.len(), 1);
        assert_eq!(kills[0].stage, 1);
        assert_eq!(f.state.stage, 2);
        assert_eq!(f.monster.max_hp, f.data.monster_hp(2));
    }
}
