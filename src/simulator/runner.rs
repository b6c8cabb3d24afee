//! Main simulation runner using the real engine and scheduler.
//!
//! Statistics are tracked externally from [`TickResult`] events and the
//! policy's actions, so the simulator never duplicates game logic.

use super::config::SimConfig;
use super::policy::{greedy_step, PolicyAction};
use super::report::{RunStats, SimReport};
use crate::combat::skills::SkillEffect;
use crate::core::config::EngineConfig;
use crate::core::engine::Engine;
use crate::core::game_loop::{Clock, Scheduler};
use crate::core::grand_slam::held_terminal_jobs;
use crate::core::monster::{BossDrop, KillReport};
use crate::core::tick::TickResult;
use crate::data::StandardData;
use crate::utils::persistence::new_game;
use crate::utils::store::MemoryStore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let base_seed = config.seed.unwrap_or_else(rand::random);
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let stats = simulate_single_run(config, base_seed.wrapping_add(u64::from(run_idx)));
        if config.verbosity >= 2 {
            println!("Run {}/{}: {stats}", run_idx + 1, config.num_runs);
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(all_runs)
}

/// Plays one seeded run from a new game.
pub fn simulate_single_run(config: &SimConfig, seed: u64) -> RunStats {
    let data = StandardData::new();
    let state = new_game(&data);
    let mut engine = Engine::new(
        state,
        Box::new(data),
        Box::new(MemoryStore::new()),
        EngineConfig::without_autosave(),
        ChaCha8Rng::seed_from_u64(seed),
    );
    let mut scheduler = Scheduler::new(engine.config().tick_interval_ms, Clock::Simulated);
    let mut stats = RunStats {
        seed,
        ..Default::default()
    };

    for tick in 0..config.ticks_per_run {
        let summary = scheduler.run(&mut engine, 1, |_, _, result| {
            record_tick(&mut stats, result);
            if config.verbosity >= 3 {
                for event in &result.events {
                    println!("[{tick}] {event:?}");
                }
            }
        });
        stats.total_ticks += summary.ticks;
        stats.failed_ticks += summary.failed_ticks;

        if config.autoplay {
            for action in greedy_step(&mut engine) {
                record_action(&mut stats, &action);
                if config.verbosity >= 3 {
                    println!("[{tick}] {action:?}");
                }
            }
        }
    }

    let state = engine.state();
    stats.final_stage = state.stage;
    stats.final_player_lv = state.player_lv;
    stats.final_coins = state.coins;
    stats.roster_size = state.helpers.len();
    stats.terminal_jobs_held = held_terminal_jobs(&state.helpers).len();
    stats.grand_slam = engine.grand_slam();
    stats
}

fn record_kill(stats: &mut RunStats, kill: &KillReport) {
    stats.total_kills += 1;
    if kill.was_boss {
        stats.total_boss_kills += 1;
    }
    match kill.drop {
        Some(BossDrop::Relic(_)) => stats.relics_found += 1,
        Some(BossDrop::CollectionBonus { diamonds } | BossDrop::Diamonds { diamonds }) => {
            stats.diamonds_earned += diamonds;
        }
        None => {}
    }
}

fn record_tick(stats: &mut RunStats, result: &TickResult) {
    for kill in result.kills() {
        record_kill(stats, kill);
    }
}

fn record_action(stats: &mut RunStats, action: &PolicyAction) {
    match action {
        PolicyAction::Promoted { .. } => stats.promotions += 1,
        PolicyAction::Cast(cast) => {
            if let SkillEffect::Strike {
                kill: Some(kill), ..
            } = &cast.effect
            {
                record_kill(stats, kill);
            }
        }
        _ => {}
    }
}
