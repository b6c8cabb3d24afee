//! Shared game loop trait and the fixed-rate scheduler that drives it.
//!
//! The interactive runner and the simulator both go through [`Scheduler`],
//! so a failing tick is handled the same way everywhere: logged, counted,
//! and followed by the next tick.

use crate::core::error::EngineError;
use crate::core::game_state::GameState;
use crate::core::tick::TickResult;
use std::thread;
use std::time::Duration;

/// Anything that can be ticked on a timer.
pub trait GameLoop {
    /// Execute one tick at `now_ms`. Returns what happened.
    fn tick(&mut self, now_ms: i64) -> Result<TickResult, EngineError>;

    /// Get current game state (read-only).
    fn state(&self) -> &GameState;
}

/// How tick timestamps are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Sleep one interval between ticks and stamp with wall-clock time.
    RealTime,
    /// No sleeping; timestamps advance by exactly one interval per tick.
    Simulated,
}

/// Totals for a [`Scheduler::run`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub failed_ticks: u64,
    pub kills: u64,
}

/// Fixed-rate tick driver.
#[derive(Debug, Clone)]
pub struct Scheduler {
    interval_ms: u64,
    clock: Clock,
    simulated_now_ms: i64,
}

impl Scheduler {
    pub fn new(interval_ms: u64, clock: Clock) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            clock,
            simulated_now_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    fn next_now_ms(&mut self) -> i64 {
        match self.clock {
            Clock::RealTime => {
                thread::sleep(Duration::from_millis(self.interval_ms));
                chrono::Utc::now().timestamp_millis()
            }
            Clock::Simulated => {
                self.simulated_now_ms += self.interval_ms as i64;
                self.simulated_now_ms
            }
        }
    }

    /// Runs `ticks` ticks. `on_tick` sees every successful result.
    pub fn run<G: GameLoop>(
        &mut self,
        game: &mut G,
        ticks: u64,
        mut on_tick: impl FnMut(&G, u64, &TickResult),
    ) -> RunSummary {
        let mut summary = RunSummary::default();
        for n in 0..ticks {
            let now_ms = self.next_now_ms();
            summary.ticks += 1;
            match game.tick(now_ms) {
                Ok(result) => {
                    summary.kills += result.kills().count() as u64;
                    on_tick(game, n, &result);
                }
                Err(e) => {
                    summary.failed_ticks += 1;
                    log::error!("tick {n} skipped: {e}");
                }
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::NonFiniteValue;

    /// Fails on the ticks listed in `fail_on`.
    struct Flaky {
        state: GameState,
        seen: Vec<i64>,
        fail_on: Vec<i64>,
    }

    impl GameLoop for Flaky {
        fn tick(&mut self, now_ms: i64) -> Result<TickResult, EngineError> {
            self.seen.push(now_ms);
            if self.fail_on.contains(&now_ms) {
                return Err(NonFiniteValue {
                    curve: "monster_hp",
                    value: f64::NAN,
                }
                .into());
            }
            self.state.coins += 1;
            Ok(TickResult::default())
        }

        fn state(&self) -> &GameState {
            &self.state
        }
    }

    #[test]
    fn test_simulated_clock_advances_by_interval() {
        let mut game = Flaky {
            state: GameState::new(0),
            seen: Vec::new(),
            fail_on: Vec::new(),
        };
        let mut scheduler = Scheduler::new(1000, Clock::Simulated);
        let summary = scheduler.run(&mut game, 3, |_, _, _| {});
        assert_eq!(game.seen, vec![1000, 2000, 3000]);
        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.failed_ticks, 0);
    }

    #[test]
    fn test_failed_tick_does_not_stop_loop() {
        let mut game = Flaky {
            state: GameState::new(0),
            seen: Vec::new(),
            fail_on: vec![2000],
        };
        let mut scheduler = Scheduler::new(1000, Clock::Simulated);
        let mut callbacks = 0;
        let summary = scheduler.run(&mut game, 4, |_, _, _| callbacks += 1);
        assert_eq!(summary.failed_ticks, 1);
        assert_eq!(callbacks, 3);
        assert_eq!(game.state().coins, 3);
        assert_eq!(game.seen.len(), 4);
    }
}
