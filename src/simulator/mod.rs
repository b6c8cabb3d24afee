//! Headless balance simulator.
//!
//! Runs seeded playthroughs through the real [`Engine`](crate::core::Engine)
//! and scheduler, optionally driven by a greedy autoplay policy, and
//! summarizes how far each run got.

mod config;
mod policy;
mod report;
mod runner;

pub use config::SimConfig;
pub use policy::{greedy_step, PolicyAction};
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
