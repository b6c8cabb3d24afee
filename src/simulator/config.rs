//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Seed of the first run; later runs use consecutive seeds
    /// (None = random)
    pub seed: Option<u64>,

    /// Ticks (simulated seconds) per run
    pub ticks_per_run: u64,

    /// Let the greedy policy spend currency and resolve promotions
    pub autoplay: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run, 3 = per event)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1,
            seed: Some(42),
            ticks_per_run: 3_600,
            autoplay: true,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Short deterministic config for tests.
    pub fn quick(seed: u64, ticks_per_run: u64) -> Self {
        Self {
            seed: Some(seed),
            ticks_per_run,
            verbosity: 0,
            ..Default::default()
        }
    }
}
