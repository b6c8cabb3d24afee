//! Simulation report generation.

use std::fmt;

/// What one run reached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub seed: u64,
    pub total_ticks: u64,
    pub failed_ticks: u64,
    pub total_kills: u64,
    pub total_boss_kills: u64,
    pub relics_found: u64,
    pub diamonds_earned: u64,
    pub promotions: u64,
    pub final_stage: u32,
    pub final_player_lv: u32,
    pub final_coins: u64,
    pub roster_size: usize,
    pub terminal_jobs_held: usize,
    pub grand_slam: bool,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub num_runs: u32,
    pub avg_final_stage: f64,
    pub max_final_stage: u32,
    pub avg_total_kills: f64,
    pub avg_boss_kills: f64,
    pub avg_roster_size: f64,
    pub grand_slam_runs: u32,
    pub failed_ticks: u64,

    // Individual run stats for detailed analysis
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let avg = |f: fn(&RunStats) -> f64| {
            runs.iter().map(f).sum::<f64>() / f64::from(num_runs.max(1))
        };

        Self {
            num_runs,
            avg_final_stage: avg(|r| f64::from(r.final_stage)),
            max_final_stage: runs.iter().map(|r| r.final_stage).max().unwrap_or(0),
            avg_total_kills: avg(|r| r.total_kills as f64),
            avg_boss_kills: avg(|r| r.total_boss_kills as f64),
            avg_roster_size: avg(|r| r.roster_size as f64),
            grand_slam_runs: runs.iter().filter(|r| r.grand_slam).count() as u32,
            failed_ticks: runs.iter().map(|r| r.failed_ticks).sum(),
            run_stats: runs,
        }
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seed={} stage={} lv={} kills={} bosses={} relics={} diamonds={} helpers={} terminal={} grand_slam={}",
            self.seed,
            self.final_stage,
            self.final_player_lv,
            self.total_kills,
            self.total_boss_kills,
            self.relics_found,
            self.diamonds_earned,
            self.roster_size,
            self.terminal_jobs_held,
            self.grand_slam,
        )
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Simulation Summary ({} runs) ===", self.num_runs)?;
        writeln!(
            f,
            "Stage: avg {:.1}, max {}",
            self.avg_final_stage, self.max_final_stage
        )?;
        writeln!(
            f,
            "Kills: avg {:.1} ({:.1} bosses)",
            self.avg_total_kills, self.avg_boss_kills
        )?;
        writeln!(f, "Roster: avg {:.1} helpers", self.avg_roster_size)?;
        writeln!(f, "Grand Slam: {}/{} runs", self.grand_slam_runs, self.num_runs)?;
        write!(f, "Failed ticks: {}", self.failed_ticks)
    }
}
