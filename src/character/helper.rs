//! Helper allies: the automated roster that attacks every tick.

use crate::core::constants::{MAX_HELPER_LEVEL, TIER_MULTIPLIERS};
use crate::data::Series;
use serde::{Deserialize, Serialize};

/// One automated ally.
///
/// Promotion progress lives only in the job slots: a slot is attained once
/// it is non-empty and is never cleared afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Helper {
    /// Creation-time identifier; lookups use roster position instead.
    pub id: String,
    pub level: u32,
    pub series: Series,
    #[serde(default)]
    pub camp: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub job1: String,
    #[serde(default)]
    pub job2: String,
    #[serde(default)]
    pub job3: String,
    #[serde(default)]
    pub job4: String,
}

impl Helper {
    /// A fresh level-1 helper with nothing chosen yet.
    pub fn new(series: Series) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            level: 1,
            series,
            camp: String::new(),
            group: String::new(),
            job1: String::new(),
            job2: String::new(),
            job3: String::new(),
            job4: String::new(),
        }
    }

    /// Highest attained promotion tier, 0-4.
    pub fn tier(&self) -> u8 {
        if !self.job4.is_empty() {
            4
        } else if !self.job3.is_empty() {
            3
        } else if !self.job2.is_empty() {
            2
        } else if !self.job1.is_empty() {
            1
        } else {
            0
        }
    }

    /// Job held at `tier` (1-4), if attained.
    pub fn job(&self, tier: u8) -> Option<&str> {
        let slot = match tier {
            1 => &self.job1,
            2 => &self.job2,
            3 => &self.job3,
            4 => &self.job4,
            _ => return None,
        };
        (!slot.is_empty()).then_some(slot.as_str())
    }

    pub(crate) fn set_job(&mut self, tier: u8, job: &str) {
        let slot = match tier {
            1 => &mut self.job1,
            2 => &mut self.job2,
            3 => &mut self.job3,
            4 => &mut self.job4,
            _ => return,
        };
        *slot = job.to_string();
    }

    /// Damage and cost multiplier for the current tier.
    pub fn tier_multiplier(&self) -> f64 {
        TIER_MULTIPLIERS[usize::from(self.tier())]
    }

    /// True while a promotion gate blocks ordinary level-ups.
    pub fn needs_promotion(&self) -> bool {
        super::promotion::needs_promotion(self)
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= MAX_HELPER_LEVEL
    }

    pub fn display_name(&self) -> String {
        if let Some(job) = (1..=4).rev().find_map(|t| self.job(t)) {
            return job.to_string();
        }
        if self.series == Series::Maple && !self.camp.is_empty() {
            format!("[{}] Beginner", self.camp)
        } else {
            "Beginner".to_string()
        }
    }
}

/// Starting roster: one beginner per series.
pub fn starting_roster() -> Vec<Helper> {
    Series::ALL.iter().map(|s| Helper::new(*s)).collect()
}
