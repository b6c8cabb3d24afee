//! Grand Slam: every terminal job across both series held by some helper.

use crate::character::helper::Helper;
use crate::core::constants::GRAND_SLAM_MULTIPLIER;
use crate::data::ReferenceData;
use std::collections::BTreeSet;

/// Distinct tier-4 jobs currently held by the roster.
pub fn held_terminal_jobs(helpers: &[Helper]) -> BTreeSet<&str> {
    helpers.iter().filter_map(|h| h.job(4)).collect()
}

/// True once the roster holds as many distinct tier-4 jobs as the job
/// trees define. An empty roster never qualifies.
pub fn check_grand_slam(helpers: &[Helper], data: &dyn ReferenceData) -> bool {
    let held = held_terminal_jobs(helpers);
    !held.is_empty() && held.len() == data.terminal_jobs().len()
}

/// Multiplier applied to the aggregate helper damage.
pub fn helper_multiplier(helpers: &[Helper], data: &dyn ReferenceData) -> f64 {
    if check_grand_slam(helpers, data) {
        GRAND_SLAM_MULTIPLIER
    } else {
        1.0
    }
}
