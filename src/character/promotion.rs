//! Job promotion state machine.
//!
//! Each helper passes through ordered gates. A gate is pending once its
//! level requirement is met while its job slot is still empty, and a
//! pending gate blocks ordinary level-ups until it is resolved.
//!
//! | Series | Gate      | Level | Resolves                        |
//! |--------|-----------|-------|---------------------------------|
//! | MAPLE  | Camp      | 1     | `camp`                          |
//! | MAPLE  | FirstJob  | 10    | `group`, `job1`                 |
//! | RO     | FirstJob  | 10    | `camp`, `group`, `job1`         |
//! | both   | SecondJob | 30    | `job2` (branch-locked choice)   |
//! | both   | ThirdJob  | 70    | `job3` (follows `job2`'s index) |
//! | both   | FourthJob | 120   | `job4` (follows `job3`'s index) |
//!
//! The first three gates are free choices. Third and fourth job are
//! auto-advances: the target is fixed by the tree and the helper pays what
//! an ordinary level-up would cost at its current level and tier.

use super::helper::Helper;
use crate::core::constants::{
    CAMP_GATE_LEVEL, FIRST_JOB_LEVEL, FOURTH_JOB_LEVEL, SECOND_JOB_LEVEL, THIRD_JOB_LEVEL,
};
use crate::core::error::{finite, PromotionError};
use crate::core::game_state::GameState;
use crate::data::{JobTierEntry, JobTree, ReferenceData, Series};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    Camp,
    FirstJob,
    SecondJob,
    ThirdJob,
    FourthJob,
}

impl Gate {
    pub fn level_requirement(&self) -> u32 {
        match self {
            Gate::Camp => CAMP_GATE_LEVEL,
            Gate::FirstJob => FIRST_JOB_LEVEL,
            Gate::SecondJob => SECOND_JOB_LEVEL,
            Gate::ThirdJob => THIRD_JOB_LEVEL,
            Gate::FourthJob => FOURTH_JOB_LEVEL,
        }
    }

    /// Job tier this gate fills, if any.
    pub fn tier(&self) -> Option<u8> {
        match self {
            Gate::Camp => None,
            Gate::FirstJob => Some(1),
            Gate::SecondJob => Some(2),
            Gate::ThirdJob => Some(3),
            Gate::FourthJob => Some(4),
        }
    }

    pub fn is_auto_advance(&self) -> bool {
        matches!(self, Gate::ThirdJob | Gate::FourthJob)
    }
}

/// The lowest unresolved gate whose level requirement is met.
pub fn pending_gate(helper: &Helper) -> Option<Gate> {
    let first_job_missing = helper.group.is_empty() || helper.job1.is_empty();
    match helper.series {
        Series::Maple => {
            if helper.camp.is_empty() {
                return Some(Gate::Camp);
            }
            if helper.level >= FIRST_JOB_LEVEL && first_job_missing {
                return Some(Gate::FirstJob);
            }
        }
        Series::Ro => {
            if helper.level >= FIRST_JOB_LEVEL && (helper.camp.is_empty() || first_job_missing) {
                return Some(Gate::FirstJob);
            }
        }
    }

    [Gate::SecondJob, Gate::ThirdJob, Gate::FourthJob]
        .into_iter()
        .find(|gate| {
            let tier = gate.tier().unwrap_or(0);
            helper.level >= gate.level_requirement() && helper.job(tier).is_none()
        })
}

pub fn needs_promotion(helper: &Helper) -> bool {
    pending_gate(helper).is_some()
}

/// A first-job option: picking it fixes camp, group and job together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstJobOption {
    pub camp: String,
    pub group: String,
    pub job: String,
}

/// A tier-2 branch still free for this helper, with its position in the
/// job tree's tier-2 list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchOption {
    pub index: usize,
    pub job: String,
}

/// What the player is offered for the pending gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionMenu {
    Camp(Vec<String>),
    FirstJob(Vec<FirstJobOption>),
    SecondJob(Vec<BranchOption>),
    Advance { tier: u8, job: String, cost: u64 },
}

/// A selection from a [`PromotionMenu`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionChoice {
    Camp(String),
    FirstJob { camp: String, group: String },
    /// Position in the tier-2 list of the helper's group.
    Branch(usize),
    Advance,
}

impl PromotionMenu {
    /// Every selectable choice, in menu order.
    pub fn choices(&self) -> Vec<PromotionChoice> {
        match self {
            PromotionMenu::Camp(camps) => camps
                .iter()
                .map(|c| PromotionChoice::Camp(c.clone()))
                .collect(),
            PromotionMenu::FirstJob(options) => options
                .iter()
                .map(|o| PromotionChoice::FirstJob {
                    camp: o.camp.clone(),
                    group: o.group.clone(),
                })
                .collect(),
            PromotionMenu::SecondJob(options) => options
                .iter()
                .map(|o| PromotionChoice::Branch(o.index))
                .collect(),
            PromotionMenu::Advance { .. } => vec![PromotionChoice::Advance],
        }
    }

    /// Human-readable labels, aligned with [`PromotionMenu::choices`].
    pub fn labels(&self) -> Vec<String> {
        match self {
            PromotionMenu::Camp(camps) => camps.clone(),
            PromotionMenu::FirstJob(options) => options
                .iter()
                .map(|o| format!("{} - {} ({})", o.camp, o.group, o.job))
                .collect(),
            PromotionMenu::SecondJob(options) => options.iter().map(|o| o.job.clone()).collect(),
            PromotionMenu::Advance { job, cost, .. } => {
                vec![format!("Advance to {job} ({cost} coins)")]
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.choices().is_empty()
    }
}

/// What a successful promotion changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionOutcome {
    pub gate: Gate,
    /// Job attained, `None` for a camp selection.
    pub job: Option<String>,
    pub cost: u64,
    /// Roster index of a newly recruited helper.
    pub recruited: Option<usize>,
}

/// Tier-2 branch indices already held by helpers in the same
/// series, camp and group.
pub fn taken_branches(
    helpers: &[Helper],
    series: Series,
    camp: &str,
    group: &str,
    tree: &JobTree,
) -> BTreeSet<usize> {
    let Some(JobTierEntry::Branching(names)) = tree.tier(camp, group, 2) else {
        return BTreeSet::new();
    };
    helpers
        .iter()
        .filter(|h| h.series == series && h.camp == camp && h.group == group)
        .filter_map(|h| h.job(2))
        .filter_map(|job| names.iter().position(|n| n == job))
        .collect()
}

/// The only job an auto-advance into `tier` can reach: the entry at the
/// same position the helper's previous job holds one tier down.
pub fn advance_target(helper: &Helper, tree: &JobTree, tier: u8) -> Option<String> {
    if !(2..=4).contains(&tier) {
        return None;
    }
    let previous_entry = tree.tier(&helper.camp, &helper.group, tier - 1)?;
    let previous_job = helper.job(tier - 1)?;
    let index = previous_entry.position_of(previous_job)?;
    tree.tier(&helper.camp, &helper.group, tier)?
        .at(index)
        .map(str::to_string)
}

fn path_not_found(helper: &Helper, tier: u8) -> PromotionError {
    PromotionError::PathNotFound {
        tier,
        camp: helper.camp.clone(),
        group: helper.group.clone(),
    }
}

/// Cost of an auto-advance: an ordinary level-up at the current tier.
pub fn advance_cost(helper: &Helper, data: &dyn ReferenceData) -> Result<u64, PromotionError> {
    let cost = finite(
        "helper_upgrade_cost",
        data.helper_upgrade_cost(helper.level, helper.tier_multiplier()),
    )?;
    Ok(cost.floor().max(0.0) as u64)
}

/// Builds the menu for the helper's pending gate.
pub fn promotion_menu(
    helpers: &[Helper],
    index: usize,
    data: &dyn ReferenceData,
) -> Result<(Gate, PromotionMenu), PromotionError> {
    let helper = helpers
        .get(index)
        .ok_or(PromotionError::HelperNotFound(index))?;
    let gate = pending_gate(helper).ok_or(PromotionError::NoPendingGate)?;
    let tree = data.job_tree(helper.series);

    let menu = match gate {
        Gate::Camp => PromotionMenu::Camp(tree.camps.iter().map(|c| c.name.clone()).collect()),
        Gate::FirstJob => {
            let camps: Vec<_> = match helper.series {
                Series::Maple => {
                    vec![tree.camp(&helper.camp).ok_or_else(|| path_not_found(helper, 1))?]
                }
                Series::Ro => tree.camps.iter().collect(),
            };
            let options = camps
                .into_iter()
                .flat_map(|camp| {
                    camp.groups.iter().filter_map(|group| {
                        group.first_job().map(|job| FirstJobOption {
                            camp: camp.name.clone(),
                            group: group.name.clone(),
                            job: job.to_string(),
                        })
                    })
                })
                .collect();
            PromotionMenu::FirstJob(options)
        }
        Gate::SecondJob => {
            let entry = tree
                .tier(&helper.camp, &helper.group, 2)
                .ok_or_else(|| path_not_found(helper, 2))?;
            let taken = taken_branches(helpers, helper.series, &helper.camp, &helper.group, tree);
            let options = entry
                .names()
                .into_iter()
                .enumerate()
                .filter(|(i, _)| !entry.is_branching() || !taken.contains(i))
                .map(|(index, job)| BranchOption {
                    index,
                    job: job.to_string(),
                })
                .collect();
            PromotionMenu::SecondJob(options)
        }
        Gate::ThirdJob | Gate::FourthJob => {
            let tier = gate.tier().unwrap_or(4);
            let job = advance_target(helper, tree, tier)
                .ok_or_else(|| path_not_found(helper, tier))?;
            PromotionMenu::Advance {
                tier,
                job,
                cost: advance_cost(helper, data)?,
            }
        }
    };
    Ok((gate, menu))
}

/// Resolves the helper's pending gate with `choice`.
///
/// Validation happens before any mutation: on error no job slot is set and
/// no coins are spent. Reaching fourth job may recruit a new beginner of
/// the same series while the series still has unfilled terminal branches.
pub fn promote(
    state: &mut GameState,
    index: usize,
    choice: PromotionChoice,
    data: &dyn ReferenceData,
) -> Result<PromotionOutcome, PromotionError> {
    let helper = state
        .helpers
        .get(index)
        .ok_or(PromotionError::HelperNotFound(index))?;
    let gate = pending_gate(helper).ok_or(PromotionError::NoPendingGate)?;
    let series = helper.series;
    let tree = data.job_tree(series);
    let wrong_choice = || PromotionError::InvalidChoice(format!("{choice:?} for {gate:?}"));

    let mut cost = 0;
    let mut camp = helper.camp.clone();
    let mut group = helper.group.clone();
    let job = match (&gate, &choice) {
        (Gate::Camp, PromotionChoice::Camp(name)) => {
            tree.camp(name).ok_or_else(wrong_choice)?;
            camp = name.clone();
            None
        }
        (Gate::FirstJob, PromotionChoice::FirstJob { camp: c, group: g }) => {
            if series == Series::Maple && *c != helper.camp {
                return Err(wrong_choice());
            }
            let job = tree
                .group(c, g)
                .and_then(|grp| grp.first_job())
                .ok_or_else(wrong_choice)?;
            camp = c.clone();
            group = g.clone();
            Some(job.to_string())
        }
        (Gate::SecondJob, PromotionChoice::Branch(branch)) => {
            let entry = tree
                .tier(&helper.camp, &helper.group, 2)
                .ok_or_else(|| path_not_found(helper, 2))?;
            if entry.is_branching()
                && taken_branches(&state.helpers, series, &helper.camp, &helper.group, tree)
                    .contains(branch)
            {
                return Err(PromotionError::BranchTaken(*branch));
            }
            if !entry.is_branching() && *branch != 0 {
                return Err(wrong_choice());
            }
            Some(entry.at(*branch).ok_or_else(wrong_choice)?.to_string())
        }
        (Gate::ThirdJob | Gate::FourthJob, PromotionChoice::Advance) => {
            let tier = gate.tier().unwrap_or(4);
            let job = advance_target(helper, tree, tier)
                .ok_or_else(|| path_not_found(helper, tier))?;
            cost = advance_cost(helper, data)?;
            if state.coins < cost {
                return Err(PromotionError::InsufficientCoins {
                    needed: cost,
                    have: state.coins,
                });
            }
            Some(job)
        }
        _ => return Err(wrong_choice()),
    };

    state.coins -= cost;
    let helper = &mut state.helpers[index];
    helper.camp = camp;
    helper.group = group;
    if let (Some(tier), Some(job)) = (gate.tier(), job.as_deref()) {
        helper.set_job(tier, job);
    }
    log::debug!("helper {index} resolved {gate:?} -> {}", helper.display_name());

    let recruited = if gate == Gate::FourthJob {
        recruit_if_room(state, series, data)
    } else {
        None
    };

    Ok(PromotionOutcome {
        gate,
        job,
        cost,
        recruited,
    })
}

/// Appends a beginner of `series` while the roster still has fewer
/// helpers of that series than the series has terminal branches.
fn recruit_if_room(
    state: &mut GameState,
    series: Series,
    data: &dyn ReferenceData,
) -> Option<usize> {
    let in_series = state.helpers.iter().filter(|h| h.series == series).count();
    if in_series >= data.series_branch_count(series) {
        return None;
    }
    state.helpers.push(Helper::new(series));
    log::info!("a new {} beginner joined the roster", series.name());
    Some(state.helpers.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StandardData;

    fn maple_at(level: u32) -> Helper {
        let mut helper = Helper::new(Series::Maple);
        helper.level = level;
        helper
    }

    fn warrior(level: u32) -> Helper {
        let mut helper = maple_at(level);
        helper.camp = "Explorers".to_string();
        helper.group = "Warrior".to_string();
        helper.job1 = "Swordman".to_string();
        helper
    }

    fn state_with(helpers: Vec<Helper>) -> GameState {
        let mut state = GameState::new(10);
        state.helpers = helpers;
        state
    }

    #[test]
    fn test_maple_gates() {
        assert_eq!(pending_gate(&maple_at(1)), Some(Gate::Camp));

        let mut helper = maple_at(9);
        helper.camp = "Explorers".to_string();
        assert_eq!(pending_gate(&helper), None);
        helper.level = 10;
        assert_eq!(pending_gate(&helper), Some(Gate::FirstJob));

        assert_eq!(pending_gate(&warrior(29)), None);
        assert_eq!(pending_gate(&warrior(30)), Some(Gate::SecondJob));
    }

    #[test]
    fn test_ro_has_no_camp_gate() {
        let mut helper = Helper::new(Series::Ro);
        assert_eq!(pending_gate(&helper), None);
        helper.level = 9;
        assert_eq!(pending_gate(&helper), None);
        helper.level = 10;
        assert_eq!(pending_gate(&helper), Some(Gate::FirstJob));
    }

    #[test]
    fn test_lowest_gate_wins() {
        // A legacy helper far past every threshold with only job1.
        let helper = warrior(150);
        assert_eq!(pending_gate(&helper), Some(Gate::SecondJob));
        assert!(needs_promotion(&helper));

        let mut done = warrior(150);
        done.job2 = "Fighter".to_string();
        done.job3 = "Crusader".to_string();
        done.job4 = "Hero".to_string();
        assert!(!needs_promotion(&done));
    }

    #[test]
    fn test_camp_menu_and_selection() {
        let data = StandardData::new();
        let mut state = state_with(vec![maple_at(1)]);
        let (gate, menu) = promotion_menu(&state.helpers, 0, &data).unwrap();
        assert_eq!(gate, Gate::Camp);
        assert_eq!(
            menu,
            PromotionMenu::Camp(vec!["Explorers".to_string(), "Cygnus Knights".to_string()])
        );

        let choice = PromotionChoice::Camp("Explorers".into());
        let outcome = promote(&mut state, 0, choice, &data).unwrap();
        assert_eq!(outcome.job, None);
        assert_eq!(state.helpers[0].camp, "Explorers");
        assert_eq!(pending_gate(&state.helpers[0]), None);
    }

    #[test]
    fn test_unknown_camp_rejected() {
        let data = StandardData::new();
        let mut state = state_with(vec![maple_at(1)]);
        let choice = PromotionChoice::Camp("Atlantis".into());
        let err = promote(&mut state, 0, choice, &data).unwrap_err();
        assert!(matches!(err, PromotionError::InvalidChoice(_)));
        assert!(state.helpers[0].camp.is_empty());
    }

    #[test]
    fn test_maple_first_job_limited_to_own_camp() {
        let data = StandardData::new();
        let mut helper = maple_at(10);
        helper.camp = "Cygnus Knights".to_string();
        let mut state = state_with(vec![helper]);

        let (_, menu) = promotion_menu(&state.helpers, 0, &data).unwrap();
        let PromotionMenu::FirstJob(options) = &menu else {
            panic!("expected first job menu");
        };
        assert_eq!(options.len(), 5);
        assert!(options.iter().all(|o| o.camp == "Cygnus Knights"));

        let foreign = PromotionChoice::FirstJob {
            camp: "Explorers".into(),
            group: "Warrior".into(),
        };
        assert!(promote(&mut state, 0, foreign, &data).is_err());

        let own = menu.choices()[1].clone();
        let outcome = promote(&mut state, 0, own, &data).unwrap();
        assert_eq!(outcome.job.as_deref(), Some("Blaze Wizard"));
        assert_eq!(state.helpers[0].group, "Blaze Wizard");
        assert_eq!(state.helpers[0].job1, "Blaze Wizard");
    }

    #[test]
    fn test_ro_first_job_sets_everything() {
        let data = StandardData::new();
        let mut helper = Helper::new(Series::Ro);
        helper.level = 12;
        let mut state = state_with(vec![helper]);

        let (_, menu) = promotion_menu(&state.helpers, 0, &data).unwrap();
        assert_eq!(menu.choices().len(), 8);
        assert!(menu.labels()[0].contains("Swordman"));

        let choice = PromotionChoice::FirstJob {
            camp: "Expanded".into(),
            group: "Taekwon".into(),
        };
        promote(&mut state, 0, choice, &data).unwrap();
        let h = &state.helpers[0];
        assert_eq!(h.camp, "Expanded");
        assert_eq!(h.group, "Taekwon");
        assert_eq!(h.job1, "Taekwon Kid");
    }

    #[test]
    fn test_second_job_branch_locking() {
        let data = StandardData::new();
        let mut state = state_with(vec![warrior(30), warrior(30)]);

        let (_, menu) = promotion_menu(&state.helpers, 0, &data).unwrap();
        assert_eq!(menu.choices().len(), 3);
        promote(&mut state, 0, PromotionChoice::Branch(0), &data).unwrap();
        assert_eq!(state.helpers[0].job2, "Fighter");

        let (_, menu) = promotion_menu(&state.helpers, 1, &data).unwrap();
        assert_eq!(
            menu.choices(),
            vec![PromotionChoice::Branch(1), PromotionChoice::Branch(2)]
        );
        let err = promote(&mut state, 1, PromotionChoice::Branch(0), &data).unwrap_err();
        assert_eq!(err, PromotionError::BranchTaken(0));
        assert!(state.helpers[1].job2.is_empty());

        promote(&mut state, 1, PromotionChoice::Branch(2), &data).unwrap();
        assert_eq!(state.helpers[1].job2, "Spearman");
    }

    #[test]
    fn test_branch_lock_is_per_series() {
        let data = StandardData::new();
        let mut ro = Helper::new(Series::Ro);
        ro.level = 30;
        ro.camp = "Rune-Midgarts".into();
        ro.group = "Thief".into();
        ro.job1 = "Thief".into();
        ro.job2 = "Assassin".into();
        let mut maple = warrior(30);
        maple.group = "Thief".into();
        maple.job1 = "Rogue".into();
        let state = state_with(vec![ro, maple]);
        let (_, menu) = promotion_menu(&state.helpers, 1, &data).unwrap();
        assert_eq!(menu.choices().len(), 2);
    }

    #[test]
    fn test_single_second_job_is_not_locked() {
        let data = StandardData::new();
        let mut a = maple_at(30);
        a.camp = "Cygnus Knights".into();
        a.group = "Night Walker".into();
        a.job1 = "Night Walker".into();
        a.job2 = "Night Walker II".into();
        let mut b = a.clone();
        b.job2.clear();
        let mut state = state_with(vec![a, b]);
        let (_, menu) = promotion_menu(&state.helpers, 1, &data).unwrap();
        assert_eq!(menu.choices(), vec![PromotionChoice::Branch(0)]);
        assert!(promote(&mut state, 1, PromotionChoice::Branch(1), &data).is_err());
        promote(&mut state, 1, PromotionChoice::Branch(0), &data).unwrap();
        assert_eq!(state.helpers[1].job2, "Night Walker II");
    }

    #[test]
    fn test_auto_advance_follows_index_and_charges() {
        let data = StandardData::new();
        let mut helper = warrior(70);
        helper.job2 = "Page".into();
        let cost = (data.helper_upgrade_cost(70, 10.0)).floor() as u64;
        let mut state = state_with(vec![helper]);

        let (gate, menu) = promotion_menu(&state.helpers, 0, &data).unwrap();
        assert_eq!(gate, Gate::ThirdJob);
        assert!(gate.is_auto_advance());
        assert_eq!(
            menu,
            PromotionMenu::Advance {
                tier: 3,
                job: "White Knight".into(),
                cost
            }
        );

        let err = promote(&mut state, 0, PromotionChoice::Advance, &data).unwrap_err();
        assert_eq!(
            err,
            PromotionError::InsufficientCoins {
                needed: cost,
                have: 0
            }
        );
        assert!(state.helpers[0].job3.is_empty());

        state.coins = cost + 7;
        let outcome = promote(&mut state, 0, PromotionChoice::Advance, &data).unwrap();
        assert_eq!(outcome.cost, cost);
        assert_eq!(state.coins, 7);
        assert_eq!(state.helpers[0].job3, "White Knight");
        assert_eq!(state.helpers[0].level, 70);
    }

    #[test]
    fn test_missing_path_fails_cleanly() {
        let data = StandardData::new();
        let mut helper = warrior(70);
        helper.group = "Ghost".into();
        helper.job2 = "Page".into();
        let mut state = state_with(vec![helper]);
        state.coins = 1_000_000_000;
        let before = state.clone();
        let err = promote(&mut state, 0, PromotionChoice::Advance, &data).unwrap_err();
        assert!(matches!(err, PromotionError::PathNotFound { tier: 3, .. }));
        assert_eq!(state, before);
        assert!(promotion_menu(&state.helpers, 0, &data).is_err());
    }

    #[test]
    fn test_job2_not_in_list_cannot_advance() {
        let data = StandardData::new();
        let mut helper = warrior(70);
        helper.job2 = "Renamed Job".into();
        assert_eq!(advance_target(&helper, data.job_tree(Series::Maple), 3), None);
    }

    #[test]
    fn test_wrong_choice_for_gate() {
        let data = StandardData::new();
        let mut state = state_with(vec![warrior(30)]);
        let err = promote(&mut state, 0, PromotionChoice::Advance, &data).unwrap_err();
        assert!(matches!(err, PromotionError::InvalidChoice(_)));
        assert_eq!(
            promote(&mut state, 5, PromotionChoice::Advance, &data).unwrap_err(),
            PromotionError::HelperNotFound(5)
        );
    }

    #[test]
    fn test_no_pending_gate() {
        let data = StandardData::new();
        let mut state = state_with(vec![warrior(20)]);
        assert_eq!(
            promote(&mut state, 0, PromotionChoice::Branch(0), &data).unwrap_err(),
            PromotionError::NoPendingGate
        );
    }

    #[test]
    fn test_fourth_job_recruits_until_series_full() {
        let data = StandardData::new();
        let mut helper = warrior(120);
        helper.job2 = "Fighter".into();
        helper.job3 = "Crusader".into();
        let mut state = state_with(vec![helper]);
        state.coins = u64::MAX / 2;

        let outcome = promote(&mut state, 0, PromotionChoice::Advance, &data).unwrap();
        assert_eq!(outcome.job.as_deref(), Some("Hero"));
        assert_eq!(outcome.recruited, Some(1));
        assert_eq!(state.helpers.len(), 2);
        assert_eq!(state.helpers[1].series, Series::Maple);
        assert_eq!(state.helpers[1].level, 1);
        assert_eq!(state.helpers[1].tier(), 0);

        // Fill the series to its branch count; the next fourth job recruits nobody.
        let mut full = state.helpers[0].clone();
        full.job4.clear();
        let mut state = state_with(vec![full; 17]);
        state.coins = u64::MAX / 2;
        let outcome = promote(&mut state, 0, PromotionChoice::Advance, &data).unwrap();
        assert_eq!(outcome.recruited, None);
        assert_eq!(state.helpers.len(), 17);
    }
}
