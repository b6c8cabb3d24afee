//! Greedy autoplay: what a patient player would click between ticks.

use crate::character::promotion::{pending_gate, PromotionOutcome};
use crate::character::upgrades;
use crate::combat::skills::{can_cast, SkillCast};
use crate::core::constants::{MAX_SKILL_LEVEL, SKILL_COUNT};
use crate::core::engine::Engine;
use rand::Rng;

/// Upper bound on coin purchases per step.
const MAX_PURCHASES_PER_STEP: usize = 64;

/// One thing the policy did.
#[derive(Debug, Clone, PartialEq)]
pub enum PolicyAction {
    Promoted {
        helper: usize,
        outcome: PromotionOutcome,
    },
    Cast(SkillCast),
    UpgradedPlayer { cost: u64 },
    UpgradedHelper { helper: usize, cost: u64 },
    UpgradedSkill { skill: usize, cost: u64 },
    UpgradedRelic { relic: usize, cost: u64 },
}

#[derive(Debug, Clone, Copy)]
enum Purchase {
    Player,
    Helper(usize),
    Skill(usize),
}

/// Resolves promotions with the first offered option, casts every ready
/// skill, buys or raises relics, then buys the cheapest affordable upgrade
/// until nothing is affordable.
pub fn greedy_step<R: Rng>(engine: &mut Engine<R>) -> Vec<PolicyAction> {
    let mut actions = Vec::new();

    // The roster can grow while promoting, so re-check the length each time.
    let mut helper = 0;
    while helper < engine.state().helpers.len() {
        if let Ok((_, menu)) = engine.promotion_menu(helper) {
            if let Some(choice) = menu.choices().into_iter().next() {
                if let Ok(outcome) = engine.promote(helper, choice) {
                    actions.push(PolicyAction::Promoted { helper, outcome });
                }
            }
        }
        helper += 1;
    }

    for skill in 0..SKILL_COUNT {
        if can_cast(engine.state(), skill, engine.data()).is_ok() {
            if let Ok(cast) = engine.cast_skill(skill) {
                actions.push(PolicyAction::Cast(cast));
            }
        }
    }

    for relic in 0..engine.state().relic_levels.len() {
        while let Ok(cost) = engine.upgrade_relic(relic) {
            actions.push(PolicyAction::UpgradedRelic { relic, cost });
        }
    }

    for _ in 0..MAX_PURCHASES_PER_STEP {
        let Some((cost, purchase)) = cheapest_purchase(engine) else {
            break;
        };
        if cost > engine.state().coins {
            break;
        }
        let action = match purchase {
            Purchase::Player => engine
                .upgrade_player()
                .map(|cost| PolicyAction::UpgradedPlayer { cost }),
            Purchase::Helper(helper) => engine
                .upgrade_helper(helper)
                .map(|cost| PolicyAction::UpgradedHelper { helper, cost }),
            Purchase::Skill(skill) => engine
                .upgrade_skill(skill)
                .map(|cost| PolicyAction::UpgradedSkill { skill, cost }),
        };
        match action {
            Ok(action) => actions.push(action),
            Err(e) => {
                log::debug!("policy purchase {purchase:?} refused: {e}");
                break;
            }
        }
    }

    actions
}

fn cheapest_purchase<R: Rng>(engine: &Engine<R>) -> Option<(u64, Purchase)> {
    let state = engine.state();
    let data = engine.data();
    let mut options = Vec::new();

    if let Ok(cost) = upgrades::player_upgrade_cost(state, data) {
        options.push((cost, Purchase::Player));
    }
    for (index, helper) in state.helpers.iter().enumerate() {
        if pending_gate(helper).is_some() || helper.is_max_level() {
            continue;
        }
        if let Ok(cost) = upgrades::helper_upgrade_cost(state, index, data) {
            options.push((cost, Purchase::Helper(index)));
        }
    }
    for (skill, level) in state.skill_levels.iter().enumerate() {
        if *level < MAX_SKILL_LEVEL {
            options.push((upgrades::skill_upgrade_cost(*level), Purchase::Skill(skill)));
        }
    }

    options.into_iter().min_by_key(|(cost, _)| *cost)
}
