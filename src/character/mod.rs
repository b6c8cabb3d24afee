//! Helper allies, their promotion paths and the upgrade actions.

pub mod helper;
pub mod promotion;
pub mod upgrades;

pub use helper::{starting_roster, Helper};
pub use promotion::{
    needs_promotion, pending_gate, Gate, PromotionChoice, PromotionMenu, PromotionOutcome,
};
