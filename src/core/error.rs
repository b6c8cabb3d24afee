//! Error types for the engine, player actions and persistence.

use crate::character::promotion::Gate;
use thiserror::Error;

/// A reference curve produced a value the engine cannot use.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("reference curve `{curve}` returned a non-finite value ({value})")]
pub struct NonFiniteValue {
    pub curve: &'static str,
    pub value: f64,
}

/// Checks a reference value before it touches game state.
pub fn finite(curve: &'static str, value: f64) -> Result<f64, NonFiniteValue> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NonFiniteValue { curve, value })
    }
}

/// A tick could not be completed. The engine rolls the tick back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Reference(#[from] NonFiniteValue),
}

/// A player-initiated action was refused. State is unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("not enough coins: need {needed}, have {have}")]
    InsufficientCoins { needed: u64, have: u64 },
    #[error("not enough diamonds: need {needed}, have {have}")]
    InsufficientDiamonds { needed: u64, have: u64 },
    #[error("not enough SP: need {needed}, have {have}")]
    InsufficientSp { needed: u32, have: u32 },
    #[error("skill {skill} is cooling down ({remaining}s left)")]
    OnCooldown { skill: usize, remaining: u32 },
    #[error("skill {0} has not been learned")]
    SkillNotLearned(usize),
    #[error("already at max level")]
    MaxLevel,
    #[error("helper {index} must resolve the {gate:?} promotion first")]
    PromotionPending { index: usize, gate: Gate },
    #[error("no {kind} at index {index}")]
    InvalidIndex { kind: &'static str, index: usize },
    #[error(transparent)]
    Reference(#[from] NonFiniteValue),
}

/// A promotion could not be applied. No job slot was set and nothing was paid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PromotionError {
    #[error("no helper at index {0}")]
    HelperNotFound(usize),
    #[error("helper has no pending promotion")]
    NoPendingGate,
    #[error("job tree has no path for tier {tier} of {camp}/{group}")]
    PathNotFound {
        tier: u8,
        camp: String,
        group: String,
    },
    #[error("branch {0} is already held by another helper")]
    BranchTaken(usize),
    #[error("{0} is not on the promotion menu")]
    InvalidChoice(String),
    #[error("not enough coins: need {needed}, have {have}")]
    InsufficientCoins { needed: u64, have: u64 },
    #[error(transparent)]
    Reference(#[from] NonFiniteValue),
}

/// Durable store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Saving the game state failed. The in-memory state is unaffected.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("could not serialize game state: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Why a stored save could not be used. Loading falls back to a new game.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("save is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save root is not a JSON object")]
    NotAnObject,
}

/// An export code was rejected. The current state is untouched.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("export code is empty")]
    Empty,
    #[error("export code is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("export code does not contain UTF-8 text")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("export code does not contain valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("export code checksum mismatch")]
    Checksum,
    #[error("export code is missing a valid `{0}` field")]
    MissingField(&'static str),
    #[error("export code does not describe a game state")]
    NotAnObject,
}
