//! RPG Adventure - idle RPG simulation core.
//!
//! The engine computes damage, drives the per-second combat tick, tracks
//! the monster and stage, runs the helper promotion state machine, and
//! saves/loads state defensively. Rendering is left to whoever implements
//! [`core::Presenter`].

pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod data;
pub mod simulator;
pub mod utils;

pub use crate::core::{Engine, EngineConfig, GameState};
pub use data::{ReferenceData, StandardData};
