//! Core game state, the tick loop and the engine that owns them.

pub mod config;
pub mod constants;
pub mod damage;
pub mod engine;
pub mod error;
pub mod game_loop;
pub mod game_state;
pub mod grand_slam;
pub mod monster;
pub mod tick;

pub use config::EngineConfig;
pub use engine::{ClickOutcome, Engine, Presenter};
pub use error::{ActionError, EngineError, ImportError, PersistenceError, PromotionError};
pub use game_loop::{Clock, GameLoop, RunSummary, Scheduler};
pub use game_state::GameState;
pub use monster::{BossDrop, KillReport, Monster};
pub use tick::{DpsBreakdown, TickEvent, TickResult};
