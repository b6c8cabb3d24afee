//! Utility modules: durable storage and save persistence.

pub mod persistence;
pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};
