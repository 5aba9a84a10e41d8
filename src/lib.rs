//! Eco-pet state engine.
//!
//! Logged eco-actions (recycling, walking, saving energy) feed a persistent
//! pet whose mood decays with neglect and whose XP, level and evolution stage
//! grow with every action. [`engine::PetEngine`] owns the lifecycle; the other
//! modules are pure lookups and transitions it composes.

pub mod achievements;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod evolution;
pub mod migrate;
pub mod model;
pub mod personality;
pub mod sim;
pub mod store;

pub use engine::{EngineConfig, LoadSource, PetEngine, SharedPetEngine};
pub use error::{EngineError, StoreError};
pub use store::{FileStore, KeyValueStore, MemoryStore};
