// Core types shared by the engine and game layers

pub mod error;
pub mod math;

pub use error::{GameError, GameResult};

/// Identifier given to every spawned game entity (player, enemy, pickup, prop)
pub type EntityId = u64;
