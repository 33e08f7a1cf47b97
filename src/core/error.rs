use thiserror::Error;

use super::EntityId;

/// Errors raised by scene navigation and entity bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("unknown scene '{0}'")]
    UnknownScene(String),

    #[error("scene name is empty")]
    EmptySceneName,

    #[error("level {level} is out of range (1..={max})")]
    LevelOutOfRange { level: u32, max: u32 },

    #[error("entity {0} has no physics body")]
    MissingBody(EntityId),
}

pub type GameResult<T> = Result<T, GameError>;
