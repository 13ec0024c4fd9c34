/// Error taxonomy.
///
/// `InvalidArgument` and `InvalidState` are absorbed at the orchestration
/// layer when they come from a player move; `NoPathFound` from an enemy's
/// required path is an internal-consistency violation and is never absorbed.

use thiserror::Error;

use crate::domain::position::Position;

pub type GameResult<T> = Result<T, GameError>;

#[derive(Clone, PartialEq, Debug, Error)]
pub enum GameError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("no path from {from} to {to}")]
    NoPathFound { from: Position, to: Position },
}
