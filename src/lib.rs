/// Tile-maze simulation engine.
///
/// The engine consumes an already-built world (a `Board` of tiles with
/// items, gates and actors placed) and drives it: player moves through the
/// tile entry protocol, autonomous bug enemies through an A*-backed state
/// machine, and a wall clock that times the level out. `GameSession` wraps
/// the whole thing in a mutex and a background ticker so input dispatch and
/// enemy movement can run from different threads.

pub mod config;
pub mod domain;
pub mod error;
pub mod sim;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::EngineConfig;
pub use error::{GameError, GameResult};
