pub mod astar;
pub mod board;
pub mod enemy;
pub mod game;
pub mod level;
pub mod session;
pub mod snapshot;
