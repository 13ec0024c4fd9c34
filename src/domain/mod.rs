pub mod actor;
pub mod gate;
pub mod item;
pub mod player;
pub mod position;
pub mod tile;
