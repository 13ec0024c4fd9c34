/// Mobile occupants: the player token and autonomous bug enemies.
///
/// Tiles reference actors by token rather than holding them, so the board
/// and the enemy roster never point at each other.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::position::{Direction, Position};

pub type EnemyId = u32;

/// What occupies a tile's actor slot.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ActorToken {
    Player,
    Enemy(EnemyId),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum EnemyState {
    /// Idle at or near home, watching for the player.
    Searching,
    /// Player spotted, moving in to steal a treasure.
    Tracking,
    /// Heading back to the home tile, with or without loot.
    Returning,
}

/// Time-waster enemy. It does not try to make the level impossible, only
/// to burn the clock: spot the player, chase, steal one treasure, carry it
/// home and despawn.
#[derive(Clone, Debug)]
pub struct BugEnemy {
    pub id: EnemyId,
    pub position: Position,
    /// Anchor tile: return destination and origin of the leash range.
    pub home: Position,
    pub facing: Direction,
    pub state: EnemyState,
    /// Remaining steps of the cached A* path, front = next tile.
    pub path: VecDeque<Position>,
    pub carrying_treasure: bool,
    /// Detection radius in tiles.
    pub vision: f64,
}

impl BugEnemy {
    pub fn new(id: EnemyId, home: Position, vision: f64) -> Self {
        BugEnemy {
            id,
            position: home,
            home,
            facing: Direction::Down,
            state: EnemyState::Searching,
            path: VecDeque::new(),
            carrying_treasure: false,
            vision,
        }
    }

    pub fn image_key(&self) -> String {
        format!("bug_{}", self.facing.suffix())
    }
}
