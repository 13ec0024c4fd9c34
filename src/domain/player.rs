/// The controlled character: position, facing, and collected inventory.

use std::collections::HashMap;

use crate::domain::item::KeyColor;
use crate::domain::position::{Direction, Position};

#[derive(Clone, Debug)]
pub struct Player {
    position: Position,
    facing: Direction,
    treasures: usize,
    keychain: HashMap<KeyColor, usize>,
}

impl Player {
    pub fn new(position: Position) -> Self {
        let keychain = KeyColor::ALL.iter().map(|&c| (c, 0)).collect();
        Player {
            position,
            facing: Direction::Down,
            treasures: 0,
            keychain,
        }
    }

    /// Rebuild a player from persisted state.
    pub fn from_parts(
        position: Position,
        facing: Direction,
        treasures: usize,
        keys: impl IntoIterator<Item = (KeyColor, usize)>,
    ) -> Self {
        let mut player = Player::new(position);
        player.facing = facing;
        player.treasures = treasures;
        for (color, count) in keys {
            player.keychain.insert(color, count);
        }
        player
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn set_facing(&mut self, facing: Direction) {
        self.facing = facing;
    }

    // ── Treasure ──

    pub fn treasures(&self) -> usize {
        self.treasures
    }

    pub fn has_treasure(&self) -> bool {
        self.treasures > 0
    }

    pub fn add_treasure(&mut self) {
        self.treasures += 1;
    }

    /// Decrement the treasure count, clamped at zero.
    pub fn take_treasure(&mut self) {
        self.treasures = self.treasures.saturating_sub(1);
    }

    // ── Keychain ──

    pub fn key_count(&self, color: KeyColor) -> usize {
        self.keychain.get(&color).copied().unwrap_or(0)
    }

    pub fn has_key(&self, color: KeyColor) -> bool {
        self.key_count(color) > 0
    }

    pub fn add_key(&mut self, color: KeyColor) {
        *self.keychain.entry(color).or_insert(0) += 1;
    }

    /// Remove one key of the colour, no-op when none are held.
    pub fn remove_key(&mut self, color: KeyColor) {
        if let Some(count) = self.keychain.get_mut(&color) {
            *count = count.saturating_sub(1);
        }
    }

    pub fn image_key(&self) -> String {
        format!("player_{}", self.facing.suffix())
    }
}
