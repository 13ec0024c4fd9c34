/// Conditional blockages.
///
/// A gate occupies a tile until a successful open removes it. Key gates
/// consume one key of their colour; treasure gates check the count and
/// consume nothing. A failed open leaves player and gate untouched.

use serde::{Deserialize, Serialize};

use crate::domain::item::KeyColor;
use crate::domain::player::Player;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Gate {
    Key(KeyColor),
    Treasure { required: usize },
}

impl Gate {
    /// Pure openability check. `open` applies the cost.
    pub fn can_open(&self, player: &Player) -> bool {
        match *self {
            Gate::Key(color) => player.has_key(color),
            Gate::Treasure { required } => player.treasures() >= required,
        }
    }

    /// Attempt to open, charging the player on success. The caller removes
    /// the gate from its tile when this returns true.
    pub fn open(&self, player: &mut Player) -> bool {
        match *self {
            Gate::Key(color) => {
                if !player.has_key(color) {
                    return false;
                }
                player.remove_key(color);
                true
            }
            Gate::Treasure { required } => player.treasures() >= required,
        }
    }

    pub fn image_key(&self) -> String {
        match *self {
            Gate::Key(color) => format!("lock_{}", color.name()),
            Gate::Treasure { .. } => "gate_closed".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::position::Position;

    #[test]
    fn key_gate_consumes_one_key() {
        let mut player = Player::new(Position::new(0, 0));
        player.add_key(KeyColor::Blue);
        player.add_key(KeyColor::Blue);
        let gate = Gate::Key(KeyColor::Blue);
        assert!(gate.can_open(&player));
        assert!(gate.open(&mut player));
        assert_eq!(player.key_count(KeyColor::Blue), 1);
    }

    #[test]
    fn key_gate_fails_without_key() {
        let mut player = Player::new(Position::new(0, 0));
        player.add_key(KeyColor::Red);
        let gate = Gate::Key(KeyColor::Green);
        assert!(!gate.can_open(&player));
        assert!(!gate.open(&mut player));
        // Nothing was charged.
        assert_eq!(player.key_count(KeyColor::Red), 1);
    }

    #[test]
    fn treasure_gate_does_not_consume() {
        let mut player = Player::new(Position::new(0, 0));
        player.add_treasure();
        player.add_treasure();
        let gate = Gate::Treasure { required: 2 };
        assert!(gate.open(&mut player));
        assert_eq!(player.treasures(), 2);
    }

    #[test]
    fn treasure_gate_fails_below_requirement() {
        let mut player = Player::new(Position::new(0, 0));
        player.add_treasure();
        let gate = Gate::Treasure { required: 2 };
        assert!(!gate.can_open(&player));
        assert!(!gate.open(&mut player));
        assert_eq!(player.treasures(), 1);
    }

    #[test]
    fn image_keys() {
        assert_eq!(Gate::Key(KeyColor::Blue).image_key(), "lock_blue");
        assert_eq!(Gate::Treasure { required: 3 }.image_key(), "gate_closed");
    }
}
