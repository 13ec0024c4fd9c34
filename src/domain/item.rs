/// Collectible tile occupants.
///
/// Items are owned by the tile holding them; collection destroys the item
/// and bumps a counter on the player, it never moves an object into an
/// inventory.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum KeyColor {
    Red,
    Green,
    Blue,
}

impl KeyColor {
    pub const ALL: [KeyColor; 3] = [KeyColor::Red, KeyColor::Green, KeyColor::Blue];

    pub fn name(self) -> &'static str {
        match self {
            KeyColor::Red => "red",
            KeyColor::Green => "green",
            KeyColor::Blue => "blue",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Item {
    Key(KeyColor),
    Treasure,
}

impl Item {
    pub fn image_key(self) -> String {
        match self {
            Item::Key(color) => format!("key_{}", color.name()),
            Item::Treasure => "treasure".into(),
        }
    }
}
