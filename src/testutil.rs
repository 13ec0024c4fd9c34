/// Test helpers: boards and games from string diagrams.

use std::sync::{Arc, Mutex};

use crate::config::EngineConfig;
use crate::domain::actor::BugEnemy;
use crate::domain::gate::Gate;
use crate::domain::item::{Item, KeyColor};
use crate::domain::player::Player;
use crate::domain::position::Position;
use crate::domain::tile::{Tile, TileKind};
use crate::sim::board::Board;
use crate::sim::game::{Game, Observer};
use crate::sim::level::Level;

/// Build a board from a string diagram.
/// Legend:  '#'=Wall  '.'=Free  'X'=Exit(0)  '?'=Help  '1','2'=Teleport pair
///          '$'=Treasure  'r'/'g'/'b'=Keys  'R'/'G'/'B'=Key gates
///          'T'=TreasureGate(1)
pub fn board_from(rows: &[&str]) -> Board {
    let height = rows.len();
    let width = rows[0].len();

    // Locate the teleport pair first so each pad can link to its twin.
    let mut pad_one = None;
    let mut pad_two = None;
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            match ch {
                '1' => pad_one = Some(Position::new(x, y)),
                '2' => pad_two = Some(Position::new(x, y)),
                _ => {}
            }
        }
    }

    let mut tiles = Vec::with_capacity(width * height);
    for row in rows {
        for ch in row.chars() {
            let tile = match ch {
                '#' => Tile::wall(),
                'X' => Tile::new(TileKind::Exit { treasures_needed: 0 }),
                '?' => Tile::new(TileKind::Help {
                    text: "hint".into(),
                }),
                '1' => Tile::new(TileKind::Teleport {
                    link: pad_two.unwrap(),
                }),
                '2' => Tile::new(TileKind::Teleport {
                    link: pad_one.unwrap(),
                }),
                '$' => with_item(Item::Treasure),
                'r' => with_item(Item::Key(KeyColor::Red)),
                'g' => with_item(Item::Key(KeyColor::Green)),
                'b' => with_item(Item::Key(KeyColor::Blue)),
                'R' => with_gate(Gate::Key(KeyColor::Red)),
                'G' => with_gate(Gate::Key(KeyColor::Green)),
                'B' => with_gate(Gate::Key(KeyColor::Blue)),
                'T' => with_gate(Gate::Treasure { required: 1 }),
                _ => Tile::free(),
            };
            tiles.push(tile);
        }
    }
    Board::new(width, height, tiles).unwrap()
}

fn with_item(item: Item) -> Tile {
    let mut tile = Tile::free();
    tile.item = Some(item);
    tile
}

fn with_gate(gate: Gate) -> Tile {
    let mut tile = Tile::free();
    tile.gate = Some(gate);
    tile
}

/// A running game on the diagram board, no enemies.
pub fn game_on(rows: &[&str], player_at: Position) -> Game {
    let level = Level::new(1, 100, board_from(rows), vec![]);
    Game::new(level, Player::new(player_at), EngineConfig::default()).unwrap()
}

/// A running game with one enemy (id 0, vision 8) homed at `enemy_home`.
pub fn game_with_enemy(rows: &[&str], player_at: Position, enemy_home: Position) -> Game {
    let enemy = BugEnemy::new(0, enemy_home, 8.0);
    let level = Level::new(1, 100, board_from(rows), vec![enemy]);
    Game::new(level, Player::new(player_at), EngineConfig::default()).unwrap()
}

/// Observer that records every notification.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl Observer for Recorder {
    fn state_changed(&mut self) {
        self.events.lock().unwrap().push("changed".into());
    }

    fn state_changed_with_message(&mut self, message: &str) {
        self.events.lock().unwrap().push(format!("msg:{message}"));
    }
}
