/// Serializable world snapshot for the persistence collaborator.
///
/// Captures everything needed to rebuild an equivalent world: per-tile
/// kind, item, and gate (with its true treasure requirement), the player's
/// position and inventory, the enemy roster, and the level stage and
/// clock. Actor tokens and cached enemy paths are not stored; tokens are
/// re-placed on restore and paths recompute on demand.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::domain::actor::{BugEnemy, EnemyId, EnemyState};
use crate::domain::gate::Gate;
use crate::domain::item::{Item, KeyColor};
use crate::domain::player::Player;
use crate::domain::position::{Direction, Position};
use crate::domain::tile::{Tile, TileKind};
use crate::error::GameResult;
use crate::sim::board::Board;
use crate::sim::game::Game;
use crate::sim::level::Level;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub stage: u32,
    pub time_remaining: u32,
    pub player: PlayerRecord,
    /// Row-major, like the board itself.
    pub tiles: Vec<TileRecord>,
    pub enemies: Vec<EnemyRecord>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TileRecord {
    pub kind: TileKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<Gate>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub facing: Direction,
    pub treasures: usize,
    pub keys: Vec<(KeyColor, usize)>,
    pub position: Position,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct EnemyRecord {
    pub id: EnemyId,
    pub facing: Direction,
    pub state: EnemyState,
    pub carrying_treasure: bool,
    pub vision: f64,
    pub position: Position,
    pub home: Position,
}

impl Snapshot {
    pub fn capture(game: &Game) -> GameResult<Snapshot> {
        let level = game.level();
        let board = &level.board;
        let mut tiles = Vec::with_capacity(board.width() * board.height());
        for pos in board.positions() {
            let tile = board.tile(pos)?;
            tiles.push(TileRecord {
                kind: tile.kind.clone(),
                item: tile.item,
                gate: tile.gate,
            });
        }
        let player = game.player();
        Ok(Snapshot {
            width: board.width(),
            height: board.height(),
            tiles,
            player: PlayerRecord {
                position: player.position(),
                facing: player.facing(),
                treasures: player.treasures(),
                keys: KeyColor::ALL
                    .iter()
                    .map(|&c| (c, player.key_count(c)))
                    .collect(),
            },
            enemies: level
                .enemies
                .iter()
                .map(|e| EnemyRecord {
                    id: e.id,
                    position: e.position,
                    home: e.home,
                    facing: e.facing,
                    state: e.state,
                    carrying_treasure: e.carrying_treasure,
                    vision: e.vision,
                })
                .collect(),
            stage: level.stage,
            time_remaining: level.time_remaining(),
        })
    }

    /// Rebuild a running game from the snapshot.
    pub fn restore(&self, config: EngineConfig) -> GameResult<Game> {
        let tiles = self
            .tiles
            .iter()
            .map(|record| {
                let mut tile = Tile::new(record.kind.clone());
                tile.item = record.item;
                tile.gate = record.gate;
                tile
            })
            .collect();
        let board = Board::new(self.width, self.height, tiles)?;
        let enemies = self
            .enemies
            .iter()
            .map(|record| {
                let mut enemy = BugEnemy::new(record.id, record.home, record.vision);
                enemy.position = record.position;
                enemy.facing = record.facing;
                enemy.state = record.state;
                enemy.carrying_treasure = record.carrying_treasure;
                enemy
            })
            .collect();
        let level = Level::new(self.stage, self.time_remaining, board, enemies);
        let player = Player::from_parts(
            self.player.position,
            self.player.facing,
            self.player.treasures,
            self.player.keys.iter().copied(),
        );
        Game::new(level, player, config)
    }
}
