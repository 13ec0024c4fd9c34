/// Tile variants and occupant slots.
///
/// A tile is its kind plus three optional occupant slots (actor, item,
/// gate). Entry legality per kind is queried via methods here; the
/// side-effecting entry protocol lives in `sim::game` where the player and
/// observers are in reach.

use serde::{Deserialize, Serialize};

use crate::domain::actor::ActorToken;
use crate::domain::gate::Gate;
use crate::domain::item::Item;
use crate::domain::position::Position;
use crate::error::{GameError, GameResult};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TileKind {
    Free,
    Wall,
    /// Entry ends the game in victory once the player holds enough treasure.
    Exit { treasures_needed: usize },
    /// Free-tile semantics plus a one-shot message on entry.
    Help { text: String },
    /// Relocates the player to the linked twin on entry.
    Teleport { link: Position },
}

#[derive(Clone, PartialEq, Debug)]
pub struct Tile {
    pub kind: TileKind,
    pub actor: Option<ActorToken>,
    pub item: Option<Item>,
    pub gate: Option<Gate>,
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Tile {
            kind,
            actor: None,
            item: None,
            gate: None,
        }
    }

    pub fn free() -> Self {
        Tile::new(TileKind::Free)
    }

    pub fn wall() -> Self {
        Tile::new(TileKind::Wall)
    }

    pub fn is_wall(&self) -> bool {
        matches!(self.kind, TileKind::Wall)
    }

    /// Walls and gate-bearing tiles stop line-of-sight, and with it
    /// indirect pathfinding expansion.
    pub fn blocks_vision(&self) -> bool {
        self.is_wall() || self.gate.is_some()
    }

    // ── Occupant slot rules ──

    /// Only plain free tiles (and help tiles, which share their semantics)
    /// hold items; exits and teleporters stay clear.
    pub fn accepts_item(&self) -> bool {
        matches!(self.kind, TileKind::Free | TileKind::Help { .. })
    }

    pub fn accepts_gate(&self) -> bool {
        matches!(self.kind, TileKind::Free)
    }

    pub fn accepts_actor(&self) -> bool {
        !self.is_wall()
    }

    pub fn place_item(&mut self, item: Item) -> GameResult<()> {
        if !self.accepts_item() || self.item.is_some() {
            return Err(GameError::InvalidArgument(
                "tile cannot hold this item".into(),
            ));
        }
        self.item = Some(item);
        Ok(())
    }

    pub fn place_gate(&mut self, gate: Gate) -> GameResult<()> {
        // A gate and an actor never share a tile.
        if !self.accepts_gate() || self.gate.is_some() || self.actor.is_some() {
            return Err(GameError::InvalidArgument(
                "tile cannot hold this gate".into(),
            ));
        }
        self.gate = Some(gate);
        Ok(())
    }

    pub fn place_actor(&mut self, actor: ActorToken) -> GameResult<()> {
        if !self.accepts_actor() || self.actor.is_some() || self.gate.is_some() {
            return Err(GameError::InvalidArgument(
                "tile cannot hold this actor".into(),
            ));
        }
        self.actor = Some(actor);
        Ok(())
    }

    // ── Rendering ──

    /// Composite image key: a gate covers an item covers the base kind.
    pub fn image_key(&self) -> String {
        if let Some(gate) = &self.gate {
            return gate.image_key();
        }
        if let Some(item) = self.item {
            return item.image_key();
        }
        match &self.kind {
            TileKind::Free => "open_tile".into(),
            TileKind::Wall => "wall".into(),
            TileKind::Exit { .. } => "exit".into(),
            TileKind::Help { .. } => "help_tile".into(),
            TileKind::Teleport { .. } => "teleport".into(),
        }
    }
}
