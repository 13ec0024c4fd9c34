/// Session root: the game state machine, the player-move entry protocol,
/// and the observer registry.
///
/// Every mutation either completes fully (including chained teleport
/// effects) or is rejected before anything changes. Rejected player moves
/// are absorbed as logged no-ops; only successful moves and game-ending
/// transitions reach observers.

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::domain::actor::ActorToken;
use crate::domain::item::Item;
use crate::domain::player::Player;
use crate::domain::position::{Direction, Position};
use crate::domain::tile::{Tile, TileKind};
use crate::error::{GameError, GameResult};
use crate::sim::level::Level;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Running,
    Paused,
    Finished,
}

/// Change notifications for the rendering/UI collaborator.
pub trait Observer: Send {
    fn state_changed(&mut self);
    fn state_changed_with_message(&mut self, message: &str);
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ObserverId(u64);

const VICTORY_TEXT: &str = "You escaped the maze! Congratulations!";
const TIMEOUT_TEXT: &str = "You did not escape the maze in time.";

/// Side effects of a successful move that the caller reports afterward.
#[derive(Default)]
struct MoveEvents {
    message: Option<String>,
}

pub struct Game {
    level: Level,
    player: Player,
    state: GameState,
    /// `Some(true)` on victory, `Some(false)` on timeout.
    outcome: Option<bool>,
    config: EngineConfig,
    observers: Vec<(ObserverId, Box<dyn Observer>)>,
    next_observer_id: u64,
}

impl Game {
    /// Build a game over an already-loaded world. Places the player and
    /// enemy tokens on their tiles; a blocked starting tile is a malformed
    /// level.
    pub fn new(mut level: Level, player: Player, config: EngineConfig) -> GameResult<Game> {
        place_tokens(&mut level, &player)?;
        Ok(Game {
            level,
            player,
            state: GameState::Running,
            outcome: None,
            config,
            observers: Vec::new(),
            next_observer_id: 0,
        })
    }

    // ── Accessors ──

    pub fn state(&self) -> GameState {
        self.state
    }

    /// `Some(true)` after a victory, `Some(false)` after a timeout.
    pub fn outcome(&self) -> Option<bool> {
        self.outcome
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Mutable level access for loader/persistence collaborators.
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board_dimensions(&self) -> (usize, usize) {
        (self.level.board.width(), self.level.board.height())
    }

    pub fn tile_at(&self, pos: Position) -> GameResult<&Tile> {
        self.level.board.tile(pos)
    }

    // ── Observers ──

    pub fn attach(&mut self, observer: Box<dyn Observer>) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Detach an observer. Returns false if the id was unknown.
    pub fn detach(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    fn notify_changed(&mut self) {
        for (_, observer) in &mut self.observers {
            observer.state_changed();
        }
    }

    fn notify_message(&mut self, message: &str) {
        for (_, observer) in &mut self.observers {
            observer.state_changed_with_message(message);
        }
    }

    // ── State machine ──

    pub fn pause(&mut self) {
        if self.state == GameState::Running {
            self.state = GameState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == GameState::Paused {
            self.state = GameState::Running;
        }
    }

    /// End the game. Only valid while running.
    pub fn game_over(&mut self, won: bool) -> GameResult<()> {
        if self.state != GameState::Running {
            return Err(GameError::InvalidState(
                "trying to end a game that is not running".into(),
            ));
        }
        self.state = GameState::Finished;
        self.outcome = Some(won);
        let text = if won { VICTORY_TEXT } else { TIMEOUT_TEXT };
        self.notify_message(text);
        Ok(())
    }

    /// Install a fresh level/player pair and resume running, keeping the
    /// session object and its observers.
    pub fn restart(&mut self, mut level: Level, player: Player) -> GameResult<()> {
        place_tokens(&mut level, &player)?;
        self.level = level;
        self.player = player;
        self.state = GameState::Running;
        self.outcome = None;
        Ok(())
    }

    // ── Ticking ──

    /// One enemy sweep. No-op unless running. `NoPathFound` propagates:
    /// a connected level must never produce one.
    pub fn tick_enemies(&mut self) -> GameResult<()> {
        if self.state != GameState::Running {
            return Ok(());
        }
        self.level
            .move_all_enemies(&mut self.player, self.config.leash_factor)
    }

    /// Advance the level clock one second; at zero the game ends as a
    /// timeout loss. No-op unless running.
    pub fn tick_clock(&mut self) -> GameResult<()> {
        if self.state != GameState::Running {
            return Ok(());
        }
        if self.level.decrement_time() == 0 {
            self.game_over(false)?;
        }
        Ok(())
    }

    // ── Player movement ──

    /// Move the player one tile. A rejected move is absorbed as a logged
    /// no-op; a successful one notifies observers.
    pub fn move_player(&mut self, dir: Direction) {
        match self.try_move_player(dir) {
            Ok(events) => {
                self.notify_changed();
                if let Some(message) = events.message {
                    self.notify_message(&message);
                }
            }
            Err(err) => debug!(%err, "player move rejected"),
        }
    }

    fn try_move_player(&mut self, dir: Direction) -> GameResult<MoveEvents> {
        match self.state {
            GameState::Paused => {
                return Err(GameError::InvalidState(
                    "cannot move player while paused".into(),
                ))
            }
            GameState::Finished => {
                return Err(GameError::InvalidState(
                    "cannot move player after the game finished".into(),
                ))
            }
            GameState::Running => {}
        }
        let from = self.player.position();
        let target = self
            .level
            .board
            .neighbour(from, dir)
            .ok_or_else(|| GameError::InvalidArgument(format!("no tile {dir:?} of {from}")))?;
        self.enter_tile(from, target, dir)
    }

    /// The tile entry protocol: reject before mutating, then commit the
    /// whole move including the gate removal and entry effects.
    fn enter_tile(
        &mut self,
        from: Position,
        target: Position,
        facing: Direction,
    ) -> GameResult<MoveEvents> {
        {
            let tile = self.level.board.tile(target)?;
            if tile.is_wall() {
                return Err(GameError::InvalidState("cannot enter a wall".into()));
            }
            if tile.actor.is_some() {
                return Err(GameError::InvalidState("tile is occupied".into()));
            }
            if let TileKind::Exit { treasures_needed } = tile.kind {
                if self.player.treasures() < treasures_needed {
                    return Err(GameError::InvalidState(
                        "exit reached without enough treasure".into(),
                    ));
                }
            }
            if let Some(gate) = tile.gate {
                if !gate.can_open(&self.player) {
                    return Err(GameError::InvalidState("gate will not open".into()));
                }
            }
        }
        // All checks passed; the move commits from here on.
        let gate = self.level.board.tile(target)?.gate;
        if let Some(gate) = gate {
            gate.open(&mut self.player);
            self.level.board.tile_mut(target)?.gate = None;
        }
        self.level.board.tile_mut(from)?.actor = None;
        self.level
            .board
            .tile_mut(target)?
            .place_actor(ActorToken::Player)?;
        self.player.set_position(target);
        self.player.set_facing(facing);
        self.apply_entry_effects(target)
    }

    fn apply_entry_effects(&mut self, pos: Position) -> GameResult<MoveEvents> {
        let mut events = MoveEvents::default();
        self.pick_up_item(pos)?;
        let kind = self.level.board.tile(pos)?.kind.clone();
        match kind {
            TileKind::Help { text } => {
                events.message = Some(text);
            }
            TileKind::Exit { .. } => {
                // Requirement was verified before the move.
                self.game_over(true)?;
            }
            TileKind::Teleport { link } => {
                self.teleport_player(pos, link, &mut events)?;
            }
            TileKind::Free | TileKind::Wall => {}
        }
        Ok(events)
    }

    fn pick_up_item(&mut self, pos: Position) -> GameResult<()> {
        let picked = self.level.board.tile_mut(pos)?.item.take();
        match picked {
            Some(Item::Key(color)) => self.player.add_key(color),
            Some(Item::Treasure) => self.player.add_treasure(),
            None => {}
        }
        Ok(())
    }

    /// Relocate the player to the linked pad. A blocked destination leaves
    /// the player standing on the entry pad. Teleport entry never chains:
    /// the destination's own teleport effect is suppressed.
    fn teleport_player(
        &mut self,
        from: Position,
        link: Position,
        events: &mut MoveEvents,
    ) -> GameResult<()> {
        let dest = self.level.board.tile(link)?;
        if dest.is_wall() || dest.actor.is_some() || dest.gate.is_some() {
            return Ok(());
        }
        let dest_kind = dest.kind.clone();
        self.level.board.tile_mut(from)?.actor = None;
        self.level
            .board
            .tile_mut(link)?
            .place_actor(ActorToken::Player)?;
        self.player.set_position(link);
        // Links pair teleport pads, which carry no effects of their own.
        // Anything else applies its non-teleport entry effects once.
        match dest_kind {
            TileKind::Teleport { .. } => {}
            TileKind::Help { text } => {
                self.pick_up_item(link)?;
                events.message = Some(text);
            }
            TileKind::Exit { treasures_needed } => {
                if self.player.treasures() >= treasures_needed {
                    self.game_over(true)?;
                } else {
                    warn!("teleport dropped the player on a locked exit");
                }
            }
            TileKind::Free => {
                self.pick_up_item(link)?;
            }
            TileKind::Wall => {}
        }
        Ok(())
    }
}

/// Attach the player and enemy tokens to their starting tiles.
fn place_tokens(level: &mut Level, player: &Player) -> GameResult<()> {
    level
        .board
        .tile_mut(player.position())?
        .place_actor(ActorToken::Player)?;
    for enemy in &level.enemies {
        level
            .board
            .tile_mut(enemy.position)?
            .place_actor(ActorToken::Enemy(enemy.id))?;
    }
    Ok(())
}
