/// Bug enemy behaviour: one tick of the state machine per sweep.
///
/// Searching watches for the player; tracking closes in along a cached A*
/// path and steals a treasure on contact; returning carries the loot home,
/// still watching for the player on the way. An enemy that reaches home
/// carrying treasure deposits it and despawns.
///
/// Enemy steps never trigger tile entry effects; those are player-only.
/// A `NoPathFound` on a required path propagates out of the tick, since a
/// connected level should never produce one.

use tracing::{trace, warn};

use crate::domain::actor::{ActorToken, BugEnemy, EnemyState};
use crate::domain::item::Item;
use crate::domain::player::Player;
use crate::domain::position::Position;
use crate::error::GameResult;
use crate::sim::astar;
use crate::sim::board::Board;

/// What a tick did beyond mutating the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TickOutcome {
    Alive,
    /// Reached home carrying treasure: deposited it and despawned.
    Destroyed,
}

pub fn tick(
    board: &mut Board,
    enemy: &mut BugEnemy,
    player: &mut Player,
    leash_factor: f64,
) -> GameResult<TickOutcome> {
    match enemy.state {
        EnemyState::Searching => {
            search_move(board, enemy, player.position())?;
            Ok(TickOutcome::Alive)
        }
        EnemyState::Tracking => {
            track_move(board, enemy, player, leash_factor)?;
            Ok(TickOutcome::Alive)
        }
        EnemyState::Returning => return_move(board, enemy, player.position()),
    }
}

/// Detection check, shared by the searching state and the returning
/// state's look-over-the-shoulder. Transitions to tracking on sight.
fn search_move(board: &Board, enemy: &mut BugEnemy, player_pos: Position) -> GameResult<()> {
    if !sees(board, enemy, player_pos) {
        return Ok(());
    }
    enemy.path = steps_of(astar::pathfind(board, enemy.position, player_pos, false)?);
    enemy.state = EnemyState::Tracking;
    trace!(enemy = enemy.id, "player spotted, tracking");
    Ok(())
}

fn track_move(
    board: &mut Board,
    enemy: &mut BugEnemy,
    player: &mut Player,
    leash_factor: f64,
) -> GameResult<()> {
    if enemy.path.is_empty() {
        enemy.path = steps_of(astar::pathfind(
            board,
            enemy.position,
            player.position(),
            false,
        )?);
    }
    try_step(board, enemy)?;

    // Contact: the player sits on the next path tile.
    if let Some(&next) = enemy.path.front() {
        if board.tile(next)?.actor == Some(ActorToken::Player) {
            if player.has_treasure() {
                player.take_treasure();
                enemy.carrying_treasure = true;
                trace!(enemy = enemy.id, "stole a treasure");
            }
            return head_home(board, enemy);
        }
    }
    // Safety leash: never stray too far from home.
    if enemy.position.distance_to(enemy.home) >= enemy.vision * leash_factor {
        return head_home(board, enemy);
    }
    if !sees(board, enemy, player.position()) {
        return head_home(board, enemy);
    }
    Ok(())
}

fn return_move(
    board: &mut Board,
    enemy: &mut BugEnemy,
    player_pos: Position,
) -> GameResult<TickOutcome> {
    if enemy.path.is_empty() && enemy.position != enemy.home {
        enemy.path = steps_of(astar::pathfind(board, enemy.position, enemy.home, false)?);
    }
    try_step(board, enemy)?;

    if enemy.position == enemy.home {
        if enemy.carrying_treasure {
            let home = board.tile_mut(enemy.home)?;
            home.actor = None;
            if home.accepts_item() && home.item.is_none() {
                home.item = Some(Item::Treasure);
            } else {
                warn!(enemy = enemy.id, "home tile full, stolen treasure lost");
            }
            trace!(enemy = enemy.id, "deposited loot and despawned");
            return Ok(TickOutcome::Destroyed);
        }
        enemy.state = EnemyState::Searching;
        enemy.path.clear();
        return Ok(TickOutcome::Alive);
    }
    // Still en route: keep an eye out for the player.
    search_move(board, enemy, player_pos)?;
    Ok(TickOutcome::Alive)
}

/// Step onto the next cached path tile if it is unoccupied; an occupied
/// tile skips the step for this tick rather than retrying.
fn try_step(board: &mut Board, enemy: &mut BugEnemy) -> GameResult<()> {
    let Some(&next) = enemy.path.front() else {
        return Ok(());
    };
    if board.tile(next)?.actor.is_some() {
        return Ok(());
    }
    enemy.facing = enemy.position.direction_to(next)?;
    board.tile_mut(enemy.position)?.actor = None;
    board.tile_mut(next)?.place_actor(ActorToken::Enemy(enemy.id))?;
    enemy.position = next;
    enemy.path.pop_front();
    Ok(())
}

fn head_home(board: &Board, enemy: &mut BugEnemy) -> GameResult<()> {
    enemy.path = steps_of(astar::pathfind(board, enemy.position, enemy.home, false)?);
    enemy.state = EnemyState::Returning;
    trace!(enemy = enemy.id, "heading home");
    Ok(())
}

fn sees(board: &Board, enemy: &BugEnemy, player_pos: Position) -> bool {
    enemy.position.distance_to(player_pos) <= enemy.vision
        && astar::can_see(board, enemy.position, player_pos)
}

/// Drop the leading current-position entry of an inclusive path.
fn steps_of(path: Vec<Position>) -> std::collections::VecDeque<Position> {
    path.into_iter().skip(1).collect()
}
