/// Level aggregate: stage number, clock, board, and the live enemy roster.

use crate::domain::actor::{BugEnemy, EnemyId};
use crate::domain::player::Player;
use crate::error::GameResult;
use crate::sim::board::Board;
use crate::sim::enemy::{self, TickOutcome};

#[derive(Clone, Debug)]
pub struct Level {
    pub stage: u32,
    time_remaining: u32,
    pub board: Board,
    pub enemies: Vec<BugEnemy>,
}

impl Level {
    pub fn new(stage: u32, time_limit: u32, board: Board, enemies: Vec<BugEnemy>) -> Self {
        Level {
            stage,
            time_remaining: time_limit,
            board,
            enemies,
        }
    }

    /// Seconds left on the clock.
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn set_time(&mut self, seconds: u32) {
        self.time_remaining = seconds;
    }

    /// Tick the clock down one second, clamped at zero. Returns the new
    /// remaining time.
    pub fn decrement_time(&mut self) -> u32 {
        self.time_remaining = self.time_remaining.saturating_sub(1);
        self.time_remaining
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&BugEnemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// One full sweep: every live enemy takes a turn. Enemies that return
    /// home carrying treasure despawn mid-sweep.
    pub fn move_all_enemies(&mut self, player: &mut Player, leash_factor: f64) -> GameResult<()> {
        let Level { board, enemies, .. } = self;
        let mut i = 0;
        while i < enemies.len() {
            match enemy::tick(board, &mut enemies[i], player, leash_factor)? {
                TickOutcome::Destroyed => {
                    enemies.remove(i);
                }
                TickOutcome::Alive => i += 1,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::actor::{ActorToken, EnemyState};
    use crate::domain::item::Item;
    use crate::domain::position::Position;
    use crate::testutil::board_from;

    #[test]
    fn clock_clamps_at_zero() {
        let mut level = Level::new(1, 2, board_from(&["..."]), vec![]);
        assert_eq!(level.decrement_time(), 1);
        assert_eq!(level.decrement_time(), 0);
        assert_eq!(level.decrement_time(), 0);
    }

    #[test]
    fn sweep_removes_despawned_enemies() {
        let mut board = board_from(&["..."]);
        let mut enemy = BugEnemy::new(0, Position::new(0, 0), 8.0);
        enemy.carrying_treasure = true;
        enemy.state = EnemyState::Returning;
        board
            .tile_mut(Position::new(0, 0))
            .unwrap()
            .place_actor(ActorToken::Enemy(0))
            .unwrap();
        board
            .tile_mut(Position::new(2, 0))
            .unwrap()
            .place_actor(ActorToken::Player)
            .unwrap();
        let mut player = Player::new(Position::new(2, 0));

        let mut level = Level::new(1, 60, board, vec![enemy]);
        // Already home and loaded: the first returning tick despawns it.
        level.move_all_enemies(&mut player, 1.5).unwrap();
        assert!(level.enemies.is_empty());
        assert_eq!(
            level.board.tile(Position::new(0, 0)).unwrap().item,
            Some(Item::Treasure)
        );
    }
}
