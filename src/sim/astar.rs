/// A* search over the board.
///
/// Uniform step cost of 1 between orthogonal neighbours, Euclidean
/// heuristic (admissible since the true path is never shorter than the
/// straight line). Ties on estimated total cost break toward the earlier
/// frontier insertion, keeping results deterministic.
///
/// Two modes share the code: indirect search (`direct = false`) plans real
/// movement and refuses to expand through vision-blocking tiles; direct
/// search ignores blockage entirely and exists for line-of-sight tracing.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::domain::position::Position;
use crate::error::{GameError, GameResult};
use crate::sim::board::Board;

struct Node {
    f: f64,
    seq: u64,
    pos: Position,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: invert so the lowest f pops first,
        // with the older insertion winning ties.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest path from `start` to `goal`, inclusive of both endpoints.
pub fn pathfind(
    board: &Board,
    start: Position,
    goal: Position,
    direct: bool,
) -> GameResult<Vec<Position>> {
    board.tile(start)?;
    board.tile(goal)?;

    let mut fringe = BinaryHeap::new();
    let mut seq: u64 = 0;
    fringe.push(Node {
        f: start.distance_to(goal),
        seq,
        pos: start,
    });

    let mut best_g: HashMap<Position, f64> = HashMap::new();
    best_g.insert(start, 0.0);
    let mut came_from: HashMap<Position, Position> = HashMap::new();

    while let Some(Node { pos, .. }) = fringe.pop() {
        if pos == goal {
            return Ok(reconstruct(&came_from, start, goal));
        }
        let g = best_g[&pos];
        for next in board.adjacent(pos) {
            // Indirect search never crosses a vision blocker; excluded
            // outright, not penalized.
            if !direct && board.tile(next)?.blocks_vision() {
                continue;
            }
            let next_g = g + 1.0;
            let improved = best_g.get(&next).map_or(true, |&old| next_g < old);
            if improved {
                best_g.insert(next, next_g);
                came_from.insert(next, pos);
                seq += 1;
                fringe.push(Node {
                    f: next_g + next.distance_to(goal),
                    seq,
                    pos: next,
                });
            }
        }
    }

    Err(GameError::NoPathFound {
        from: start,
        to: goal,
    })
}

fn reconstruct(
    came_from: &HashMap<Position, Position>,
    start: Position,
    goal: Position,
) -> Vec<Position> {
    let mut path = vec![goal];
    let mut cur = goal;
    while cur != start {
        cur = came_from[&cur];
        path.push(cur);
    }
    path.reverse();
    path
}

/// Line-of-sight check: trace the direct path and report sight only when
/// no traversed tile blocks vision. A failed trace counts as blocked.
pub fn can_see(board: &Board, from: Position, to: Position) -> bool {
    match pathfind(board, from, to, true) {
        Ok(trace) => !trace
            .iter()
            .any(|&p| board.tile(p).map_or(true, |t| t.blocks_vision())),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::board_from;

    #[test]
    fn straight_corridor_path_length() {
        let board = board_from(&["......."]);
        let path = pathfind(
            &board,
            Position::new(0, 0),
            Position::new(6, 0),
            false,
        )
        .unwrap();
        // N tiles inclusive, N-1 edges.
        assert_eq!(path.len(), 7);
        assert_eq!(path[0], Position::new(0, 0));
        assert_eq!(path[6], Position::new(6, 0));
    }

    #[test]
    fn vertical_corridor_path_length() {
        let board = board_from(&[".", ".", ".", "."]);
        let path = pathfind(
            &board,
            Position::new(0, 0),
            Position::new(0, 3),
            false,
        )
        .unwrap();
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn start_equals_goal() {
        let board = board_from(&["..."]);
        let path = pathfind(
            &board,
            Position::new(1, 0),
            Position::new(1, 0),
            false,
        )
        .unwrap();
        assert_eq!(path, vec![Position::new(1, 0)]);
    }

    #[test]
    fn routes_around_walls() {
        let board = board_from(&[
            ".....",
            ".###.",
            ".....",
        ]);
        let path = pathfind(
            &board,
            Position::new(0, 1),
            Position::new(4, 1),
            false,
        )
        .unwrap();
        assert_eq!(path.len(), 7);
        assert!(path.iter().all(|&p| !board.tile(p).unwrap().is_wall()));
    }

    #[test]
    fn gate_blocks_indirect_but_not_direct() {
        // The only route runs through a gate-bearing tile.
        let board = board_from(&[
            "###",
            ".R.",
            "###",
        ]);
        let start = Position::new(0, 1);
        let goal = Position::new(2, 1);
        assert!(matches!(
            pathfind(&board, start, goal, false),
            Err(GameError::NoPathFound { .. })
        ));
        let direct = pathfind(&board, start, goal, true).unwrap();
        assert_eq!(direct.len(), 3);
    }

    #[test]
    fn deterministic_tie_break() {
        let board = board_from(&[
            "....",
            "....",
            "....",
        ]);
        let a = pathfind(&board, Position::new(0, 0), Position::new(3, 2), false).unwrap();
        let b = pathfind(&board, Position::new(0, 0), Position::new(3, 2), false).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sight_blocked_by_wall_between() {
        let board = board_from(&[
            "...",
            "#.#",
            "...",
        ]);
        // Straight line down passes through the open middle column.
        assert!(can_see(&board, Position::new(1, 0), Position::new(1, 2)));
        // Enclosed goal: every trace crosses a wall.
        let walled = board_from(&[
            ".#.",
            "#.#",
            ".#.",
        ]);
        assert!(!can_see(&walled, Position::new(0, 0), Position::new(1, 1)));
    }

    #[test]
    fn sight_blocked_by_gate() {
        let board = board_from(&[
            "#####",
            "..R..",
            "#####",
        ]);
        assert!(!can_see(&board, Position::new(0, 1), Position::new(4, 1)));
    }
}
