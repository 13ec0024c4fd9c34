/// Grid coordinates and four-way direction arithmetic.
///
/// The origin is the top-left corner: `Up` decreases `y`, `Down` increases
/// it. Coordinates are unsigned, so negative positions are unrepresentable.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed expansion order; pathfinding iterates this for determinism.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Suffix used in directional image keys ("player_up", "bug_left", ...).
    pub fn suffix(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// Euclidean distance. Used as the A* heuristic and for vision and
    /// leash range checks.
    pub fn distance_to(self, other: Position) -> f64 {
        let dx = other.x as f64 - self.x as f64;
        let dy = other.y as f64 - self.y as f64;
        dx.hypot(dy)
    }

    /// The direction from `self` toward an orthogonally aligned position.
    /// Diagonal or identical pairs are a contract violation.
    pub fn direction_to(self, other: Position) -> GameResult<Direction> {
        if self.x == other.x && self.y != other.y {
            return Ok(if other.y < self.y {
                Direction::Up
            } else {
                Direction::Down
            });
        }
        if self.y == other.y && self.x != other.x {
            return Ok(if other.x < self.x {
                Direction::Left
            } else {
                Direction::Right
            });
        }
        Err(GameError::InvalidArgument(format!(
            "no orthogonal direction from {self} to {other}"
        )))
    }

    /// The position one step in `dir`, or `None` past the grid edge.
    /// Bounds on the far side are the board's concern.
    pub fn step(self, dir: Direction) -> Option<Position> {
        match dir {
            Direction::Up => self.y.checked_sub(1).map(|y| Position { x: self.x, y }),
            Direction::Down => Some(Position { x: self.x, y: self.y + 1 }),
            Direction::Left => self.x.checked_sub(1).map(|x| Position { x, y: self.y }),
            Direction::Right => Some(Position { x: self.x + 1, y: self.y }),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
