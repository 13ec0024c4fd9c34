/// The tile arena: a fixed-size grid indexed by position.
///
/// Tiles are stored row-major; every in-bounds position maps to exactly one
/// tile and out-of-bounds access fails rather than clamping.

use crate::domain::position::{Direction, Position};
use crate::domain::tile::Tile;
use crate::error::{GameError, GameResult};

#[derive(Clone, PartialEq, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// Build a board from a row-major tile vector.
    pub fn new(width: usize, height: usize, tiles: Vec<Tile>) -> GameResult<Self> {
        if width == 0 || height == 0 || tiles.len() != width * height {
            return Err(GameError::InvalidArgument(format!(
                "board wants {}x{} = {} tiles, got {}",
                width,
                height,
                width * height,
                tiles.len()
            )));
        }
        Ok(Board {
            width,
            height,
            tiles,
        })
    }

    /// An all-free board. Loader and test convenience.
    pub fn open(width: usize, height: usize) -> GameResult<Self> {
        Board::new(width, height, vec![Tile::free(); width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> usize {
        pos.y * self.width + pos.x
    }

    pub fn tile(&self, pos: Position) -> GameResult<&Tile> {
        if !self.contains(pos) {
            return Err(GameError::InvalidArgument(format!(
                "position {pos} is off the board"
            )));
        }
        Ok(&self.tiles[self.index(pos)])
    }

    pub fn tile_mut(&mut self, pos: Position) -> GameResult<&mut Tile> {
        if !self.contains(pos) {
            return Err(GameError::InvalidArgument(format!(
                "position {pos} is off the board"
            )));
        }
        let idx = self.index(pos);
        Ok(&mut self.tiles[idx])
    }

    /// The in-bounds neighbour one step in `dir`, if any.
    pub fn neighbour(&self, pos: Position, dir: Direction) -> Option<Position> {
        pos.step(dir).filter(|p| self.contains(*p))
    }

    /// In-bounds orthogonal neighbours, in the fixed `Direction::ALL` order
    /// so pathfinding expansion stays deterministic.
    pub fn adjacent(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL
            .iter()
            .filter_map(move |&dir| self.neighbour(pos, dir))
    }

    /// All positions, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_tile_count() {
        assert!(Board::new(3, 3, vec![Tile::free(); 8]).is_err());
        assert!(Board::new(0, 3, vec![]).is_err());
    }

    #[test]
    fn out_of_bounds_lookup_fails() {
        let board = Board::open(3, 2).unwrap();
        assert!(board.tile(Position::new(2, 1)).is_ok());
        assert!(board.tile(Position::new(3, 0)).is_err());
        assert!(board.tile(Position::new(0, 2)).is_err());
    }

    #[test]
    fn neighbour_respects_edges() {
        let board = Board::open(3, 3).unwrap();
        let corner = Position::new(0, 0);
        assert_eq!(board.neighbour(corner, Direction::Up), None);
        assert_eq!(board.neighbour(corner, Direction::Left), None);
        assert_eq!(
            board.neighbour(corner, Direction::Right),
            Some(Position::new(1, 0))
        );
        assert_eq!(
            board.neighbour(Position::new(2, 2), Direction::Down),
            None
        );
    }

    #[test]
    fn adjacent_order_is_fixed() {
        let board = Board::open(3, 3).unwrap();
        let mid = Position::new(1, 1);
        let neighbours: Vec<Position> = board.adjacent(mid).collect();
        assert_eq!(
            neighbours,
            vec![
                Position::new(1, 0),
                Position::new(1, 2),
                Position::new(0, 1),
                Position::new(2, 1),
            ]
        );
    }
}
