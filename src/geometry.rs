use rand::Rng;

use crate::error::GameError;
use crate::snake::Direction::{self, *};

/// Top-left corner of a grid cell, in board units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// The position one step of `step` units away in `direction`.
    pub fn stepped(&self, direction: Direction, step: i32) -> Self {
        match direction {
            Up => Position::new(self.x, self.y - step),
            Down => Position::new(self.x, self.y + step),
            Left => Position::new(self.x - step, self.y),
            Right => Position::new(self.x + step, self.y),
        }
    }
}

/// Playing field dimensions. Width and height are always whole multiples of the cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    cell_size: i32,
}

impl Board {
    pub const DEFAULT_WIDTH: i32 = 600;
    pub const DEFAULT_HEIGHT: i32 = 400;
    pub const DEFAULT_CELL_SIZE: i32 = 10;

    pub fn new(width: i32, height: i32, cell_size: i32) -> Result<Self, GameError> {
        let valid = cell_size > 0
            && width >= cell_size
            && height >= cell_size
            && width % cell_size == 0
            && height % cell_size == 0;

        if !valid {
            return Err(GameError::InvalidBoard { width, height, cell_size });
        }

        Ok(Board { width, height, cell_size })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Where a fresh snake starts: the board centre snapped down to the grid.
    pub fn start_position(&self) -> Position {
        let snap = |v: i32| v / self.cell_size * self.cell_size;
        Position::new(snap(self.width / 2), snap(self.height / 2))
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows()).flat_map(move |row| {
            (0..self.columns()).map(move |col| Position::new(col * self.cell_size, row * self.cell_size))
        })
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Position {
        let col = rng.gen_range(0..self.columns());
        let row = rng.gen_range(0..self.rows());
        Position::new(col * self.cell_size, row * self.cell_size)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            cell_size: Self::DEFAULT_CELL_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_default_board() {
        let board = Board::default();
        assert_eq!(board.columns(), 60);
        assert_eq!(board.rows(), 40);
        assert_eq!(board.start_position(), Position::new(300, 200));
    }

    #[test]
    fn test_rejects_unaligned_board() {
        assert!(Board::new(605, 400, 10).is_err());
        assert!(Board::new(600, 400, 0).is_err());
        assert!(Board::new(5, 400, 10).is_err());
        assert!(Board::new(200, 100, 20).is_ok());
    }

    #[test]
    fn test_start_position_is_grid_aligned() {
        let board = Board::new(100, 60, 20).unwrap();
        assert_eq!(board.start_position(), Position::new(40, 20));
    }

    #[test]
    fn test_bounds() {
        let board = Board::default();
        assert!(board.contains(Position::new(0, 0)));
        assert!(board.contains(Position::new(590, 390)));
        assert!(!board.contains(Position::new(600, 200)));
        assert!(!board.contains(Position::new(300, 400)));
        assert!(!board.contains(Position::new(-10, 0)));
        assert!(!board.contains(Position::new(0, -10)));
    }

    #[test]
    fn test_stepped() {
        let pos = Position::new(300, 200);
        assert_eq!(pos.stepped(Right, 10), Position::new(310, 200));
        assert_eq!(pos.stepped(Left, 10), Position::new(290, 200));
        assert_eq!(pos.stepped(Up, 10), Position::new(300, 190));
        assert_eq!(pos.stepped(Down, 10), Position::new(300, 210));
    }

    #[test]
    fn test_cells_cover_board() {
        let board = Board::new(40, 30, 10).unwrap();
        let cells: Vec<Position> = board.cells().collect();
        assert_eq!(cells.len(), 12);
        assert!(cells.iter().all(|c| board.contains(*c)));
    }

    #[test]
    fn test_random_cell_is_aligned_and_in_bounds() {
        let board = Board::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let cell = board.random_cell(&mut rng);
            assert!(board.contains(cell));
            assert_eq!(cell.x % 10, 0);
            assert_eq!(cell.y % 10, 0);
        }
    }
}
