use rand::Rng;

use crate::geometry::{Board, Position};

/// Static blocks for one game. Each block is drawn independently, so two blocks may share
/// a cell and a block may land on the snake's starting square.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Obstacles {
    blocks: Vec<Position>,
}

impl Obstacles {
    pub fn generate<R: Rng>(board: &Board, count: usize, rng: &mut R) -> Self {
        let blocks = (0..count).map(|_| board.random_cell(rng)).collect();
        Obstacles { blocks }
    }

    #[cfg(test)]
    pub fn from_blocks(blocks: Vec<Position>) -> Self {
        Obstacles { blocks }
    }

    pub fn blocks(&self) -> &[Position] {
        &self.blocks
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.blocks.contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_generates_requested_count() {
        let board = Board::default();
        let mut rng = StdRng::seed_from_u64(3);
        for count in [0, 3, 7, 12] {
            let obstacles = Obstacles::generate(&board, count, &mut rng);
            assert_eq!(obstacles.blocks().len(), count);
        }
    }

    #[test]
    fn test_blocks_are_grid_aligned_and_in_bounds() {
        let board = Board::default();
        let mut rng = StdRng::seed_from_u64(99);
        let obstacles = Obstacles::generate(&board, 500, &mut rng);
        for block in obstacles.blocks() {
            assert!(board.contains(*block));
            assert_eq!(block.x % board.cell_size(), 0);
            assert_eq!(block.y % board.cell_size(), 0);
        }
    }

    #[test]
    fn test_duplicates_allowed() {
        // A single-cell board forces every block onto the same square
        let board = Board::new(10, 10, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let obstacles = Obstacles::generate(&board, 4, &mut rng);
        assert_eq!(obstacles.blocks(), &[Position::new(0, 0); 4]);
        assert!(obstacles.contains(Position::new(0, 0)));
    }
}
