use rand::{seq::IteratorRandom, Rng};

use crate::geometry::{Board, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    /// Places food on a cell chosen uniformly among those free of snake and obstacles.
    /// Returns `None` once no such cell is left.
    pub fn spawn<R: Rng>(board: &Board, snake_body: &[Position], obstacles: &[Position], rng: &mut R) -> Option<Self> {
        board.cells()
            .filter(|pos| !snake_body.contains(pos) && !obstacles.contains(pos))
            .choose(rng)
            .map(|position| Food { position })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    #[cfg(test)]
    pub fn at(position: Position) -> Self {
        Food { position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_food_avoids_snake_and_obstacles() {
        let board = Board::default();
        let mut rng = StdRng::seed_from_u64(42);
        let snake: Vec<Position> = (0..20).map(|i| Position::new(100 + i * 10, 200)).collect();
        let obstacles: Vec<Position> = (0..12).map(|i| Position::new(i * 10, 50)).collect();

        for _ in 0..200 {
            let food = Food::spawn(&board, &snake, &obstacles, &mut rng).unwrap();
            let pos = food.position();
            assert!(!snake.contains(&pos));
            assert!(!obstacles.contains(&pos));
            assert!(board.contains(pos));
            assert_eq!(pos.x % 10, 0);
            assert_eq!(pos.y % 10, 0);
        }
    }

    #[test]
    fn test_food_takes_last_free_cell() {
        let board = Board::new(20, 20, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let snake = vec![Position::new(0, 0), Position::new(10, 0)];
        let obstacles = vec![Position::new(0, 10)];

        let food = Food::spawn(&board, &snake, &obstacles, &mut rng).unwrap();
        assert_eq!(food.position(), Position::new(10, 10));
    }

    #[test]
    fn test_full_board_has_no_food() {
        let board = Board::new(20, 10, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let snake = vec![Position::new(0, 0), Position::new(10, 0)];

        assert!(Food::spawn(&board, &snake, &[], &mut rng).is_none());
    }
}
