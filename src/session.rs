use rand::Rng;

use crate::difficulty::Difficulty;
use crate::food::Food;
use crate::geometry::Board;
use crate::obstacles::Obstacles;
use crate::snake::{Direction, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfCollision,
    Obstacle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    Crashed(Collision),
    /// Food was eaten and there is no free cell left for the next one.
    Cleared,
}

/// Everything that lives for exactly one game: snake, food, obstacles and the running score.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    snake: Snake,
    food: Option<Food>,
    obstacles: Obstacles,
    score: u32,
}

impl Session {
    pub fn new<R: Rng>(board: Board, difficulty: Difficulty, rng: &mut R) -> Self {
        let snake = Snake::new(board.start_position(), Direction::Right, board.cell_size());
        let obstacles = Obstacles::generate(&board, difficulty.obstacle_count(), rng);
        let food = Food::spawn(&board, snake.body(), obstacles.blocks(), rng);

        Session { board, snake, food, obstacles, score: 0 }
    }

    #[cfg(test)]
    pub fn from_parts(board: Board, snake: Snake, food: Option<Food>, obstacles: Obstacles) -> Self {
        Session { board, snake, food, obstacles, score: 0 }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Food> {
        self.food
    }

    pub fn obstacles(&self) -> &Obstacles {
        &self.obstacles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Advances the game by one tick. Collisions are checked wall first, then the snake's own
    /// body, then obstacles; food is only considered when none of them hit.
    pub fn step<R: Rng>(&mut self, turn: Option<Direction>, rng: &mut R) -> TickOutcome {
        if let Some(dir) = turn {
            self.snake.set_direction(dir);
        }

        let head = self.snake.move_step();

        if !self.board.contains(head) {
            return TickOutcome::Crashed(Collision::Wall);
        }
        if self.snake.collided_with_self() {
            return TickOutcome::Crashed(Collision::SelfCollision);
        }
        if self.obstacles.contains(head) {
            return TickOutcome::Crashed(Collision::Obstacle);
        }

        match self.food {
            Some(food) if food.position() == head => {
                self.snake.grow();
                self.score += 1;
                self.food = Food::spawn(&self.board, self.snake.body(), self.obstacles.blocks(), rng);
                if self.food.is_some() { TickOutcome::Ate } else { TickOutcome::Cleared }
            }
            _ => TickOutcome::Moved,
        }
    }
}
