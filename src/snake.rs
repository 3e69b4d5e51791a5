use crate::geometry::Position;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }
}

/// The snake's body is stored tail-first: the last segment is the head.
#[derive(Debug, Clone)]
pub struct Snake {
    body: Vec<Position>,
    direction: Direction,
    step: i32,
    grow_next_move: bool,
}

impl Snake {
    pub fn new(head: Position, direction: Direction, step: i32) -> Self {
        Snake { body: vec![head], direction, step, grow_next_move: false }
    }

    #[cfg(test)]
    pub fn from_body(body: Vec<Position>, direction: Direction, step: i32) -> Self {
        assert!(!body.is_empty());
        Snake { body, direction, step, grow_next_move: false }
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn head(&self) -> Position {
        // Never empty: created with one segment and moves never shrink it
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn move_step(&mut self) -> Position {
        debug_assert!(!self.is_empty());
        let new_head = self.head().stepped(self.direction, self.step);
        self.body.push(new_head);

        if self.grow_next_move {
            self.grow_next_move = false;
        } else {
            self.body.remove(0);
        }

        new_head
    }

    pub fn set_direction(&mut self, new_direction: Direction) {
        if !self.direction.is_opposite(new_direction) {
            self.direction = new_direction;
        }
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn grow(&mut self) {
        self.grow_next_move = true;
    }

    pub fn collided_with_self(&self) -> bool {
        let (head, rest) = match self.body.split_last() {
            Some(split) => split,
            None => return false,
        };
        rest.contains(head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_move_right_one_cell() {
        let mut snake = Snake::new(pos(300, 200), Right, 10);
        snake.move_step();
        assert_eq!(snake.body(), &[pos(310, 200)]);
    }

    #[test]
    fn test_move_keeps_length() {
        let mut snake = Snake::from_body(vec![pos(280, 200), pos(290, 200), pos(300, 200)], Right, 10);
        for _ in 0..5 {
            let before = snake.len();
            snake.move_step();
            assert_eq!(snake.len(), before);
        }
        assert_eq!(snake.head(), pos(350, 200));
        assert_eq!(snake.body()[0], pos(330, 200));
    }

    #[test]
    fn test_grow_adds_exactly_one_segment() {
        let mut snake = Snake::new(pos(300, 200), Right, 10);
        snake.grow();
        assert_eq!(snake.len(), 1);

        snake.move_step();
        assert_eq!(snake.body(), &[pos(300, 200), pos(310, 200)]);

        // Growth is consumed by a single move
        snake.move_step();
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn test_opposite_direction_rejected() {
        let pairs = [(Up, Down), (Down, Up), (Left, Right), (Right, Left)];
        for (current, opposite) in pairs.iter() {
            let mut snake = Snake::new(pos(100, 100), *current, 10);
            snake.set_direction(*opposite);
            assert_eq!(snake.get_direction(), *current);
        }
    }

    #[test]
    fn test_perpendicular_direction_accepted() {
        let mut snake = Snake::new(pos(100, 100), Right, 10);
        snake.set_direction(Up);
        assert_eq!(snake.get_direction(), Up);
        snake.set_direction(Left);
        assert_eq!(snake.get_direction(), Left);
    }

    #[test]
    fn test_self_collision() {
        // Square loop: the next move puts the head on the old tail's neighbour
        let mut snake = Snake::from_body(
            vec![pos(100, 100), pos(110, 100), pos(120, 100), pos(120, 110), pos(110, 110)],
            Left,
            10,
        );
        assert!(!snake.collided_with_self());

        snake.set_direction(Up);
        snake.move_step();
        assert_eq!(snake.head(), pos(110, 100));
        assert!(snake.collided_with_self());
    }

    #[test]
    fn test_never_empty() {
        let mut snake = Snake::new(pos(300, 200), Right, 10);
        assert!(!snake.is_empty());

        for _ in 0..10 {
            snake.move_step();
            assert!(!snake.is_empty());
            assert_eq!(snake.len(), 1);
        }
    }

    #[test]
    fn test_collision_iff_head_repeated() {
        let single = Snake::new(pos(0, 0), Right, 10);
        assert!(!single.collided_with_self());

        let repeated = Snake::from_body(vec![pos(0, 0), pos(10, 0), pos(0, 0)], Left, 10);
        assert!(repeated.collided_with_self());

        let tail_repeated = Snake::from_body(vec![pos(0, 0), pos(0, 0), pos(10, 0)], Right, 10);
        assert!(!tail_repeated.collided_with_self());
    }
}
