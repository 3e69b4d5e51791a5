use log::{debug, info, warn};
use rand::Rng;

use crate::difficulty::Difficulty;
use crate::error::GameError;
use crate::frontend::{Canvas, Clock, Color, EventSource, InputEvent, Key, Screen};
use crate::geometry::{Board, Position};
use crate::high_score::HighScoreStore;
use crate::session::{Session, TickOutcome};
use crate::snake::Direction::{self, *};

const BACKGROUND: Color = Color::White;
const TEXT_COLOR: Color = Color::Black;
const SNAKE_COLOR: Color = Color::Green;
const FOOD_COLOR: Color = Color::Red;
const OBSTACLE_COLOR: Color = Color::Gray;

/// Where the game loop is. Each arm of `SnakeGame::run` handles one phase and names the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    SelectDifficulty,
    Playing(Difficulty),
    GameOver { score: u32 },
    Terminated,
}

/// What one tick's worth of input boils down to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickInput {
    Quit,
    Steer(Option<Direction>),
}

/// Builds the opening layout of a game.
type Layout<R> = fn(Board, Difficulty, &mut R) -> Session;

pub struct SnakeGame<F, K, R = rand::rngs::ThreadRng> {
    frontend: F,
    clock: K,
    rng: R,
    board: Board,
    high_scores: HighScoreStore,
    layout: Layout<R>,
}

impl<F: Canvas + EventSource, K: Clock> SnakeGame<F, K> {
    pub fn new(frontend: F, clock: K, board: Board, high_scores: HighScoreStore) -> Self {
        SnakeGame::with_rng(frontend, clock, board, high_scores, rand::thread_rng())
    }
}

impl<F: Canvas + EventSource, K: Clock, R: Rng> SnakeGame<F, K, R> {
    pub fn with_rng(frontend: F, clock: K, board: Board, high_scores: HighScoreStore, rng: R) -> Self {
        SnakeGame { frontend, clock, rng, board, high_scores, layout: Session::new::<R> }
    }

    #[cfg(test)]
    fn with_layout(mut self, layout: Layout<R>) -> Self {
        self.layout = layout;
        self
    }

    #[cfg(test)]
    fn into_frontend(self) -> F {
        self.frontend
    }

    /// Runs games back to back until the player quits.
    pub fn run(&mut self) -> Result<(), GameError> {
        let mut phase = Phase::SelectDifficulty;

        loop {
            phase = match phase {
                Phase::SelectDifficulty => self.select_difficulty()?,
                Phase::Playing(difficulty) => self.play(difficulty)?,
                Phase::GameOver { score } => self.game_over(score)?,
                Phase::Terminated => {
                    info!("Player quit");
                    return Ok(());
                }
            };
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn select_difficulty(&mut self) -> Result<Phase, GameError> {
        let (w, h) = (self.board.width(), self.board.height());

        self.frontend.clear(BACKGROUND);
        self.frontend.draw_text(
            "Select Difficulty: E - Easy, M - Medium, H - Hard",
            Position::new(w / 8, h / 3),
            TEXT_COLOR,
        );
        self.frontend.present()?;

        loop {
            match self.frontend.wait_event()? {
                InputEvent::Quit => return Ok(Phase::Terminated),
                InputEvent::KeyDown(key) => {
                    if let Some(difficulty) = Difficulty::from_key(key) {
                        info!(
                            "Difficulty {:?}: {} ticks/s, {} obstacles",
                            difficulty,
                            difficulty.tick_rate(),
                            difficulty.obstacle_count()
                        );
                        return Ok(Phase::Playing(difficulty));
                    }
                }
            }
        }
    }

    fn play(&mut self, difficulty: Difficulty) -> Result<Phase, GameError> {
        let high_score = self.high_scores.load()?;
        let mut session = (self.layout)(self.board, difficulty, &mut self.rng);

        if session.obstacles().contains(session.snake().head()) {
            debug!("An obstacle landed on the starting square");
        }

        loop {
            self.clock.tick(difficulty.tick_rate());

            let events = self.frontend.drain_events()?;
            let turn = match collapse_input(session.snake().get_direction(), &events) {
                TickInput::Quit => return Ok(Phase::Terminated),
                TickInput::Steer(turn) => turn,
            };

            match session.step(turn, &mut self.rng) {
                TickOutcome::Moved => {}
                TickOutcome::Ate => debug!("Food eaten, score {}", session.score()),
                TickOutcome::Crashed(collision) => {
                    info!(
                        "Game over: {:?} at {:?}, length {}, score {}",
                        collision,
                        session.snake().head(),
                        session.snake().len(),
                        session.score()
                    );
                    return Ok(Phase::GameOver { score: session.score() });
                }
                TickOutcome::Cleared => {
                    warn!("No free cell left for food, ending the game with score {}", session.score());
                    return Ok(Phase::GameOver { score: session.score() });
                }
            }

            self.draw_session(&session, high_score)?;
        }
    }

    fn game_over(&mut self, score: u32) -> Result<Phase, GameError> {
        let high_score = self.high_scores.record(score)?;
        let (w, h) = (self.board.width(), self.board.height());

        self.frontend.clear(BACKGROUND);
        self.frontend.draw_text(&format!("Game Over! Your Score: {}", score), Position::new(w / 6, h / 4), FOOD_COLOR);
        self.frontend.draw_text(&format!("High Score: {}", high_score), Position::new(w / 6, h / 3), TEXT_COLOR);
        self.frontend.draw_text("Press C to Play Again or Q to Quit", Position::new(w / 6, h / 2), TEXT_COLOR);
        self.frontend.present()?;

        loop {
            match self.frontend.wait_event()? {
                InputEvent::Quit | InputEvent::KeyDown(Key::Q) => return Ok(Phase::Terminated),
                InputEvent::KeyDown(Key::C) => return Ok(Phase::SelectDifficulty),
                InputEvent::KeyDown(_) => {}
            }
        }
    }

    fn draw_session(&mut self, session: &Session, high_score: u32) -> Result<(), GameError> {
        let size = self.board.cell_size();

        self.frontend.clear(BACKGROUND);
        for segment in session.snake().body() {
            self.frontend.draw_rect(*segment, size, SNAKE_COLOR);
        }
        if let Some(food) = session.food() {
            self.frontend.draw_rect(food.position(), size, FOOD_COLOR);
        }
        for block in session.obstacles().blocks() {
            self.frontend.draw_rect(*block, size, OBSTACLE_COLOR);
        }
        self.frontend.draw_text(
            &format!("Score: {}  High Score: {}", session.score(), high_score),
            Position::new(10, 10),
            TEXT_COLOR,
        );

        self.frontend.present()
    }
}

impl<F: Canvas + EventSource + Screen, K: Clock, R: Rng> SnakeGame<F, K, R> {
    /// Takes over the screen, runs, and hands the screen back however the run ended.
    /// A failed run wins over a failed restore when both go wrong.
    pub fn run_on_screen(&mut self) -> Result<(), GameError> {
        let result = match self.frontend.setup() {
            Ok(()) => self.run(),
            Err(e) => Err(e),
        };
        let restored = self.frontend.restore();

        result?;
        restored
    }
}

/// Keeps only the latest turn that isn't a reversal of `current`; earlier ones are overwritten.
fn collapse_input(current: Direction, events: &[InputEvent]) -> TickInput {
    let mut turn = None;

    for event in events {
        match event {
            InputEvent::Quit => return TickInput::Quit,
            InputEvent::KeyDown(key) => match key_direction(*key) {
                Some(dir) if !current.is_opposite(dir) => turn = Some(dir),
                _ => {}
            },
        }
    }

    TickInput::Steer(turn)
}

fn key_direction(key: Key) -> Option<Direction> {
    match key {
        Key::Up => Some(Up),
        Key::Down => Some(Down),
        Key::Left => Some(Left),
        Key::Right => Some(Right),
        _ => None,
    }
}
