//! The seams between the game loop and the outside world: drawing, input and frame pacing.

use std::thread::sleep;
use std::time::{Duration, Instant};

use crate::error::GameError;
use crate::geometry::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
    Green,
    Red,
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    E,
    M,
    H,
    C,
    Q,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
}

/// Immediate-mode drawing surface. Positions and sizes are in board units.
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn draw_rect(&mut self, pos: Position, size: i32, color: Color);
    fn draw_text(&mut self, text: &str, pos: Position, color: Color);
    fn present(&mut self) -> Result<(), GameError>;
}

pub trait EventSource {
    /// Everything that arrived since the last call, oldest first. Never blocks.
    fn drain_events(&mut self) -> Result<Vec<InputEvent>, GameError>;

    /// Blocks until the next event.
    fn wait_event(&mut self) -> Result<InputEvent, GameError>;
}

/// A frontend that takes over the screen for the whole run and has to hand it back.
pub trait Screen {
    fn setup(&mut self) -> Result<(), GameError>;

    /// Undoes `setup`. Must be safe to call after a `setup` that failed halfway.
    fn restore(&mut self) -> Result<(), GameError>;
}

pub trait Clock {
    /// Blocks until the next frame boundary at `rate` frames per second.
    fn tick(&mut self, rate: u32);
}

/// Sleeps away whatever is left of the current frame, like a fixed-rate game clock.
#[derive(Debug, Default)]
pub struct FrameClock {
    last_tick: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock { last_tick: None }
    }
}

impl Clock for FrameClock {
    fn tick(&mut self, rate: u32) {
        let frame = Duration::from_secs(1) / rate.max(1);

        if let Some(last) = self.last_tick {
            let elapsed = last.elapsed();
            if elapsed < frame {
                sleep(frame - elapsed);
            }
        }

        self.last_tick = Some(Instant::now());
    }
}
