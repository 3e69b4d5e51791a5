use std::io::{Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll, read};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use log::debug;

use crate::error::GameError;
use crate::frontend::{Canvas, Color, EventSource, InputEvent, Key, Screen};
use crate::geometry::{Board, Position};

/// Terminal frontend: one character cell per board cell, drawn inside a border.
pub struct TermManager {
    stdout: Stdout,
    cell_size: i32,
    screen: ScreenBuffer,
    // What is currently on the terminal, so `present` only redraws changed cells
    shown: Option<ScreenBuffer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ScreenBuffer {
    columns: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl TermManager {
    pub fn new(board: &Board) -> Result<Self, GameError> {
        let (width, height) = terminal::size()?;
        let needed = (board.columns() + 2, board.rows() + 2);

        if needed.0 > width as i32 || needed.1 > height as i32 {
            let clamp = |v: i32| u16::try_from(v).unwrap_or(u16::MAX);
            return Err(GameError::TerminalTooSmall {
                needed: (clamp(needed.0), clamp(needed.1)),
                actual: (width, height),
            });
        }

        // Both fit in the terminal's u16 size after the check above
        let screen = ScreenBuffer::new(board.columns() as u16, board.rows() as u16);
        Ok(TermManager { stdout: stdout(), cell_size: board.cell_size(), screen, shown: None })
    }

    fn draw_borders(&mut self) -> Result<(), GameError> {
        let end_x = self.screen.columns + 1;
        let end_y = self.screen.rows + 1;

        for x in 0..=end_x {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            queue!(self.stdout, cursor::MoveTo(x, 0), style::Print(ch))?;
            queue!(self.stdout, cursor::MoveTo(x, end_y), style::Print(ch))?;
        }

        for y in 1..end_y {
            queue!(self.stdout, cursor::MoveTo(0, y), style::Print('|'))?;
            queue!(self.stdout, cursor::MoveTo(end_x, y), style::Print('|'))?;
        }

        self.stdout.flush()?;
        Ok(())
    }

    fn to_cell(&self, pos: Position) -> Option<(u16, u16)> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let col = u16::try_from(pos.x / self.cell_size).ok()?;
        let row = u16::try_from(pos.y / self.cell_size).ok()?;
        Some((col, row))
    }
}

impl Screen for TermManager {
    fn setup(&mut self) -> Result<(), GameError> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        self.draw_borders()?;
        Ok(())
    }

    fn restore(&mut self) -> Result<(), GameError> {
        // Leave the alternate screen even if raw mode was never entered
        let raw_mode = terminal::disable_raw_mode();
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        raw_mode?;
        Ok(())
    }
}

impl Canvas for TermManager {
    fn clear(&mut self, color: Color) {
        self.screen.fill(color);
    }

    fn draw_rect(&mut self, pos: Position, size: i32, color: Color) {
        let cells = (size / self.cell_size).max(1);
        if let Some((col, row)) = self.to_cell(pos) {
            for dy in 0..cells {
                for dx in 0..cells {
                    self.screen.paint(col as i32 + dx, row as i32 + dy, color);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, pos: Position, color: Color) {
        if let Some((col, row)) = self.to_cell(pos) {
            self.screen.write(col, row, text, color);
        }
    }

    fn present(&mut self) -> Result<(), GameError> {
        for (col, row, cell) in self.screen.changes_since(self.shown.as_ref()) {
            queue!(
                self.stdout,
                cursor::MoveTo(col + 1, row + 1),
                style::SetForegroundColor(term_color(cell.fg)),
                style::SetBackgroundColor(term_color(cell.bg)),
                style::Print(cell.ch)
            )?;
        }

        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush()?;
        self.shown = Some(self.screen.clone());
        Ok(())
    }
}

impl EventSource for TermManager {
    fn drain_events(&mut self) -> Result<Vec<InputEvent>, GameError> {
        let mut events = vec![];

        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                events.extend(map_key_event(&ev));
            }
        }

        Ok(events)
    }

    fn wait_event(&mut self) -> Result<InputEvent, GameError> {
        loop {
            if let Event::Key(ev) = read()? {
                if let Some(event) = map_key_event(&ev) {
                    return Ok(event);
                }
                debug!("Ignoring key {:?}", ev.code);
            }
        }
    }
}

impl ScreenBuffer {
    fn new(columns: u16, rows: u16) -> Self {
        let blank = Cell { ch: ' ', fg: Color::Black, bg: Color::White };
        ScreenBuffer { columns, rows, cells: vec![blank; columns as usize * rows as usize] }
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.columns as i32 || row >= self.rows as i32 {
            return None;
        }
        Some(self.columns as usize * row as usize + col as usize)
    }

    fn fill(&mut self, color: Color) {
        for cell in self.cells.iter_mut() {
            *cell = Cell { ch: ' ', fg: Color::Black, bg: color };
        }
    }

    fn paint(&mut self, col: i32, row: i32, color: Color) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = Cell { ch: ' ', fg: color, bg: color };
        }
    }

    /// Text keeps the background of whatever it is written over and is clipped at the edge.
    fn write(&mut self, col: u16, row: u16, text: &str, color: Color) {
        for (offset, ch) in text.chars().enumerate() {
            match self.index(col as i32 + offset as i32, row as i32) {
                Some(i) => {
                    let bg = self.cells[i].bg;
                    self.cells[i] = Cell { ch, fg: color, bg };
                }
                None => break,
            }
        }
    }

    fn changes_since<'a>(&'a self, shown: Option<&'a ScreenBuffer>) -> impl Iterator<Item = (u16, u16, Cell)> + 'a {
        let columns = self.columns as usize;
        self.cells.iter().enumerate()
            .filter(move |(i, cell)| shown.map_or(true, |old| old.cells.get(*i) != Some(*cell)))
            .map(move |(i, cell)| ((i % columns) as u16, (i / columns) as u16, *cell))
    }

    #[cfg(test)]
    fn row_text(&self, row: u16) -> String {
        let start = self.columns as usize * row as usize;
        self.cells[start..start + self.columns as usize].iter().map(|c| c.ch).collect()
    }
}

fn term_color(color: Color) -> style::Color {
    match color {
        Color::White => style::Color::White,
        Color::Black => style::Color::Black,
        Color::Green => style::Color::Green,
        Color::Red => style::Color::Red,
        Color::Gray => style::Color::DarkGrey,
    }
}

fn map_key_event(ev: &KeyEvent) -> Option<InputEvent> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }
    if is_ctrl_c(ev) {
        return Some(InputEvent::Quit);
    }

    let key = match ev.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'e' => Key::E,
            'm' => Key::M,
            'h' => Key::H,
            'c' => Key::C,
            'q' => Key::Q,
            _ => return None,
        },
        _ => return None,
    };

    Some(InputEvent::KeyDown(key))
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.modifiers.contains(KeyModifiers::CONTROL) && matches!(ev.code, KeyCode::Char('c') | KeyCode::Char('C'))
}
