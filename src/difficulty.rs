use crate::frontend::Key;

/// Tick rate and obstacle count for one game, fixed when the player picks a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::E => Some(Difficulty::Easy),
            Key::M => Some(Difficulty::Medium),
            Key::H => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Snake steps per second.
    pub fn tick_rate(&self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 15,
            Difficulty::Hard => 20,
        }
    }

    pub fn obstacle_count(&self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 7,
            Difficulty::Hard => 12,
        }
    }
}
