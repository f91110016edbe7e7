//! Player structure and roster entries

use serde::{Deserialize, Serialize};

/// Stable identifier of a player within one game
pub type PlayerId = usize;

/// A name/color pair collected from the setup form before a game starts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub color: Option<String>,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// A seated player and their clock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat index at roster creation, never reused after removal
    pub id: PlayerId,
    pub name: String,
    pub remaining_seconds: u64,
    pub turns_taken: u32,
    /// Only consulted when individual pause is enabled
    pub is_paused: bool,
    pub color: Option<String>,
}

impl Player {
    /// Create a player with a full clock.
    ///
    /// Blank names fall back to `Player {id + 1}`.
    pub fn new(id: PlayerId, name: &str, starting_seconds: u64, color: Option<String>) -> Self {
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            default_player_name(id)
        } else {
            trimmed.to_string()
        };

        Self {
            id,
            name,
            remaining_seconds: starting_seconds,
            turns_taken: 0,
            is_paused: false,
            color,
        }
    }

    /// Whether the clock has run out
    pub fn is_out_of_time(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Add (or subtract) seconds, flooring the clock at zero
    pub fn adjust_time(&mut self, delta_seconds: i64) {
        let magnitude = delta_seconds.unsigned_abs();
        self.remaining_seconds = if delta_seconds < 0 {
            self.remaining_seconds.saturating_sub(magnitude)
        } else {
            self.remaining_seconds.saturating_add(magnitude)
        };
    }
}

/// Display name for the seat at `index`
pub fn default_player_name(index: usize) -> String {
    format!("Player {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_falls_back_to_seat_number() {
        let player = Player::new(2, "   ", 60, None);
        assert_eq!(player.name, "Player 3");
    }

    #[test]
    fn name_is_trimmed() {
        let player = Player::new(0, "  Alice ", 60, None);
        assert_eq!(player.name, "Alice");
    }

    #[test]
    fn adjust_time_floors_at_zero() {
        let mut player = Player::new(0, "A", 5, None);
        player.adjust_time(-1000);
        assert_eq!(player.remaining_seconds, 0);
        assert!(player.is_out_of_time());

        player.adjust_time(30);
        assert_eq!(player.remaining_seconds, 30);
    }
}
