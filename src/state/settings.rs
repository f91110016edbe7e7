//! Game settings and configuration bounds

use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: usize = 1;
pub const MAX_PLAYERS: usize = 12;
pub const MAX_STARTING_MINUTES: u64 = 300;
pub const MAX_STARTING_SECONDS: u64 = 59;
pub const MAX_TURN_INCREMENT: u64 = 300;

/// A clock at or below this many seconds counts as low on time
pub const LOW_TIME_THRESHOLD: u64 = 15;

/// How a player's clock is accounted across turns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeMode {
    /// One clock per player for the whole game
    #[default]
    Total,
    /// The clock resets to the starting value at the start of each turn
    PerTurn,
}

impl TimeMode {
    /// Parse a mode name, treating anything unrecognized as `Total`
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "perTurn" | "per_turn" | "per-turn" | "PerTurn" => Self::PerTurn,
            _ => Self::Total,
        }
    }
}

/// Snapshot of the rules a game was started with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub starting_seconds: u64,
    pub time_mode: TimeMode,
    pub turn_increment: u64,
    pub auto_start: bool,
    pub individual_pause: bool,
    pub low_time_alert: bool,
    pub color_tagging: bool,
}

impl Settings {
    /// Whether `remaining_seconds` should be flagged as low on time
    pub fn is_low_time(&self, remaining_seconds: u64) -> bool {
        self.low_time_alert && remaining_seconds <= LOW_TIME_THRESHOLD
    }

    /// Whether a tick landing on `remaining_seconds` should sound the alert
    pub fn should_alert(&self, remaining_seconds: u64) -> bool {
        self.low_time_alert && remaining_seconds > 0 && remaining_seconds <= LOW_TIME_THRESHOLD
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_seconds: 20 * 60,
            time_mode: TimeMode::Total,
            turn_increment: 0,
            auto_start: true,
            individual_pause: false,
            low_time_alert: true,
            color_tagging: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_mode_names() {
        assert_eq!(TimeMode::from_name("perTurn"), TimeMode::PerTurn);
        assert_eq!(TimeMode::from_name("total"), TimeMode::Total);
        assert_eq!(TimeMode::from_name("sideways"), TimeMode::Total);
    }

    #[test]
    fn low_time_band() {
        let settings = Settings::default();
        assert!(settings.is_low_time(15));
        assert!(settings.is_low_time(0));
        assert!(!settings.is_low_time(16));

        assert!(settings.should_alert(15));
        assert!(settings.should_alert(1));
        assert!(!settings.should_alert(0));
        assert!(!settings.should_alert(16));

        let silent = Settings {
            low_time_alert: false,
            ..Settings::default()
        };
        assert!(!silent.is_low_time(3));
        assert!(!silent.should_alert(3));
    }
}
