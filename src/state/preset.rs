//! Setup preset: the flat, persisted form of settings plus roster
//!
//! Presets arrive from two untrusted places (the preset file and start
//! requests), so they are read field by field from a `serde_json::Value`:
//! missing fields take their defaults, out-of-range or non-numeric numbers
//! are clamped, and flags accept either booleans or `"true"`/`"false"`.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{
    player::{default_player_name, Player, RosterEntry},
    settings::{
        Settings, TimeMode, MAX_PLAYERS, MAX_STARTING_MINUTES, MAX_STARTING_SECONDS,
        MAX_TURN_INCREMENT, MIN_PLAYERS,
    },
};
use crate::utils::{normalize_color, palette_color};

/// Serializable setup form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub player_count: usize,
    pub starting_minutes: u64,
    pub starting_seconds: u64,
    pub time_mode: TimeMode,
    pub turn_increment: u64,
    pub auto_start: bool,
    pub individual_pause: bool,
    pub low_time_alert: bool,
    pub color_tagging: bool,
    pub player_names: Vec<String>,
    pub player_colors: Vec<String>,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            player_count: 4,
            starting_minutes: 20,
            starting_seconds: 0,
            time_mode: TimeMode::Total,
            turn_increment: 0,
            auto_start: true,
            individual_pause: false,
            low_time_alert: true,
            color_tagging: false,
            player_names: Vec::new(),
            player_colors: Vec::new(),
        }
    }
}

impl Preset {
    /// Read a preset out of arbitrary JSON.
    ///
    /// Returns `None` only when `value` is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        let defaults = Self::default();

        Some(Self {
            player_count: coerce_number(
                fields.get("playerCount"),
                defaults.player_count as u64,
                MIN_PLAYERS as u64,
                MAX_PLAYERS as u64,
            ) as usize,
            starting_minutes: coerce_number(
                fields.get("startingMinutes"),
                defaults.starting_minutes,
                0,
                MAX_STARTING_MINUTES,
            ),
            starting_seconds: coerce_number(
                fields.get("startingSeconds"),
                defaults.starting_seconds,
                0,
                MAX_STARTING_SECONDS,
            ),
            time_mode: fields
                .get("timeMode")
                .and_then(Value::as_str)
                .map(TimeMode::from_name)
                .unwrap_or(defaults.time_mode),
            turn_increment: coerce_number(
                fields.get("turnIncrement"),
                defaults.turn_increment,
                0,
                MAX_TURN_INCREMENT,
            ),
            auto_start: coerce_bool(fields, "autoStart", defaults.auto_start),
            individual_pause: coerce_bool(fields, "individualPause", defaults.individual_pause),
            low_time_alert: coerce_bool(fields, "lowTimeAlert", defaults.low_time_alert),
            color_tagging: coerce_bool(fields, "colorTagging", defaults.color_tagging),
            player_names: string_list(fields.get("playerNames"))
                .into_iter()
                .map(|name| name.trim().to_string())
                .collect(),
            player_colors: string_list(fields.get("playerColors"))
                .iter()
                .map(|color| normalize_color(color))
                .collect(),
        })
    }

    /// The game rules this preset describes.
    ///
    /// A zero-length clock is raised to one second.
    pub fn settings(&self) -> Settings {
        Settings {
            starting_seconds: (self.starting_minutes * 60 + self.starting_seconds).max(1),
            time_mode: self.time_mode,
            turn_increment: self.turn_increment,
            auto_start: self.auto_start,
            individual_pause: self.individual_pause,
            low_time_alert: self.low_time_alert,
            color_tagging: self.color_tagging,
        }
    }

    /// One roster entry per configured seat, filling gaps with defaults
    pub fn roster(&self) -> Vec<RosterEntry> {
        let count = self.player_count.clamp(MIN_PLAYERS, MAX_PLAYERS);

        (0..count)
            .map(|index| {
                let name = self
                    .player_names
                    .get(index)
                    .map(|name| name.trim())
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| default_player_name(index));

                let color = self.color_tagging.then(|| {
                    self.player_colors
                        .get(index)
                        .map(|color| normalize_color(color))
                        .unwrap_or_else(|| palette_color(index))
                });

                RosterEntry { name, color }
            })
            .collect()
    }

    /// Record the names and colors a game actually started with
    pub fn with_players(mut self, players: &[Player]) -> Self {
        self.player_names = players.iter().map(|player| player.name.clone()).collect();
        self.player_colors = players
            .iter()
            .filter_map(|player| player.color.clone())
            .collect();
        self
    }
}

impl<'de> Deserialize<'de> for Preset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).ok_or_else(|| de::Error::custom("preset must be a JSON object"))
    }
}

/// Missing or null yields `default`; non-numeric input yields `min`
fn coerce_number(value: Option<&Value>, default: u64, min: u64, max: u64) -> u64 {
    let parsed = match value {
        None | Some(Value::Null) => return default,
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(number) if number.is_finite() => number.clamp(min as f64, max as f64) as u64,
        _ => min,
    }
}

fn coerce_bool(fields: &Map<String, Value>, key: &str, default: bool) -> bool {
    match fields.get(key) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => match text.trim() {
            "true" => true,
            "false" => false,
            _ => default,
        },
        _ => default,
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(text) => text.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}
