//! Game state and turn transitions
//!
//! Every transition here runs to completion on `&mut GameState` without
//! suspending, so callers holding the session lock observe each one atomically.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    player::{Player, PlayerId, RosterEntry},
    settings::{Settings, TimeMode},
};
use crate::utils::normalize_color;

/// State of one running game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Turn order
    pub players: Vec<Player>,
    pub current_index: usize,
    /// 1-based count of turns played
    pub turn: u64,
    pub is_running: bool,
    pub settings: Settings,
}

/// What a single timer tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to decrement
    Idle,
    /// The active player's clock went down by one second
    Ticked {
        player_id: PlayerId,
        remaining_seconds: u64,
        /// The low-time alert should sound
        alert: bool,
    },
    /// The active player's clock hit zero and the game was paused
    OutOfTime { player_id: PlayerId, name: String },
}

/// What removing a player did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    NotFound,
    /// A waiting player left; the active player is unchanged
    Removed,
    /// The active player left and the next player's turn began
    ActiveRemoved,
    /// The last player left; the game is over
    RosterEmptied,
}

impl GameState {
    /// Seat the roster and begin the first player's turn.
    ///
    /// An empty roster still seats one default player.
    pub fn start(roster: &[RosterEntry], settings: Settings) -> Self {
        let mut players: Vec<Player> = roster
            .iter()
            .enumerate()
            .map(|(id, entry)| {
                let color = if settings.color_tagging {
                    entry.color.as_deref().map(normalize_color)
                } else {
                    None
                };
                Player::new(id, &entry.name, settings.starting_seconds, color)
            })
            .collect();

        if players.is_empty() {
            players.push(Player::new(0, "", settings.starting_seconds, None));
        }

        let mut game = Self {
            players,
            current_index: 0,
            turn: 1,
            is_running: settings.auto_start,
            settings,
        };
        game.handle_turn_start();
        game
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_index)
    }

    fn current_player_mut(&mut self) -> Option<&mut Player> {
        self.players.get_mut(self.current_index)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.id == id)
    }

    /// Whether the active player should be shown as low on time
    pub fn is_low_on_time(&self) -> bool {
        self.current_player()
            .is_some_and(|player| self.settings.is_low_time(player.remaining_seconds))
    }

    /// Close the active player's turn and open the next one
    pub fn advance_turn(&mut self) {
        if self.players.is_empty() {
            return;
        }

        self.handle_turn_end();

        self.current_index = (self.current_index + 1) % self.players.len();
        self.turn += 1;

        self.handle_turn_start();
        self.is_running = self.settings.auto_start;

        debug!(turn = self.turn, index = self.current_index, "Advanced turn");
    }

    /// Under `Total`, the increment goes to the player finishing their turn
    fn handle_turn_end(&mut self) {
        let settings = self.settings;
        if let Some(player) = self.current_player_mut() {
            player.turns_taken += 1;
            if settings.time_mode == TimeMode::Total {
                player.remaining_seconds = player.remaining_seconds.saturating_add(settings.turn_increment);
            }
        }
    }

    /// Under `PerTurn` the clock is refilled first; the increment is then
    /// credited to the incoming player in every mode.
    fn handle_turn_start(&mut self) {
        let settings = self.settings;
        if let Some(player) = self.current_player_mut() {
            if settings.time_mode == TimeMode::PerTurn {
                player.remaining_seconds = settings.starting_seconds;
            }
            player.remaining_seconds = player.remaining_seconds.saturating_add(settings.turn_increment);
        }
    }

    /// Add `delta_seconds` to the active player's clock, floored at zero
    pub fn adjust_current_player_time(&mut self, delta_seconds: i64) {
        if let Some(player) = self.current_player_mut() {
            player.adjust_time(delta_seconds);
        }
    }

    /// Flip a player's own pause. Returns the new pause state, or `None`
    /// when individual pause is disabled or the player is unknown.
    pub fn toggle_player_pause(&mut self, id: PlayerId) -> Option<bool> {
        if !self.settings.individual_pause {
            return None;
        }
        let player = self.player_mut(id)?;
        player.is_paused = !player.is_paused;
        Some(player.is_paused)
    }

    /// Change a player's tag color. Returns the stored color, or `None` when
    /// color tagging is disabled or the player is unknown.
    pub fn set_player_color(&mut self, id: PlayerId, color: &str) -> Option<String> {
        if !self.settings.color_tagging {
            return None;
        }
        let player = self.player_mut(id)?;
        let normalized = normalize_color(color);
        player.color = Some(normalized.clone());
        Some(normalized)
    }

    /// Remove a player from the rotation, keeping the active seat stable
    pub fn remove_player(&mut self, id: PlayerId) -> Removal {
        let Some(index) = self.players.iter().position(|player| player.id == id) else {
            return Removal::NotFound;
        };

        let removing_current = index == self.current_index;
        self.players.remove(index);

        if self.players.is_empty() {
            self.current_index = 0;
            self.is_running = false;
            return Removal::RosterEmptied;
        }

        if index < self.current_index {
            self.current_index -= 1;
        }

        if !removing_current {
            return Removal::Removed;
        }

        if self.current_index >= self.players.len() {
            self.current_index = 0;
        }
        self.handle_turn_start();
        self.is_running = self.settings.auto_start;
        Removal::ActiveRemoved
    }

    /// Run one second of the clock
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running {
            return TickOutcome::Idle;
        }

        let settings = self.settings;
        let Some(player) = self.current_player_mut() else {
            return TickOutcome::Idle;
        };

        if settings.individual_pause && player.is_paused {
            return TickOutcome::Idle;
        }

        player.remaining_seconds = player.remaining_seconds.saturating_sub(1);
        let remaining_seconds = player.remaining_seconds;
        let player_id = player.id;

        if remaining_seconds == 0 {
            let name = player.name.clone();
            self.is_running = false;
            return TickOutcome::OutOfTime { player_id, name };
        }

        TickOutcome::Ticked {
            player_id,
            remaining_seconds,
            alert: settings.should_alert(remaining_seconds),
        }
    }
}
