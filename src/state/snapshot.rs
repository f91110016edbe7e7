//! Read-only views of the session handed to the presentation layer

use serde::{Deserialize, Serialize};

use super::{
    game_state::GameState,
    player::{Player, PlayerId},
    settings::Settings,
};
use crate::utils::format_clock;

/// Whether a game is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Setup,
    Playing,
}

/// The player whose clock is running
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePlayerView {
    pub id: PlayerId,
    pub name: String,
    pub remaining_seconds: u64,
    pub clock: String,
    pub color: Option<String>,
}

/// One line of the player list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRow {
    pub id: PlayerId,
    pub name: String,
    pub remaining_seconds: u64,
    pub clock: String,
    pub turns_taken: u32,
    pub is_active: bool,
    pub out_of_time: bool,
    pub is_paused: bool,
    pub color: Option<String>,
    /// Individual pause is enabled and the player still has time
    pub can_pause: bool,
    /// Only players who ran out of time are offered for removal
    pub can_remove: bool,
}

/// Full state published after every mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub status: String,
    pub turn: u64,
    pub is_running: bool,
    pub low_time: bool,
    pub active_player: Option<ActivePlayerView>,
    pub players: Vec<PlayerRow>,
    pub settings: Option<Settings>,
}

impl Snapshot {
    /// Snapshot of the configuration screen
    pub fn setup(status: &str) -> Self {
        Self {
            phase: Phase::Setup,
            status: status.to_string(),
            turn: 0,
            is_running: false,
            low_time: false,
            active_player: None,
            players: Vec::new(),
            settings: None,
        }
    }

    pub fn from_game(game: &GameState, status: &str) -> Self {
        let active_player = game.current_player().map(|player| ActivePlayerView {
            id: player.id,
            name: player.name.clone(),
            remaining_seconds: player.remaining_seconds,
            clock: format_clock(player.remaining_seconds),
            color: player.color.clone(),
        });

        let players = game
            .players
            .iter()
            .enumerate()
            .map(|(index, player)| player_row(game, index, player))
            .collect();

        Self {
            phase: Phase::Playing,
            status: status.to_string(),
            turn: game.turn,
            is_running: game.is_running,
            low_time: game.is_low_on_time(),
            active_player,
            players,
            settings: Some(game.settings),
        }
    }
}

fn player_row(game: &GameState, index: usize, player: &Player) -> PlayerRow {
    let out_of_time = player.is_out_of_time();

    PlayerRow {
        id: player.id,
        name: player.name.clone(),
        remaining_seconds: player.remaining_seconds,
        clock: format_clock(player.remaining_seconds),
        turns_taken: player.turns_taken,
        is_active: index == game.current_index,
        out_of_time,
        is_paused: player.is_paused,
        color: player.color.clone(),
        can_pause: game.settings.individual_pause && !out_of_time,
        can_remove: out_of_time,
    }
}
