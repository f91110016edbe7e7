//! State management module
//! 
//! This module contains the game model, the turn rules that mutate it, and the
//! application state that owns the running session.

pub mod app_state;
pub mod events;
pub mod game_state;
pub mod intent;
pub mod player;
pub mod preset;
pub mod settings;
pub mod snapshot;

// Re-export main types
pub use app_state::AppState;
pub use events::TimerEvent;
pub use game_state::{GameState, Removal, TickOutcome};
pub use intent::Intent;
pub use player::{Player, PlayerId, RosterEntry};
pub use preset::Preset;
pub use settings::{Settings, TimeMode, LOW_TIME_THRESHOLD};
pub use snapshot::{ActivePlayerView, Phase, PlayerRow, Snapshot};
