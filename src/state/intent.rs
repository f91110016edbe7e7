//! User intents forwarded by the presentation layer

use super::{player::PlayerId, preset::Preset};

/// Every mutation a user can request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Start a new game from the setup form
    Start(Preset),
    AdvanceTurn,
    /// Flip the global running flag
    TogglePause,
    /// End the game and return to setup
    Reset,
    AdjustTime(i64),
    RemovePlayer(PlayerId),
    TogglePlayerPause(PlayerId),
    ColorChanged { player_id: PlayerId, color: String },
}

impl Intent {
    /// Short name used for logging and last-action tracking
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start(_) => "start",
            Self::AdvanceTurn => "next",
            Self::TogglePause => "pause",
            Self::Reset => "reset",
            Self::AdjustTime(_) => "adjust",
            Self::RemovePlayer(_) => "remove-player",
            Self::TogglePlayerPause(_) => "pause-player",
            Self::ColorChanged { .. } => "color",
        }
    }
}
