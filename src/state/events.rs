//! Events emitted by the timer for background listeners

use super::player::PlayerId;

/// Timer events broadcast to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// The active player's clock ticked inside the low-time band
    LowTime {
        player_id: PlayerId,
        remaining_seconds: u64,
    },
    /// The active player's clock reached zero
    OutOfTime { player_id: PlayerId, name: String },
}
