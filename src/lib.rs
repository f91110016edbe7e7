//! Turn Timer - A state-managed HTTP server for board game turn timers
//! 
//! This library tracks per-player countdown clocks, turn order, pause/resume
//! and low-time alerts, and remembers the setup between sessions.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::{AppState, GameState, Intent, Preset, Snapshot};
pub use utils::signals::shutdown_signal;
