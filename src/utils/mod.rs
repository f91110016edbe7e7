//! Utility functions module
//! 
//! This module contains utility functions used throughout the application.

pub mod color;
pub mod signals;
pub mod time;

// Re-export main functions
pub use color::{normalize_color, palette_color, FALLBACK_COLOR};
pub use signals::shutdown_signal;
pub use time::format_clock;
