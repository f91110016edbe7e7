//! External collaborators
//! 
//! This module contains the preset store and the alert output the timer
//! reads from and writes to.

pub mod alert;
pub mod preset_store;

// Re-export main types
pub use alert::{AlertSink, SilentAlert, TerminalBell};
pub use preset_store::{JsonFilePresetStore, MemoryPresetStore, PresetStore};
