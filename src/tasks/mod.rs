//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod low_time_alert;
pub mod turn_ticker;

// Re-export main functions
pub use low_time_alert::low_time_alert_task;
pub use turn_ticker::{spawn_ticker, TickerHandle, TICK_PERIOD};
