//! Low-time alert background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::{
    services::AlertSink,
    state::{AppState, TimerEvent},
};

/// Background task that sounds the alert for every low-time event
pub async fn low_time_alert_task(state: Arc<AppState>, sink: Arc<dyn AlertSink>) {
    info!("Starting low-time alert task");

    let mut events = state.subscribe_events();
    drop(state);

    loop {
        match events.recv().await {
            Ok(TimerEvent::LowTime { player_id, remaining_seconds }) => {
                debug!("Low time for player {}: {}s left", player_id, remaining_seconds);
                // Alert failures never reach the timer.
                if let Err(e) = sink.play() {
                    debug!("Failed to play alert: {}", e);
                }
            }
            Ok(TimerEvent::OutOfTime { name, .. }) => {
                debug!("Alert task saw {} run out of time", name);
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Alert task lagged, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => {
                debug!("Timer event channel closed, stopping alert task");
                break;
            }
        }
    }
}
