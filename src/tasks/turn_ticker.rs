//! One-second tick driving the active player's clock

use std::{sync::Weak, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, trace};

use crate::state::{AppState, TickOutcome};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Handle to a running tick task; the task stops when the handle is
/// cancelled or dropped.
#[derive(Debug)]
pub struct TickerHandle {
    handle: JoinHandle<()>,
}

impl TickerHandle {
    pub fn cancel(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn the tick task. The first tick lands one period from now.
///
/// The task holds only a weak reference and exits once the state is gone.
pub fn spawn_ticker(state: Weak<AppState>) -> TickerHandle {
    let handle = tokio::spawn(async move {
        debug!("Starting turn ticker");

        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let Some(state) = state.upgrade() else {
                debug!("Application state dropped, stopping turn ticker");
                break;
            };

            match state.tick() {
                Ok(TickOutcome::Idle) => {}
                Ok(outcome) => trace!("Tick: {:?}", outcome),
                Err(e) => error!("Failed to tick: {}", e),
            }
        }
    });

    TickerHandle { handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::services::MemoryPresetStore;

    #[tokio::test(start_paused = true)]
    async fn stops_when_state_is_dropped() {
        let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), Arc::new(MemoryPresetStore::new())));
        let ticker = spawn_ticker(Arc::downgrade(&state));
        drop(state);

        tokio::time::advance(TICK_PERIOD).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(ticker.is_finished());
    }
}
