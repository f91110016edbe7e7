//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{
    game_state::{GameState, Removal, TickOutcome},
    Intent, Preset, Snapshot, TimerEvent,
};
use crate::{
    services::PresetStore,
    tasks::{spawn_ticker, TickerHandle},
};

const STATUS_NOT_STARTED: &str = "Not started";
const STATUS_RUNNING: &str = "Timer running";
const STATUS_PAUSED: &str = "Paused";

/// The single game (if any) plus the status line shown with it
#[derive(Debug)]
struct Session {
    game: Option<GameState>,
    status: String,
}

impl Session {
    fn new() -> Self {
        Self {
            game: None,
            status: STATUS_NOT_STARTED.to_string(),
        }
    }

    fn snapshot(&self) -> Snapshot {
        match &self.game {
            Some(game) => Snapshot::from_game(game, &self.status),
            None => Snapshot::setup(&self.status),
        }
    }

    fn reset(&mut self) {
        self.game = None;
        self.status = STATUS_NOT_STARTED.to_string();
    }

    fn announce_turn(&mut self) {
        if let Some(player) = self.game.as_ref().and_then(GameState::current_player) {
            self.status = format!("It's {}'s turn.", player.name);
        }
    }

    /// Apply a non-start intent to the running game
    fn apply(&mut self, intent: Intent) {
        let Some(game) = self.game.as_mut() else {
            debug!("Ignoring {} without a game", intent.name());
            return;
        };

        match intent {
            Intent::Start(_) | Intent::Reset => {}
            Intent::AdvanceTurn => {
                if game.players.is_empty() {
                    return;
                }
                game.advance_turn();
                self.announce_turn();
            }
            Intent::TogglePause => {
                game.is_running = !game.is_running;
                self.status = if game.is_running { STATUS_RUNNING } else { STATUS_PAUSED }.to_string();
            }
            Intent::AdjustTime(delta) => game.adjust_current_player_time(delta),
            Intent::RemovePlayer(player_id) => match game.remove_player(player_id) {
                Removal::RosterEmptied => {
                    info!("Last player removed, ending game");
                    self.reset();
                }
                Removal::ActiveRemoved => self.announce_turn(),
                Removal::Removed => {}
                Removal::NotFound => debug!("No player with id {}", player_id),
            },
            Intent::TogglePlayerPause(player_id) => {
                if game.toggle_player_pause(player_id).is_none() {
                    debug!("Individual pause unavailable for player {}", player_id);
                }
            }
            Intent::ColorChanged { player_id, color } => {
                if game.set_player_color(player_id, &color).is_none() {
                    debug!("Color tagging unavailable for player {}", player_id);
                }
            }
        }
    }
}

/// Owns the session, the tick source, and the channels presentation listens on
pub struct AppState {
    session: Arc<Mutex<Session>>,
    preset_store: Arc<dyn PresetStore>,
    /// At most one tick task at a time
    ticker: Mutex<Option<TickerHandle>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Low-time and out-of-time notifications
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Latest snapshot, replaced after every mutation
    pub snapshot_tx: watch::Sender<Snapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<Snapshot>,
}

impl AppState {
    /// Create an AppState in configuration mode
    pub fn new(port: u16, host: String, preset_store: Arc<dyn PresetStore>) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::setup(STATUS_NOT_STARTED));

        Self {
            session: Arc::new(Mutex::new(Session::new())),
            preset_store,
            ticker: Mutex::new(None),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            event_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Apply a user intent and publish the resulting snapshot
    pub fn dispatch(self: &Arc<Self>, intent: Intent) -> Result<Snapshot, String> {
        let action = intent.name();
        info!("Dispatching intent: {}", action);

        let snapshot = match intent {
            Intent::Start(preset) => self.start_game(preset)?,
            Intent::Reset => self.update_session(|session| session.reset())?,
            other => self.update_session(|session| session.apply(other))?,
        };

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(snapshot)
    }

    /// Cancel the previous tick source, then build a new game from the setup
    /// form and remember the form.
    fn start_game(self: &Arc<Self>, preset: Preset) -> Result<Snapshot, String> {
        let settings = preset.settings();
        let roster = preset.roster();

        self.restart_ticker()?;

        let mut started_players = Vec::new();
        let snapshot = self.update_session(|session| {
            let game = GameState::start(&roster, settings);
            started_players = game.players.clone();
            session.game = Some(game);
            session.announce_turn();
        })?;

        info!(
            "Game started with {} players, {}s clocks, {:?} mode",
            started_players.len(),
            settings.starting_seconds,
            settings.time_mode
        );

        if let Err(e) = self.preset_store.save(&preset.with_players(&started_players)) {
            warn!("Failed to save preset: {}", e);
        }

        Ok(snapshot)
    }

    /// Lock the session, apply `updater`, and publish the new snapshot
    fn update_session<F>(&self, updater: F) -> Result<Snapshot, String>
    where
        F: FnOnce(&mut Session),
    {
        let mut session = self.session.lock()
            .map_err(|e| format!("Failed to lock session: {}", e))?;

        updater(&mut *session);
        let snapshot = session.snapshot();
        drop(session);

        self.publish(snapshot.clone());
        Ok(snapshot)
    }

    fn publish(&self, snapshot: Snapshot) {
        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to publish snapshot: {}", e);
        }
    }

    fn emit(&self, event: TimerEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("No timer event subscribers");
        }
    }

    /// Run one second of the active player's clock
    pub fn tick(&self) -> Result<TickOutcome, String> {
        let mut session = self.session.lock()
            .map_err(|e| format!("Failed to lock session: {}", e))?;

        let Some(game) = session.game.as_mut() else {
            return Ok(TickOutcome::Idle);
        };

        let outcome = game.tick();
        if outcome == TickOutcome::Idle {
            return Ok(outcome);
        }

        match &outcome {
            TickOutcome::Idle => {}
            TickOutcome::Ticked { player_id, remaining_seconds, alert } => {
                if *alert {
                    self.emit(TimerEvent::LowTime {
                        player_id: *player_id,
                        remaining_seconds: *remaining_seconds,
                    });
                }
            }
            TickOutcome::OutOfTime { player_id, name } => {
                info!("{} is out of time", name);
                session.status = format!("{} is out of time.", name);
                self.emit(TimerEvent::OutOfTime {
                    player_id: *player_id,
                    name: name.clone(),
                });
            }
        }

        let snapshot = session.snapshot();
        drop(session);
        self.publish(snapshot);
        Ok(outcome)
    }

    /// Cancel the current tick task (if any) and spawn a fresh one
    pub fn restart_ticker(self: &Arc<Self>) -> Result<(), String> {
        let mut ticker = self.ticker.lock()
            .map_err(|e| format!("Failed to lock ticker: {}", e))?;

        if let Some(previous) = ticker.take() {
            debug!("Cancelling previous tick task");
            previous.cancel();
        }
        *ticker = Some(spawn_ticker(Arc::downgrade(self)));
        Ok(())
    }

    /// Get the current snapshot
    pub fn get_snapshot(&self) -> Result<Snapshot, String> {
        self.session.lock()
            .map(|session| session.snapshot())
            .map_err(|e| format!("Failed to lock session: {}", e))
    }

    /// Stored preset for the setup form, or defaults
    pub fn load_preset(&self) -> Preset {
        self.preset_store.load().unwrap_or_default()
    }

    /// Subscribe to snapshot updates
    pub fn subscribe_snapshots(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Subscribe to timer events
    pub fn subscribe_events(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::{
        services::MemoryPresetStore,
        state::{Phase, TimeMode},
    };

    fn new_state() -> (Arc<AppState>, Arc<MemoryPresetStore>) {
        let store = Arc::new(MemoryPresetStore::new());
        let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), store.clone()));
        (state, store)
    }

    fn two_players(starting_seconds: u64, time_mode: TimeMode) -> Preset {
        Preset {
            player_count: 2,
            starting_minutes: starting_seconds / 60,
            starting_seconds: starting_seconds % 60,
            time_mode,
            player_names: vec!["A".to_string(), "B".to_string()],
            ..Preset::default()
        }
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    async fn advance_seconds(seconds: u64) {
        for _ in 0..seconds {
            tokio::time::advance(Duration::from_secs(1)).await;
            settle().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ten_ticks_run_first_player_out_of_time() {
        let (state, _) = new_state();
        let snapshot = state.dispatch(Intent::Start(two_players(10, TimeMode::Total))).unwrap();
        assert_eq!(snapshot.status, "It's A's turn.");
        assert!(snapshot.is_running);

        advance_seconds(10).await;

        let snapshot = state.get_snapshot().unwrap();
        assert_eq!(snapshot.players[0].remaining_seconds, 0);
        assert!(snapshot.players[0].out_of_time);
        assert!(!snapshot.is_running);
        assert_eq!(snapshot.status, "A is out of time.");
        assert_eq!(snapshot.players[1].remaining_seconds, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_keeps_a_single_tick_source() {
        let (state, _) = new_state();
        state.restart_ticker().unwrap();
        state.dispatch(Intent::Start(two_players(60, TimeMode::Total))).unwrap();
        state.dispatch(Intent::Start(two_players(60, TimeMode::Total))).unwrap();
        state.restart_ticker().unwrap();

        advance_seconds(3).await;

        let snapshot = state.get_snapshot().unwrap();
        assert_eq!(snapshot.players[0].remaining_seconds, 57);
    }

    #[tokio::test(start_paused = true)]
    async fn start_replaces_tick_source_before_first_tick() {
        let (state, _) = new_state();
        state.restart_ticker().unwrap();

        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        state.dispatch(Intent::Start(two_players(60, TimeMode::Total))).unwrap();

        // The old source would have fired one second after it was started.
        tokio::time::advance(Duration::from_millis(600)).await;
        settle().await;
        assert_eq!(state.get_snapshot().unwrap().players[0].remaining_seconds, 60);

        tokio::time::advance(Duration::from_millis(400)).await;
        settle().await;
        assert_eq!(state.get_snapshot().unwrap().players[0].remaining_seconds, 59);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_stops_the_clock() {
        let (state, _) = new_state();
        state.dispatch(Intent::Start(two_players(60, TimeMode::Total))).unwrap();
        advance_seconds(2).await;

        let snapshot = state.dispatch(Intent::TogglePause).unwrap();
        assert!(!snapshot.is_running);
        assert_eq!(snapshot.status, "Paused");

        advance_seconds(5).await;
        assert_eq!(state.get_snapshot().unwrap().players[0].remaining_seconds, 58);

        let snapshot = state.dispatch(Intent::TogglePause).unwrap();
        assert_eq!(snapshot.status, "Timer running");
    }

    #[tokio::test(start_paused = true)]
    async fn reset_returns_to_setup_and_ticks_do_nothing() {
        let (state, _) = new_state();
        state.dispatch(Intent::Start(two_players(60, TimeMode::Total))).unwrap();

        let snapshot = state.dispatch(Intent::Reset).unwrap();
        assert_eq!(snapshot.phase, Phase::Setup);
        assert_eq!(snapshot.status, "Not started");

        advance_seconds(2).await;
        assert_eq!(state.get_snapshot().unwrap().phase, Phase::Setup);
        assert_eq!(state.tick().unwrap(), TickOutcome::Idle);
    }

    #[tokio::test]
    async fn start_saves_resolved_preset() {
        let (state, store) = new_state();
        let preset = Preset {
            player_count: 3,
            player_names: vec!["Ann".to_string()],
            ..Preset::default()
        };
        state.dispatch(Intent::Start(preset)).unwrap();

        let saved = store.load().unwrap();
        assert_eq!(saved.player_names, vec!["Ann", "Player 2", "Player 3"]);
        assert_eq!(state.load_preset(), saved);
    }

    #[tokio::test]
    async fn per_turn_next_refills_incoming_player() {
        let (state, _) = new_state();
        state.dispatch(Intent::Start(two_players(20, TimeMode::PerTurn))).unwrap();

        let snapshot = state.dispatch(Intent::AdvanceTurn).unwrap();
        assert_eq!(snapshot.status, "It's B's turn.");
        assert_eq!(snapshot.turn, 2);
        assert_eq!(snapshot.active_player.unwrap().remaining_seconds, 20);
    }

    #[tokio::test]
    async fn removing_last_player_ends_game() {
        let (state, _) = new_state();
        let preset = Preset {
            player_count: 1,
            ..Preset::default()
        };
        state.dispatch(Intent::Start(preset)).unwrap();

        let snapshot = state.dispatch(Intent::RemovePlayer(0)).unwrap();
        assert_eq!(snapshot.phase, Phase::Setup);
        assert_eq!(state.tick().unwrap(), TickOutcome::Idle);
    }

    #[tokio::test]
    async fn removing_active_player_announces_next_turn() {
        let (state, _) = new_state();
        state.dispatch(Intent::Start(two_players(60, TimeMode::Total))).unwrap();

        let snapshot = state.dispatch(Intent::RemovePlayer(0)).unwrap();
        assert_eq!(snapshot.status, "It's B's turn.");
        assert_eq!(snapshot.players.len(), 1);
    }

    #[tokio::test]
    async fn ticks_in_low_band_emit_alerts() {
        let (state, _) = new_state();
        let mut events = state.subscribe_events();
        state.dispatch(Intent::Start(two_players(16, TimeMode::Total))).unwrap();

        state.tick().unwrap();
        state.tick().unwrap();
        assert_eq!(
            events.try_recv().unwrap(),
            TimerEvent::LowTime { player_id: 0, remaining_seconds: 15 }
        );
        assert_eq!(
            events.try_recv().unwrap(),
            TimerEvent::LowTime { player_id: 0, remaining_seconds: 14 }
        );
    }

    #[tokio::test]
    async fn intents_without_game_are_noops() {
        let (state, _) = new_state();
        for intent in [Intent::AdvanceTurn, Intent::TogglePause, Intent::AdjustTime(-5)] {
            let snapshot = state.dispatch(intent).unwrap();
            assert_eq!(snapshot.phase, Phase::Setup);
        }
        assert_eq!(state.get_last_action().0.as_deref(), Some("adjust"));
    }

    #[tokio::test]
    async fn snapshots_are_published() {
        let (state, _) = new_state();
        let mut snapshots = state.subscribe_snapshots();
        state.dispatch(Intent::Start(two_players(60, TimeMode::Total))).unwrap();

        assert!(snapshots.has_changed().unwrap());
        assert_eq!(snapshots.borrow_and_update().phase, Phase::Playing);
    }
}
