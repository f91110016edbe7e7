//! Turn Timer - A state-managed HTTP server for board game turn timers
//! 
//! This is the main entry point for the turn-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use turn_timer::{
    api::create_router,
    config::Config,
    services::{AlertSink, JsonFilePresetStore, MemoryPresetStore, PresetStore, SilentAlert, TerminalBell},
    state::AppState,
    tasks::low_time_alert_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("turn_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting turn-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, preset={}",
          config.host, config.port, config.preset.display());

    let preset_store: Arc<dyn PresetStore> = if config.no_persist {
        Arc::new(MemoryPresetStore::new())
    } else {
        Arc::new(JsonFilePresetStore::new(&config.preset))
    };

    let alert_sink: Arc<dyn AlertSink> = if config.mute {
        Arc::new(SilentAlert)
    } else {
        Arc::new(TerminalBell)
    };

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), preset_store));

    // The tick source lives for the whole process; starting a game replaces it
    state.restart_ticker().map_err(anyhow::Error::msg)?;

    let alert_state = Arc::clone(&state);
    tokio::spawn(async move {
        low_time_alert_task(alert_state, alert_sink).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /game/start          - Start a game from a preset");
    info!("  POST /game/next           - End the current turn");
    info!("  POST /game/pause          - Toggle pause");
    info!("  POST /game/reset          - Return to setup");
    info!("  POST /game/adjust         - Adjust the active player's time");
    info!("  POST /players/:id/pause   - Toggle a player's own pause");
    info!("  POST /players/:id/remove  - Remove a player");
    info!("  POST /players/:id/color   - Change a player's color");
    info!("  GET  /preset              - Stored setup preset");
    info!("  GET  /status              - Current game snapshot");
    info!("  GET  /health              - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
