//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::error;

use crate::state::{AppState, Intent, PlayerId, Preset};
use super::responses::{AdjustRequest, ApiResponse, ColorRequest, HealthResponse, StatusResponse};

/// Dispatch an intent and wrap the resulting snapshot
fn respond(state: &Arc<AppState>, intent: Intent) -> Result<Json<ApiResponse>, StatusCode> {
    let action = intent.name();
    match state.dispatch(intent) {
        Ok(snapshot) => {
            let message = snapshot.status.clone();
            Ok(Json(ApiResponse::applied(message, snapshot)))
        }
        Err(e) => {
            error!("Failed to apply {} intent: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /game/start - Start a game from the setup form
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Json(preset): Json<Preset>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state, Intent::Start(preset))
}

/// Handle POST /game/next - End the current turn
pub async fn next_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state, Intent::AdvanceTurn)
}

/// Handle POST /game/pause - Toggle the global pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state, Intent::TogglePause)
}

/// Handle POST /game/reset - End the game and return to setup
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state, Intent::Reset)
}

/// Handle POST /game/adjust - Add or remove time from the active player
pub async fn adjust_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AdjustRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state, Intent::AdjustTime(request.delta))
}

/// Handle POST /players/:id/pause - Toggle one player's own pause
pub async fn player_pause_handler(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<PlayerId>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state, Intent::TogglePlayerPause(player_id))
}

/// Handle POST /players/:id/remove - Remove a player from the rotation
pub async fn remove_player_handler(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<PlayerId>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state, Intent::RemovePlayer(player_id))
}

/// Handle POST /players/:id/color - Change a player's tag color
pub async fn player_color_handler(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<PlayerId>,
    Json(request): Json<ColorRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state, Intent::ColorChanged { player_id, color: request.color })
}

/// Handle GET /preset - Return the stored setup form
pub async fn preset_handler(State(state): State<Arc<AppState>>) -> Json<Preset> {
    Json(state.load_preset())
}

/// Handle GET /status - Return the current snapshot
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let snapshot = match state.get_snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        snapshot,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
