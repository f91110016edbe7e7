//! HTTP API module
//! 
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/game/start", post(start_handler))
        .route("/game/next", post(next_handler))
        .route("/game/pause", post(pause_handler))
        .route("/game/reset", post(reset_handler))
        .route("/game/adjust", post(adjust_handler))
        .route("/players/:id/pause", post(player_pause_handler))
        .route("/players/:id/remove", post(remove_player_handler))
        .route("/players/:id/color", post(player_color_handler))
        .route("/preset", get(preset_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
