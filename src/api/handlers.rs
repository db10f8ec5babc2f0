//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::error;

use crate::state::{AppState, Command};
use super::responses::{ApiResponse, StatusResponse, HealthResponse};

/// Forward a command to the countdown driver and wrap the result
async fn run_command(
    state: &AppState,
    command: Command,
    message: &str,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.dispatch(command).await {
        Ok(countdown) => Ok(Json(ApiResponse::from_snapshot(message.to_string(), countdown))),
        Err(e) => {
            error!("Failed to {} countdown: {}", command.as_str(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, Command::Start, "Countdown start requested").await
}

/// Handle POST /pause - Pause the countdown and withdraw its alert
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, Command::Pause, "Countdown pause requested").await
}

/// Handle POST /resume - Continue a paused countdown
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, Command::Resume, "Countdown resume requested").await
}

/// Handle POST /reset - Stop the countdown and rewind it
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, Command::Reset, "Countdown reset").await
}

/// Handle POST /toggle - Start if stopped, pause if running
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, Command::Toggle, "Countdown toggled").await
}

/// Handle GET /status - Return current countdown status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let countdown = state.get_countdown_state();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        status: countdown.status_label().to_string(),
        remaining_display: countdown.remaining_display(),
        countdown,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
