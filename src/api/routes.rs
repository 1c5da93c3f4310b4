//! API Routes
//!
//! The interactions webhook.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use crate::discord::Interaction;
use crate::error::AppError;

use super::AppState;

/// Create the interactions router
pub fn create_router() -> Router<AppState> {
    Router::new().route("/interactions", post(interactions))
}

/// Receive an interaction; the response body is the reply.
/// Events that get no reply are answered with 204.
async fn interactions(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let interaction: Interaction = serde_json::from_slice(&body)
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    tracing::debug!(interaction_id = %interaction.id, kind = ?interaction.kind, "Received interaction");

    let response = match state.handler.handle(&interaction).await {
        Some(reply) => Json(reply).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    };

    Ok(response)
}
