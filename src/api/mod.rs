//! API module
//!
//! HTTP endpoints and middleware for the interactions webhook.

pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::discord::SignatureVerifier;
use crate::handlers::CommandHandler;

pub use routes::create_router;

/// Shared state for all routes
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<CommandHandler>,
    pub verifier: Arc<SignatureVerifier>,
}

impl AppState {
    pub fn new(handler: CommandHandler, verifier: SignatureVerifier) -> Self {
        Self {
            handler: Arc::new(handler),
            verifier: Arc::new(verifier),
        }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // Axum layers are applied in reverse order (last added = first executed)
    // Order: logging -> signature -> handler
    let protected_routes = create_router()
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::signature_middleware,
        ))
        .layer(axum_middleware::from_fn(middleware::logging_middleware));

    Router::new()
        // Health check (no signature)
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
