//! Axum router configuration with middleware.
//!
//! Middleware: CORS (allow any origin, matching the original deployment's
//! browser clients), request tracing.

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/deletechat/{chat_id}", delete(handlers::chat::delete_chat))
        .route("/health", get(health_check))
        .fallback(unknown_route)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Envelope for requests that match no route.
async fn unknown_route() -> impl axum::response::IntoResponse {
    (
        axum::http::StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({
            "error": "The requested resource was not found.",
            "response": "An error occurred. Please check your request.",
            "status": 404,
        })),
    )
}

/// GET /health - Simple health check endpoint.
async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.store.session_count(),
    }))
}
