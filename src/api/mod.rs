pub mod dtos;
pub mod handlers;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::health;

/// Body limit sits above the 10 MiB upload gate so oversize uploads reach
/// the gate and get the typed rejection instead of a bare 413.
const BODY_LIMIT_BYTES: usize = 12 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/verify", post(handlers::verify))
        .route("/health", get(health::health_check))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
