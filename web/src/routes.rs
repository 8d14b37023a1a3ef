//! Router configuration.
//!
//! Builds the complete Axum router with all endpoints.

use crate::handlers::{bookings, experts, health_check, websocket};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Configures:
/// - Health check
/// - Expert listing and detail endpoints
/// - Booking endpoints (reserve, lookup, status update)
/// - WebSocket endpoint for change events
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/experts", get(experts::list_experts))
        .route("/experts/:id", get(experts::get_expert))
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings", get(bookings::list_bookings))
        .route("/bookings/:id/status", patch(bookings::update_booking_status));

    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(websocket::handle))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
