//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Provider listing
        .route("/providers", get(handlers::list_providers))
        // Schedule publication and retrieval
        .route(
            "/providers/{provider_id}/schedule",
            put(handlers::publish_schedule),
        )
        .route(
            "/providers/{provider_id}/schedule",
            get(handlers::get_schedule),
        )
        // Calendar display
        .route(
            "/providers/{provider_id}/calendar",
            get(handlers::get_calendar),
        )
        .route(
            "/providers/{provider_id}/days/{date}",
            get(handlers::get_day),
        )
        // Booking flow
        .route(
            "/providers/{provider_id}/bookings",
            post(handlers::create_booking),
        )
        .route(
            "/providers/{provider_id}/bookings",
            get(handlers::list_bookings),
        );

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
