//! Climate API Service Library
//!
//! HTTP routing for the read-only station climate API: precipitation and
//! temperature observations from an existing SQLite station database.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the full router with middleware.
///
/// The named routes under `/api/v1.0/` take priority over the `:start`
/// capture, so `/api/v1.0/stations` is never read as a start date.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Route listing
        .route("/", get(handlers::landing::landing_handler))
        // Data routes
        .route(
            "/api/v1.0/precipitation",
            get(handlers::precipitation::precipitation_handler),
        )
        .route(
            "/api/v1.0/stations",
            get(handlers::stations::stations_handler),
        )
        .route("/api/v1.0/tobs", get(handlers::tobs::tobs_handler))
        .route(
            "/api/v1.0/:start",
            get(handlers::stats::stats_from_start_handler),
        )
        .route(
            "/api/v1.0/:start/:end",
            get(handlers::stats::stats_from_range_handler),
        )
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/ready", get(handlers::health::ready_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        .fallback(handlers::not_found_handler)
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
