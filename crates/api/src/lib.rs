//! HTTP API server with observability for the booking system.
//!
//! Exposes the booking saga and room suggestions over REST, with
//! structured logging (tracing) and Prometheus metrics. The edge concerns
//! the original deployment delegated to a gateway proxy (authentication,
//! header forwarding, routing) stay outside this server.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::InMemoryBookingStore;
use hotel::{InMemoryLockStore, RoomDirectory, RoomLockService};
use metrics_exporter_prometheus::PrometheusHandle;
use saga::{BookingOrchestrator, LocalHotelGateway};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
use routes::bookings::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/bookings", post(routes::bookings::create))
        .route("/bookings/{id}", get(routes::bookings::get))
        .route("/rooms", post(routes::rooms::register))
        .route("/rooms/suggestions", get(routes::rooms::suggestions))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state: in-memory stores wired through
/// the in-process hotel gateway.
pub fn create_default_state(config: &Config) -> Arc<AppState> {
    let rooms = RoomDirectory::new();
    let locks = RoomLockService::new(InMemoryLockStore::new());
    let gateway = LocalHotelGateway::new(locks, rooms.clone());
    let orchestrator =
        BookingOrchestrator::new(InMemoryBookingStore::new(), gateway, config.call_policy());

    Arc::new(AppState {
        orchestrator,
        rooms,
    })
}
