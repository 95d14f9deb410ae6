//! colonnade-server
//!
//! REST surface over the conversation and sensor-metric stores.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod seed;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let chat = Router::new()
        .route("/health", get(routes::chat::health))
        .route("/conversations", get(routes::chat::list_conversations))
        .route("/conversations/{id}", get(routes::chat::get_conversation))
        .route("/conversations/{id}/messages", get(routes::chat::list_messages))
        .route(
            "/conversations/{id}/messages/latest",
            get(routes::chat::latest_messages),
        );

    let sensors = Router::new()
        .route("/health", get(routes::sensors::health))
        .route(
            "/{sensor}/metrics/month/{year}/{month}",
            get(routes::sensors::metrics_for_month),
        )
        .route(
            "/{sensor}/metrics/day/{year}/{month}/{day}",
            get(routes::sensors::metrics_for_day),
        )
        .route(
            "/{sensor}/metrics/latest/{year}/{month}",
            get(routes::sensors::latest_metrics),
        )
        .route(
            "/{sensor}/metrics/range/{year}/{month}/{day}",
            get(routes::sensors::metrics_for_hour_range),
        )
        .route(
            "/{sensor}/metrics/current",
            get(routes::sensors::current_month),
        );

    Router::new()
        .nest("/api/chat", chat)
        .nest("/api/sensors", sensors)
        .layer(axum_mw::from_fn(middleware::request_log::request_log))
        .layer(cors)
        .with_state(state)
}
