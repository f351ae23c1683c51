//! # TrustOS Backend
//!
//! Mock HTTP service behind the DAO demo: a random "AI" trust score and a
//! canned approval vote. No database, no authentication, nothing on-chain.

pub mod config;
pub mod error;
pub mod handlers;

pub use config::Config;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn app_router(config: &Config) -> Router {
    let cors = match config.allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
        Err(_) => {
            tracing::warn!(
                "unparseable ALLOWED_ORIGIN `{}`; allowing any origin",
                config.allowed_origin
            );
            CorsLayer::permissive()
        }
    };

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/score", post(handlers::generate_score))
        .route("/api/dao/approve", post(handlers::approve_proposal))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
