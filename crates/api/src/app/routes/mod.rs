use axum::{
    routing::{get, post},
    Router,
};

pub mod auth;
pub mod owners;
pub mod system;

/// Router for the authenticated owner endpoints.
pub fn router() -> Router {
    Router::new().nest("/api/duenos", owners::router())
}

/// Endpoints reachable without a token.
pub fn public_router() -> Router {
    Router::new()
        .route("/login", post(auth::login))
        .route("/health", get(system::health))
        .route("/health/readiness", get(system::readiness))
}
