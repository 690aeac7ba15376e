//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared handles (store, credentials, token issuer)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response bodies
//! - `errors.rs`: error taxonomy and its JSON envelope
//! - `openapi.rs`: generated API document and docs page

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use duenos_auth::Hs256JwtValidator;
use duenos_infra::OwnerStore;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod openapi;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig, owners: Arc<dyn OwnerStore>) -> Router {
    let jwt = Arc::new(Hs256JwtValidator::new(config.jwt_secret.clone().into_bytes()));
    let auth_state = middleware::AuthState { jwt };

    let services = Arc::new(services::build_services(config, owners));

    // Protected routes: every owner endpoint requires a valid token. Unmatched
    // paths fall through to the default 404 without passing the gate.
    let protected = routes::router().route_layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .merge(routes::public_router())
        .merge(openapi::router())
        .merge(protected)
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.allowed_origin)),
        )
}

/// CORS policy for the configured frontend origin.
///
/// Credentials are only allowed for a concrete origin; a wildcard origin with
/// credentials is rejected by browsers.
pub fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match allowed_origin.trim() {
        "" | "*" => cors.allow_origin(Any),
        origin => match HeaderValue::from_str(origin) {
            Ok(origin) => cors.allow_origin(origin).allow_credentials(true),
            Err(e) => {
                tracing::warn!(origin, error = %e, "invalid FRONTEND_URL; allowing any origin");
                cors.allow_origin(Any)
            }
        },
    }
}
