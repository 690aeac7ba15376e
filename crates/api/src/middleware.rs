use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use duenos_auth::JwtValidator;

use crate::app::errors::AppError;
use crate::context::ClaimsContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

/// Authentication gate for the owner routes.
///
/// Any validly signed, unexpired token is accepted; the claims are attached to
/// the request but grant no finer-grained permissions.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers())?;

    let claims = state.jwt.validate(token, Utc::now()).map_err(|e| {
        tracing::debug!(error = %e, "rejected token");
        AppError::AuthenticationInvalid
    })?;

    req.extensions_mut().insert(ClaimsContext::new(claims));

    Ok(next.run(req).await)
}

/// The `Authorization` value is the token itself; a `Bearer ` prefix is
/// tolerated and stripped.
fn extract_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AppError::AuthenticationMissing)?;

    let header = header.to_str().map_err(|_| AppError::AuthenticationInvalid)?;

    if header.trim().is_empty() {
        return Err(AppError::AuthenticationMissing);
    }

    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    if token.is_empty() {
        return Err(AppError::AuthenticationInvalid);
    }

    Ok(token)
}
