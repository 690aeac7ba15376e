use std::sync::Arc;

use axum::{body::Bytes, extract::Extension, Json};
use chrono::Utc;

use crate::app::dto::{self, LoginRequest, TokenResponse};
use crate::app::errors::AppError;
use crate::app::AppServices;

/// Read the login body; anything that is not a username/password pair of
/// strings yields empty credentials.
fn credentials_from_body(body: &[u8]) -> LoginRequest {
    serde_json::from_value(dto::json_or_empty(body)).unwrap_or_default()
}

/// Iniciar sesión y obtener un token JWT.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token emitido.", body = TokenResponse),
        (status = 400, description = "Credenciales incorrectas.", body = crate::app::dto::ErrorBody)
    )
)]
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> Result<Json<TokenResponse>, AppError> {
    let body = credentials_from_body(&body);

    if !services.credentials.verify(&body.username, &body.password) {
        tracing::info!(username = %body.username, "login rejected");
        return Err(AppError::BadCredentials);
    }

    let token = services.tokens.issue(&body.username, Utc::now())?;
    tracing::info!(username = %body.username, "token issued");

    Ok(Json(TokenResponse { token }))
}
