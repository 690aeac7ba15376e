use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use uuid::Uuid;

use duenos_infra::StoreError;

use super::dto::ErrorBody;

pub const MSG_TOKEN_MISSING: &str = "Acceso denegado, token no proporcionado";
pub const MSG_TOKEN_INVALID: &str = "Token inválido";
pub const MSG_NOT_FOUND: &str = "Dueño no encontrado";
pub const MSG_BAD_CREDENTIALS: &str = "Credenciales incorrectas";
pub const MSG_TOKEN_ISSUE: &str = "Error al generar el token";

/// Every failure the HTTP layer reports.
///
/// Server-side failures carry their cause for logging only; the client sees
/// the operation message and an incident id.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("authentication token missing")]
    AuthenticationMissing,

    #[error("authentication token invalid")]
    AuthenticationInvalid,

    #[error("owner not found")]
    ResourceNotFound,

    #[error("{message}")]
    DataAccessFailure {
        message: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("bad credentials")]
    BadCredentials,

    #[error("token issuance failed: {0}")]
    TokenIssue(#[from] duenos_auth::TokenIssueError),
}

impl AppError {
    /// Wrap a store failure with the client-facing message of the operation.
    pub fn data_access(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::DataAccessFailure { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::AuthenticationMissing | Self::AuthenticationInvalid => StatusCode::UNAUTHORIZED,
            Self::ResourceNotFound => StatusCode::NOT_FOUND,
            Self::BadCredentials => StatusCode::BAD_REQUEST,
            Self::DataAccessFailure { .. } | Self::TokenIssue(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::AuthenticationMissing => json_error(status, MSG_TOKEN_MISSING),
            Self::AuthenticationInvalid => json_error(status, MSG_TOKEN_INVALID),
            Self::ResourceNotFound => json_error(status, MSG_NOT_FOUND),
            Self::BadCredentials => json_error(status, MSG_BAD_CREDENTIALS),
            Self::DataAccessFailure { message, source } => {
                let incident = Uuid::now_v7();
                tracing::error!(%incident, error = %source, "{message}");
                json_incident(status, message, incident)
            }
            Self::TokenIssue(source) => {
                let incident = Uuid::now_v7();
                tracing::error!(%incident, error = %source, "token issuance failed");
                json_incident(status, MSG_TOKEN_ISSUE, incident)
            }
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
            details: None,
        }),
    )
        .into_response()
}

fn json_incident(status: StatusCode, message: &str, incident: Uuid) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
            details: Some(incident.to_string()),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_error_kind() {
        assert_eq!(AppError::AuthenticationMissing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::AuthenticationInvalid.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::ResourceNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::BadCredentials.status(), StatusCode::BAD_REQUEST);

        let err = AppError::data_access("Error al crear el dueño")(StoreError::Constraint(
            "null value in column \"NombreCliente\"".into(),
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Error al crear el dueño");
    }

    #[test]
    fn data_access_failure_hides_the_cause() {
        let err = AppError::data_access("Error al obtener los dueños")(StoreError::Unavailable(
            "pool closed".into(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
