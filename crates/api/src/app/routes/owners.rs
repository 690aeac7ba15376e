use std::str::FromStr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use duenos_core::{Owner, OwnerFields, OwnerId};
use duenos_infra::{Pagination, StoreError};

use crate::app::dto::{self, CreatedResponse, ListQuery, MessageResponse, OwnerPage};
use crate::app::errors::AppError;
use crate::app::AppServices;
use crate::context::ClaimsContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_owners).post(create_owner))
        .route(
            "/:id",
            get(get_owner).put(update_owner).delete(delete_owner),
        )
}

/// A path segment that is not an integer cannot name any row.
fn parse_id(raw: &str) -> Result<OwnerId, AppError> {
    OwnerId::from_str(raw).map_err(|_| AppError::ResourceNotFound)
}

/// Read the owner columns from a request body.
///
/// The body is not validated: an absent or unparseable body carries no
/// columns, and values of the wrong type are refused the way the column type
/// would refuse them.
fn fields_from_body(body: &[u8], message: &'static str) -> Result<OwnerFields, AppError> {
    let value = dto::json_or_empty(body);
    serde_json::from_value(value).map_err(|e| AppError::DataAccessFailure {
        message,
        source: StoreError::InvalidInput(e.to_string()),
    })
}

/// Obtener todos los dueños.
#[utoipa::path(
    get,
    path = "/api/duenos",
    tag = "Dueños",
    params(ListQuery),
    responses(
        (status = 200, description = "Lista de dueños (o una página si se indica limit/offset).", body = [Owner]),
        (status = 401, description = "Token ausente o inválido.", body = crate::app::dto::ErrorBody),
        (status = 500, description = "Error al obtener los dueños.", body = crate::app::dto::ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_owners(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    if query.is_paged() {
        let page = Pagination::new(query.limit, query.offset);
        let items = services
            .owners
            .get_all_paginated(page)
            .await
            .map_err(AppError::data_access("Error al obtener los dueños"))?;

        return Ok(Json(OwnerPage {
            items,
            limit: page.limit,
            offset: page.offset,
        })
        .into_response());
    }

    let owners = services
        .owners
        .get_all()
        .await
        .map_err(AppError::data_access("Error al obtener los dueños"))?;
    Ok(Json(owners).into_response())
}

/// Obtener un dueño por ID.
#[utoipa::path(
    get,
    path = "/api/duenos/{id}",
    tag = "Dueños",
    params(("id" = i64, Path, description = "ID del dueño")),
    responses(
        (status = 200, description = "Dueño encontrado.", body = Owner),
        (status = 401, description = "Token ausente o inválido.", body = crate::app::dto::ErrorBody),
        (status = 404, description = "Dueño no encontrado.", body = crate::app::dto::ErrorBody),
        (status = 500, description = "Error al obtener el dueño.", body = crate::app::dto::ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_owner(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<Owner>, AppError> {
    let id = parse_id(&id)?;

    services
        .owners
        .get_by_id(id)
        .await
        .map_err(AppError::data_access("Error al obtener el dueño"))?
        .map(Json)
        .ok_or(AppError::ResourceNotFound)
}

/// Crear un nuevo dueño.
#[utoipa::path(
    post,
    path = "/api/duenos",
    tag = "Dueños",
    request_body = OwnerFields,
    responses(
        (status = 201, description = "Dueño creado.", body = CreatedResponse),
        (status = 401, description = "Token ausente o inválido.", body = crate::app::dto::ErrorBody),
        (status = 500, description = "Error al crear el dueño.", body = crate::app::dto::ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_owner(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<ClaimsContext>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let fields = fields_from_body(&body, "Error al crear el dueño")?;

    let id = services
        .owners
        .create(&fields)
        .await
        .map_err(AppError::data_access("Error al crear el dueño"))?;

    let caller = caller.subject().unwrap_or_default();
    tracing::info!(id = %id, caller = %caller, "owner created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Dueño creado".to_string(),
            id_cliente: id.get(),
        }),
    ))
}

/// Actualizar un dueño existente.
#[utoipa::path(
    put,
    path = "/api/duenos/{id}",
    tag = "Dueños",
    params(("id" = i64, Path, description = "ID del dueño")),
    request_body = OwnerFields,
    responses(
        (status = 200, description = "Dueño actualizado.", body = MessageResponse),
        (status = 401, description = "Token ausente o inválido.", body = crate::app::dto::ErrorBody),
        (status = 404, description = "Dueño no encontrado.", body = crate::app::dto::ErrorBody),
        (status = 500, description = "Error al actualizar el dueño.", body = crate::app::dto::ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_owner(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<ClaimsContext>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    let fields = fields_from_body(&body, "Error al actualizar el dueño")?;

    let affected = services
        .owners
        .update(id, &fields)
        .await
        .map_err(AppError::data_access("Error al actualizar el dueño"))?;

    if affected == 0 {
        return Err(AppError::ResourceNotFound);
    }

    let caller = caller.subject().unwrap_or_default();
    tracing::info!(id = %id, caller = %caller, "owner updated");
    Ok(Json(MessageResponse::new("Dueño actualizado")))
}

/// Eliminar un dueño.
#[utoipa::path(
    delete,
    path = "/api/duenos/{id}",
    tag = "Dueños",
    params(("id" = i64, Path, description = "ID del dueño")),
    responses(
        (status = 200, description = "Dueño eliminado.", body = MessageResponse),
        (status = 401, description = "Token ausente o inválido.", body = crate::app::dto::ErrorBody),
        (status = 404, description = "Dueño no encontrado.", body = crate::app::dto::ErrorBody),
        (status = 500, description = "Error al eliminar el dueño.", body = crate::app::dto::ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_owner(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<ClaimsContext>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;

    let affected = services
        .owners
        .delete(id)
        .await
        .map_err(AppError::data_access("Error al eliminar el dueño"))?;

    if affected == 0 {
        return Err(AppError::ResourceNotFound);
    }

    let caller = caller.subject().unwrap_or_default();
    tracing::info!(id = %id, caller = %caller, "owner deleted");
    Ok(Json(MessageResponse::new("Dueño eliminado")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_integer_ids_are_not_found() {
        assert!(matches!(parse_id("abc"), Err(AppError::ResourceNotFound)));
        assert!(matches!(parse_id("1.5"), Err(AppError::ResourceNotFound)));
        assert_eq!(parse_id("42").unwrap(), OwnerId::new(42));
    }

    #[test]
    fn absent_or_unparseable_bodies_carry_no_columns() {
        for body in [&b""[..], b"   ", b"{not json", b"NombreCliente=Ana"] {
            let fields = fields_from_body(body, "Error al crear el dueño").unwrap();
            assert_eq!(fields, OwnerFields::default());
        }
    }

    #[test]
    fn mistyped_columns_fail_like_the_column_type() {
        let err = fields_from_body(br#"{"NombreCliente": 5}"#, "Error al crear el dueño")
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::DataAccessFailure {
                message: "Error al crear el dueño",
                source: StoreError::InvalidInput(_),
            }
        ));

        let err = fields_from_body(b"[1, 2]", "Error al actualizar el dueño").unwrap_err();
        assert!(matches!(
            err,
            AppError::DataAccessFailure { message: "Error al actualizar el dueño", .. }
        ));
    }
}
