//! Postgres-backed owner store.
//!
//! Every statement is static SQL with bound parameters; request data never
//! reaches the query text. Column names are camel-case in the schema, so
//! they are always double-quoted.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use duenos_core::{Owner, OwnerFields, OwnerId};

use super::store::{OwnerStore, StoreError};
use crate::pagination::Pagination;

const SELECT_ALL: &str = r#"
    SELECT "idCliente", "NombreCliente", "ComidaFavorita", "DescuentoNavideno", "FechaCreacion"
    FROM dueno
"#;

const SELECT_PAGE: &str = r#"
    SELECT "idCliente", "NombreCliente", "ComidaFavorita", "DescuentoNavideno", "FechaCreacion"
    FROM dueno
    ORDER BY "idCliente"
    LIMIT $1 OFFSET $2
"#;

const SELECT_BY_ID: &str = r#"
    SELECT "idCliente", "NombreCliente", "ComidaFavorita", "DescuentoNavideno", "FechaCreacion"
    FROM dueno
    WHERE "idCliente" = $1
"#;

const INSERT: &str = r#"
    INSERT INTO dueno ("NombreCliente", "ComidaFavorita", "DescuentoNavideno")
    VALUES ($1, $2, $3)
    RETURNING "idCliente"
"#;

const UPDATE: &str = r#"
    UPDATE dueno
    SET "NombreCliente" = $1, "ComidaFavorita" = $2, "DescuentoNavideno" = $3
    WHERE "idCliente" = $4
"#;

const DELETE: &str = r#"DELETE FROM dueno WHERE "idCliente" = $1"#;

/// Owner store over a shared connection pool.
///
/// The pool is injected; cloning the store clones the pool handle, not the
/// connections.
#[derive(Debug, Clone)]
pub struct PostgresOwnerStore {
    pool: PgPool,
}

impl PostgresOwnerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn owner_from_row(row: &PgRow) -> Result<Owner, sqlx::Error> {
    Ok(Owner {
        id: OwnerId::new(row.try_get("idCliente")?),
        nombre_cliente: row.try_get("NombreCliente")?,
        comida_favorita: row.try_get("ComidaFavorita")?,
        descuento_navideno: row.try_get("DescuentoNavideno")?,
        created_at: row.try_get("FechaCreacion")?,
    })
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(code) = db_err.code() {
            match code.as_ref() {
                // not_null_violation, check_violation
                "23502" | "23514" => return StoreError::Constraint(db_err.message().to_string()),
                // invalid_text_representation, numeric_value_out_of_range
                "22P02" | "22003" => {
                    return StoreError::InvalidInput(db_err.message().to_string());
                }
                _ => {}
            }
        }
    }

    if matches!(err, sqlx::Error::PoolClosed) {
        return StoreError::Unavailable(format!("{operation}: connection pool closed"));
    }

    StoreError::Database {
        operation,
        source: err,
    }
}

#[async_trait::async_trait]
impl OwnerStore for PostgresOwnerStore {
    #[tracing::instrument(skip_all)]
    async fn get_all(&self) -> Result<Vec<Owner>, StoreError> {
        let rows = sqlx::query(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_all", e))?;

        rows.iter()
            .map(owner_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("get_all", e))
    }

    #[tracing::instrument(skip(self))]
    async fn get_all_paginated(&self, page: Pagination) -> Result<Vec<Owner>, StoreError> {
        let rows = sqlx::query(SELECT_PAGE)
            .bind(i64::from(page.limit))
            .bind(i64::from(page.offset))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_all_paginated", e))?;

        rows.iter()
            .map(owner_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("get_all_paginated", e))
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: OwnerId) -> Result<Option<Owner>, StoreError> {
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_by_id", e))?;

        row.as_ref()
            .map(owner_from_row)
            .transpose()
            .map_err(|e| map_sqlx_error("get_by_id", e))
    }

    #[tracing::instrument(skip_all)]
    async fn create(&self, fields: &OwnerFields) -> Result<OwnerId, StoreError> {
        let row = sqlx::query(INSERT)
            .bind(fields.nombre_cliente.as_deref())
            .bind(fields.comida_favorita.as_deref())
            .bind(fields.descuento_navideno)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("create", e))?;

        let id: i64 = row
            .try_get("idCliente")
            .map_err(|e| map_sqlx_error("create", e))?;
        tracing::debug!(id, "owner inserted");
        Ok(OwnerId::new(id))
    }

    #[tracing::instrument(skip(self, fields), fields(id = %id))]
    async fn update(&self, id: OwnerId, fields: &OwnerFields) -> Result<u64, StoreError> {
        let result = sqlx::query(UPDATE)
            .bind(fields.nombre_cliente.as_deref())
            .bind(fields.comida_favorita.as_deref())
            .bind(fields.descuento_navideno)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update", e))?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: OwnerId) -> Result<u64, StoreError> {
        let result = sqlx::query(DELETE)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| map_sqlx_error("ping", e))
    }
}
