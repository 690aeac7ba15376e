use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use thiserror::Error;

use duenos_core::{DomainError, Owner, OwnerFields, OwnerId};

use crate::pagination::Pagination;

/// Data access contract for the `dueno` table.
///
/// Mutations report affected-row counts rather than "not found" errors; the
/// HTTP layer decides what a zero means.
#[async_trait::async_trait]
pub trait OwnerStore: Send + Sync {
    /// All rows, in the store's natural order.
    async fn get_all(&self) -> Result<Vec<Owner>, StoreError>;

    /// One page of rows ordered by id.
    async fn get_all_paginated(&self, page: Pagination) -> Result<Vec<Owner>, StoreError>;

    async fn get_by_id(&self, id: OwnerId) -> Result<Option<Owner>, StoreError>;

    /// Insert a row and return its assigned id.
    async fn create(&self, fields: &OwnerFields) -> Result<OwnerId, StoreError>;

    /// Overwrite all mutable columns of a row. Returns the affected-row count.
    async fn update(&self, id: OwnerId, fields: &OwnerFields) -> Result<u64, StoreError>;

    /// Hard-delete a row. Returns the affected-row count.
    async fn delete(&self, id: OwnerId) -> Result<u64, StoreError>;

    /// Cheap round-trip used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<S> OwnerStore for Arc<S>
where
    S: OwnerStore + ?Sized,
{
    async fn get_all(&self) -> Result<Vec<Owner>, StoreError> {
        (**self).get_all().await
    }

    async fn get_all_paginated(&self, page: Pagination) -> Result<Vec<Owner>, StoreError> {
        (**self).get_all_paginated(page).await
    }

    async fn get_by_id(&self, id: OwnerId) -> Result<Option<Owner>, StoreError> {
        (**self).get_by_id(id).await
    }

    async fn create(&self, fields: &OwnerFields) -> Result<OwnerId, StoreError> {
        (**self).create(fields).await
    }

    async fn update(&self, id: OwnerId, fields: &OwnerFields) -> Result<u64, StoreError> {
        (**self).update(id, fields).await
    }

    async fn delete(&self, id: OwnerId) -> Result<u64, StoreError> {
        (**self).delete(id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        (**self).ping().await
    }
}

/// Data access failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A table constraint rejected the statement (e.g. a `NULL` in a required column).
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// A value could not be converted to its column type.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Any other driver-level failure (connectivity, protocol, decoding).
    #[error("database error in {operation}: {source}")]
    Database {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// The store cannot serve requests at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<DomainError> for StoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MissingField(column) => Self::Constraint(format!(
                "null value in column \"{column}\" of relation \"dueno\" violates not-null constraint"
            )),
            other => Self::Constraint(other.to_string()),
        }
    }
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<OwnerId, Owner>,
    last_id: i64,
}

/// In-memory `dueno` table for tests/dev.
///
/// Mirrors the Postgres table's behavior where it is observable through the
/// API: ids come from a sequence that is never rewound, `FechaCreacion` is
/// stamped on insert, and required columns reject missing values.
#[derive(Debug, Default)]
pub struct InMemoryOwnerStore {
    inner: RwLock<Table>,
}

impl InMemoryOwnerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned<E>(_: E) -> StoreError {
        StoreError::Unavailable("in-memory table lock poisoned".to_string())
    }
}

#[async_trait::async_trait]
impl OwnerStore for InMemoryOwnerStore {
    async fn get_all(&self) -> Result<Vec<Owner>, StoreError> {
        let table = self.inner.read().map_err(Self::poisoned)?;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get_all_paginated(&self, page: Pagination) -> Result<Vec<Owner>, StoreError> {
        let table = self.inner.read().map_err(Self::poisoned)?;
        Ok(table
            .rows
            .values()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: OwnerId) -> Result<Option<Owner>, StoreError> {
        let table = self.inner.read().map_err(Self::poisoned)?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn create(&self, fields: &OwnerFields) -> Result<OwnerId, StoreError> {
        let new_owner = fields.require()?;

        let mut table = self.inner.write().map_err(Self::poisoned)?;
        table.last_id += 1;
        let id = OwnerId::new(table.last_id);
        table.rows.insert(id, new_owner.into_owner(id, Utc::now()));
        Ok(id)
    }

    async fn update(&self, id: OwnerId, fields: &OwnerFields) -> Result<u64, StoreError> {
        let mut table = self.inner.write().map_err(Self::poisoned)?;
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(0);
        };

        let new_owner = fields.require()?;
        row.nombre_cliente = new_owner.nombre_cliente;
        row.comida_favorita = new_owner.comida_favorita;
        row.descuento_navideno = new_owner.descuento_navideno;
        Ok(1)
    }

    async fn delete(&self, id: OwnerId) -> Result<u64, StoreError> {
        let mut table = self.inner.write().map_err(Self::poisoned)?;
        Ok(u64::from(table.rows.remove(&id).is_some()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.read().map(|_| ()).map_err(Self::poisoned)
    }
}
