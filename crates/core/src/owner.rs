//! Owner (dueño) entity and its mutable field set.
//!
//! Field names on the wire match the column names of the `dueno` table, so the
//! JSON produced by the API is exactly the row shape clients already consume.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::id::OwnerId;
use crate::value_object::ValueObject;

/// A stored owner row.
///
/// # Invariants
/// - `id` is assigned by storage at insert time and never changes.
/// - `created_at` is assigned by storage at insert time and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Owner {
    /// ID del cliente.
    #[serde(rename = "idCliente")]
    #[schema(value_type = i64)]
    pub id: OwnerId,

    /// Nombre del cliente.
    #[serde(rename = "NombreCliente")]
    pub nombre_cliente: String,

    /// Comida favorita del dueño.
    #[serde(rename = "ComidaFavorita")]
    pub comida_favorita: String,

    /// Descuento navideño.
    #[serde(rename = "DescuentoNavideno", with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub descuento_navideno: Decimal,

    /// Fecha de creación.
    #[serde(rename = "FechaCreacion")]
    pub created_at: DateTime<Utc>,
}

impl Entity for Owner {
    type Id = OwnerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Create/update payload: the three mutable columns.
///
/// Every field is optional on purpose. A missing field is passed down to the
/// store as `NULL` and rejected by the table's `NOT NULL` constraint, so the
/// API performs no validation of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OwnerFields {
    #[serde(rename = "NombreCliente", default)]
    pub nombre_cliente: Option<String>,

    #[serde(rename = "ComidaFavorita", default)]
    pub comida_favorita: Option<String>,

    #[serde(
        rename = "DescuentoNavideno",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    #[schema(value_type = Option<f64>)]
    pub descuento_navideno: Option<Decimal>,
}

impl ValueObject for OwnerFields {}

impl OwnerFields {
    pub fn new(
        nombre_cliente: impl Into<String>,
        comida_favorita: impl Into<String>,
        descuento_navideno: Decimal,
    ) -> Self {
        Self {
            nombre_cliente: Some(nombre_cliente.into()),
            comida_favorita: Some(comida_favorita.into()),
            descuento_navideno: Some(descuento_navideno),
        }
    }

    /// Resolve into a complete field set, failing on the first missing column
    /// (in table column order).
    pub fn require(&self) -> DomainResult<NewOwner> {
        let nombre_cliente = self
            .nombre_cliente
            .clone()
            .ok_or(DomainError::missing_field("NombreCliente"))?;
        let comida_favorita = self
            .comida_favorita
            .clone()
            .ok_or(DomainError::missing_field("ComidaFavorita"))?;
        let descuento_navideno = self
            .descuento_navideno
            .ok_or(DomainError::missing_field("DescuentoNavideno"))?;

        Ok(NewOwner {
            nombre_cliente,
            comida_favorita,
            descuento_navideno,
        })
    }
}

/// A complete set of mutable owner columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOwner {
    pub nombre_cliente: String,
    pub comida_favorita: String,
    pub descuento_navideno: Decimal,
}

impl NewOwner {
    /// Materialize a stored row from these columns plus storage-assigned values.
    pub fn into_owner(self, id: OwnerId, created_at: DateTime<Utc>) -> Owner {
        Owner {
            id,
            nombre_cliente: self.nombre_cliente,
            comida_favorita: self.comida_favorita,
            descuento_navideno: self.descuento_navideno,
            created_at,
        }
    }
}
