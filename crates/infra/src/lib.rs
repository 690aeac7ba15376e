//! Infrastructure layer: database pool and owner persistence.

pub mod db;
pub mod owners;
pub mod pagination;


pub use owners::{InMemoryOwnerStore, OwnerStore, PostgresOwnerStore, StoreError};
pub use pagination::Pagination;
