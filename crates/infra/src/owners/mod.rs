//! Owner (dueño) persistence: the Data Access Layer.
//!
//! Five CRUD operations plus a paged listing, each a single parameterized
//! statement against the `dueno` table. No business logic lives here.

pub mod postgres;
pub mod store;

pub use postgres::PostgresOwnerStore;
pub use store::{InMemoryOwnerStore, OwnerStore, StoreError};
