//! `duenos-core`: domain building blocks for the owner (dueño) registry.
//!
//! This crate contains **pure domain** types (no HTTP, no SQL).

pub mod entity;
pub mod error;
pub mod id;
pub mod owner;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::OwnerId;
pub use owner::{NewOwner, Owner, OwnerFields};
pub use value_object::ValueObject;
