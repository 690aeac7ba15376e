//! `duenos-auth`: token and credential boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it signs and
//! verifies HS256 tokens and checks login credentials, nothing more. There is
//! no role or scope model; a verified token grants full access.

pub mod claims;
pub mod credentials;
pub mod jwt;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use credentials::{CredentialStore, StaticCredentialStore};
pub use jwt::{Hs256JwtIssuer, Hs256JwtValidator, JwtValidator, TokenIssueError};
