//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of an owner row (`dueno."idCliente"`).
///
/// Assigned by the database on insert and never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(i64);

impl OwnerId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for OwnerId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<OwnerId> for i64 {
    fn from(value: OwnerId) -> Self {
        value.0
    }
}

impl FromStr for OwnerId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|e| DomainError::invalid_id(format!("OwnerId: {e}")))?;
        Ok(Self(value))
    }
}
