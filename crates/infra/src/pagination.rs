//! Limit/offset paging for owner listings.

use serde::{Deserialize, Serialize};

/// Pagination parameters for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of rows to return.
    pub limit: u32,
    /// Number of rows to skip (0-based).
    pub offset: u32,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    /// Build from optional request values; limit is clamped to `1..=MAX_LIMIT`.
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, Self::MAX_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        let p = Pagination::new(None, None);
        assert_eq!(p, Pagination { limit: 10, offset: 0 });
        assert_eq!(p, Pagination::default());
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(Pagination::new(Some(0), None).limit, 1);
        assert_eq!(Pagination::new(Some(5_000), None).limit, Pagination::MAX_LIMIT);
        assert_eq!(Pagination::new(Some(25), Some(50)), Pagination { limit: 25, offset: 50 });
    }
}
