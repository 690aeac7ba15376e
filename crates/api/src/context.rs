use duenos_auth::JwtClaims;

/// Verified token claims for the current request.
///
/// Inserted by the authentication gate; present on every protected route.
/// Handlers use it for attribution in logs only; no route makes access
/// decisions from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimsContext {
    claims: JwtClaims,
}

impl ClaimsContext {
    pub fn new(claims: JwtClaims) -> Self {
        Self { claims }
    }

    /// The token subject, falling back to the legacy `username` claim.
    pub fn subject(&self) -> Option<String> {
        self.claims.subject()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(raw: serde_json::Value) -> ClaimsContext {
        ClaimsContext::new(serde_json::from_value(raw).unwrap())
    }

    #[test]
    fn subject_prefers_sub_then_username() {
        let ctx = context(serde_json::json!({ "exp": 1, "username": "admin" }));
        assert_eq!(ctx.subject().as_deref(), Some("admin"));

        let ctx = context(serde_json::json!({ "sub": "caja", "username": "admin" }));
        assert_eq!(ctx.subject().as_deref(), Some("caja"));

        let ctx = context(serde_json::json!({ "exp": 1 }));
        assert_eq!(ctx.subject(), None);
    }
}
