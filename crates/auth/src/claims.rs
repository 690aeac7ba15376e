use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// JWT claims model (transport-agnostic).
///
/// Nothing is required. Whatever a correctly signed token carries is kept and
/// handed to handlers untouched; no claim grants or restricts access. Only
/// `exp` and `iat` have to be numbers when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject. Any JSON value; tokens issued here carry the login username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Value>,

    /// Issued-at, seconds since the Unix epoch (fractions allowed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<Number>,

    /// Expiration, seconds since the Unix epoch. Tokens without it never expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<Number>,

    /// Any other claims present in the token.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JwtClaims {
    /// Claims for a freshly issued login token.
    pub fn for_subject(subject: &str, now: DateTime<Utc>, ttl: chrono::Duration) -> Self {
        let mut extra = Map::new();
        extra.insert("username".to_string(), Value::String(subject.to_string()));

        Self {
            sub: Some(Value::String(subject.to_string())),
            iat: Some(Number::from(now.timestamp())),
            exp: Some(Number::from((now + ttl).timestamp())),
            extra,
        }
    }

    /// The subject rendered as text, falling back to the `username` claim.
    pub fn subject(&self) -> Option<String> {
        let value = self.sub.as_ref().or_else(|| self.extra.get("username"))?;
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token signature does not match")]
    InvalidSignature,

    #[error("malformed token: {0}")]
    Malformed(String),
}

/// Deterministically validate JWT claims against a clock reading.
///
/// Note: this validates the *claims* only. Signature verification happens in
/// [`crate::jwt`]. A token is expired from its `exp` second onwards.
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let Some(exp) = &claims.exp else {
        return Ok(());
    };
    let exp = exp
        .as_f64()
        .ok_or_else(|| TokenValidationError::Malformed("exp is not a number".to_string()))?;

    if now.timestamp() as f64 >= exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn fresh_claims_are_valid_until_exp() {
        let now = Utc::now();
        let claims = JwtClaims::for_subject("admin", now, Duration::hours(1));

        assert_eq!(validate_claims(&claims, now), Ok(()));
        assert_eq!(
            validate_claims(&claims, now + Duration::hours(1)),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn unknown_claims_round_trip_through_extra() {
        let raw = serde_json::json!({ "exp": 10, "role": "viewer", "username": "x" });
        let claims: JwtClaims = serde_json::from_value(raw).unwrap();

        assert_eq!(claims.sub, None);
        assert_eq!(claims.extra["role"], "viewer");
        assert_eq!(claims.extra["username"], "x");
        assert_eq!(claims.subject().as_deref(), Some("x"));
    }

    #[test]
    fn login_claims_carry_username() {
        let claims = JwtClaims::for_subject("admin", Utc::now(), Duration::minutes(5));
        assert_eq!(claims.subject().as_deref(), Some("admin"));
        assert_eq!(claims.extra["username"], "admin");
    }

    #[test]
    fn claims_without_exp_never_expire() {
        let claims: JwtClaims =
            serde_json::from_value(serde_json::json!({ "username": "admin" })).unwrap();
        assert_eq!(claims.exp, None);
        assert_eq!(validate_claims(&claims, Utc::now() + Duration::days(3650)), Ok(()));
    }

    #[test]
    fn loosely_typed_registered_claims_are_accepted() {
        let now = Utc::now();
        let exp = (now + Duration::minutes(5)).timestamp();
        let claims: JwtClaims = serde_json::from_value(
            serde_json::json!({ "sub": 42, "iat": 1.5, "exp": exp as f64 + 0.25 }),
        )
        .unwrap();

        assert_eq!(claims.subject().as_deref(), Some("42"));
        assert_eq!(validate_claims(&claims, now), Ok(()));
    }

    #[test]
    fn non_numeric_exp_does_not_deserialize() {
        let raw = serde_json::json!({ "exp": "tomorrow" });
        assert!(serde_json::from_value::<JwtClaims>(raw).is_err());
    }
}
