//! HS256 signing and verification with a process-wide shared secret.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};

/// Verifies a bearer token and yields its claims.
///
/// `now` is injected so expiry checks stay deterministic under test.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError>;
}

/// HS256 validator over a shared secret.
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: Vec<u8>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by `validate_claims` against the injected clock;
        // no registered claim is mandatory.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::new();

        Self {
            key: DecodingKey::from_secret(&secret),
            validation,
        }
    }
}

impl core::fmt::Debug for Hs256JwtValidator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256JwtValidator").finish_non_exhaustive()
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError> {
        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.key, &self.validation)
            .map_err(map_decode_error)?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> TokenValidationError {
    match err.kind() {
        ErrorKind::InvalidSignature => TokenValidationError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenValidationError::Expired,
        _ => TokenValidationError::Malformed(err.to_string()),
    }
}

#[derive(Debug, Error)]
#[error("failed to sign token: {0}")]
pub struct TokenIssueError(#[from] jsonwebtoken::errors::Error);

/// HS256 issuer for login tokens with a configurable lifetime.
pub struct Hs256JwtIssuer {
    key: EncodingKey,
    ttl: chrono::Duration,
}

impl Hs256JwtIssuer {
    pub fn new(secret: Vec<u8>, ttl: chrono::Duration) -> Self {
        Self {
            key: EncodingKey::from_secret(&secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// Sign a token for `subject`, valid from `now` for the configured lifetime.
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenIssueError> {
        let claims = JwtClaims::for_subject(subject, now, self.ttl);
        Ok(jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.key)?)
    }
}

impl core::fmt::Debug for Hs256JwtIssuer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256JwtIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const SECRET: &[u8] = b"test-secret";

    fn pair() -> (Hs256JwtIssuer, Hs256JwtValidator) {
        (
            Hs256JwtIssuer::new(SECRET.to_vec(), Duration::hours(1)),
            Hs256JwtValidator::new(SECRET.to_vec()),
        )
    }

    #[test]
    fn issued_token_validates() {
        let (issuer, validator) = pair();
        let now = Utc::now();
        let token = issuer.issue("admin", now).unwrap();

        let claims = validator.validate(&token, now).unwrap();
        assert_eq!(claims.subject().as_deref(), Some("admin"));
        assert_eq!(
            claims.exp.and_then(|n| n.as_i64()),
            Some((now + Duration::hours(1)).timestamp())
        );
    }

    #[test]
    fn token_expires_after_ttl() {
        let (issuer, validator) = pair();
        let now = Utc::now();
        let token = issuer.issue("admin", now).unwrap();

        let later = now + Duration::hours(1) + Duration::seconds(1);
        assert_eq!(validator.validate(&token, later), Err(TokenValidationError::Expired));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = Hs256JwtIssuer::new(b"other-secret".to_vec(), Duration::hours(1));
        let validator = Hs256JwtValidator::new(SECRET.to_vec());
        let now = Utc::now();
        let token = issuer.issue("admin", now).unwrap();

        assert_eq!(
            validator.validate(&token, now),
            Err(TokenValidationError::InvalidSignature)
        );
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let (issuer, validator) = pair();
        let now = Utc::now();
        let token = issuer.issue("admin", now).unwrap();

        let other = issuer.issue("mallory", now).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(validator.validate(&forged, now).is_err());
    }

    #[test]
    fn garbage_is_malformed() {
        let (_, validator) = pair();
        assert!(matches!(
            validator.validate("not-a-jwt", Utc::now()),
            Err(TokenValidationError::Malformed(_))
        ));
    }

    #[test]
    fn token_without_exp_is_accepted() {
        let (_, validator) = pair();
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "sub": 7, "iat": 1.5 }),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let claims = validator.validate(&token, Utc::now()).unwrap();
        assert_eq!(claims.exp, None);
        assert_eq!(claims.subject().as_deref(), Some("7"));
    }
}
