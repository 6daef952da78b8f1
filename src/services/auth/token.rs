use std::fmt;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::error::AppError;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("invalid 'sub' (expected numeric user id)")]
    InvalidSub,
}

/// Identity claim carried inside a token. Never persisted.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

/// HS256 token issuer/verifier over a process-wide secret.
///
/// Stateless: validity is the signature check plus the `exp` check, nothing
/// server-side. An issued token stays valid until `exp` unless the secret
/// changes.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("TokenService")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // The default 60s leeway would accept just-expired tokens.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Sign a claim for `user_id`, expiring `ttl_seconds` from now.
    pub fn issue(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign token");
            AppError::Internal
        })
    }

    // Verify and decode. `jsonwebtoken::Validation` checks signature + `exp`;
    // tampered, malformed and expired tokens all end up as `TokenError::Jwt`.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// Verify, then promote `sub` into the app-level user id.
    ///
    /// This is the entry-point for the auth middleware.
    pub fn verify_user_id(&self, token: &str) -> Result<i64, TokenError> {
        let claims = self.verify(token)?;
        claims.sub.parse::<i64>().map_err(|_| TokenError::InvalidSub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-testing-only";

    fn service() -> TokenService {
        TokenService::new(SECRET, 7 * 24 * 60 * 60)
    }

    #[test]
    fn issued_token_verifies_back_to_the_user_id() {
        let tokens = service();
        let token = tokens.issue(42).unwrap();
        assert_eq!(tokens.verify_user_id(&token).unwrap(), 42);
    }

    #[test]
    fn verification_fails_under_a_different_secret() {
        let token = service().issue(42).unwrap();
        let other = TokenService::new("another-secret-entirely", 7 * 24 * 60 * 60);
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let tokens = service();
        let token = tokens.issue(42).unwrap();

        // Flip a character in the payload segment.
        let mut chars: Vec<char> = token.chars().collect();
        let mid = token.find('.').unwrap() + 2;
        chars[mid] = if chars[mid] == 'a' { 'b' } else { 'a' };
        let tampered: String = chars.into_iter().collect();

        assert!(tokens.verify(&tampered).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = service();

        let now = Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: "42".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let expired = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(tokens.verify(&expired), Err(TokenError::Jwt(_))));
    }

    #[test]
    fn non_numeric_sub_is_rejected() {
        let tokens = service();

        let now = Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: "not-a-user-id".to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            tokens.verify_user_id(&token),
            Err(TokenError::InvalidSub)
        ));
    }
}
