//! Access token validation using RS256.
//!
//! Competiscore does not issue tokens. Sign-in happens against an external
//! identity provider; this module only validates the RS256 access tokens it
//! mints, using the provider's published public key.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for token validation.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Claims carried by an identity-provider access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Token ID
    pub jti: String,
    /// Verified email address of the subject
    pub email: String,
    /// Display name of the subject
    #[serde(default)]
    pub name: Option<String>,
}

/// Default leeway in seconds for clock skew tolerance.
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Validator for identity-provider access tokens.
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    pub leeway_secs: u64,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("algorithm", &self.algorithm)
            .field("leeway_secs", &self.leeway_secs)
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl TokenValidator {
    /// Creates a validator from the provider's RSA public key in PEM format.
    pub fn new(public_key_pem: &str) -> Result<Self, TokenError> {
        Self::with_leeway(public_key_pem, DEFAULT_LEEWAY_SECS)
    }

    /// Creates a validator with a custom clock-skew leeway.
    pub fn with_leeway(public_key_pem: &str, leeway_secs: u64) -> Result<Self, TokenError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| TokenError::InvalidKey(format!("Invalid public key: {}", e)))?;

        Ok(Self {
            decoding_key,
            algorithm: Algorithm::RS256,
            leeway_secs,
        })
    }

    /// Creates an HS256 validator for tests. Not for production use.
    pub fn new_for_testing(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            leeway_secs: 0,
        }
    }

    /// Validates a token and returns its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = self.leeway_secs;
        validation.validate_exp = true;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::DecodingError(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    const TEST_SECRET: &str = "test-secret-not-for-production";

    fn make_token(exp_offset_secs: i64) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: (now + Duration::seconds(exp_offset_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            email: "player@example.com".to_string(),
            name: Some("Player One".to_string()),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_validate_valid_token() {
        let validator = TokenValidator::new_for_testing(TEST_SECRET);
        let token = make_token(3600);

        let claims = validator.validate(&token).unwrap();
        assert_eq!(claims.email, "player@example.com");
        assert_eq!(claims.name.as_deref(), Some("Player One"));
    }

    #[test]
    fn test_validate_expired_token() {
        let validator = TokenValidator::new_for_testing(TEST_SECRET);
        let token = make_token(-3600);

        let err = validator.validate(&token).unwrap_err();
        assert!(matches!(err, TokenError::TokenExpired));
    }

    #[test]
    fn test_validate_wrong_secret() {
        let validator = TokenValidator::new_for_testing("some-other-secret");
        let token = make_token(3600);

        let err = validator.validate(&token).unwrap_err();
        assert!(matches!(err, TokenError::DecodingError(_)));
    }

    #[test]
    fn test_validate_garbage_token() {
        let validator = TokenValidator::new_for_testing(TEST_SECRET);
        let err = validator.validate("not-a-token").unwrap_err();
        assert!(matches!(err, TokenError::DecodingError(_)));
    }

    #[test]
    fn test_invalid_public_key_rejected() {
        let result = TokenValidator::new("not a pem key");
        assert!(matches!(result, Err(TokenError::InvalidKey(_))));
    }

    #[test]
    fn test_debug_redacts_key() {
        let validator = TokenValidator::new_for_testing(TEST_SECRET);
        let debug = format!("{:?}", validator);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(TEST_SECRET));
    }
}
