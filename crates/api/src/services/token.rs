//! Bearer-token issuance and verification.
//!
//! Tokens are HS256 JWTs whose subject is the user ID. They are stateless;
//! logout is purely client-side (drop the token).

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vastra_core::UserId;

/// Token lifetime.
const TOKEN_TTL_DAYS: i64 = 30;

/// Errors from token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token is malformed, has a bad signature, or has expired.
    #[error("invalid token")]
    Invalid,

    /// Encoding failed (effectively unreachable with HS256).
    #[error("token encoding failed: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i32,
    iat: i64,
    exp: i64,
}

/// Issues and verifies signed bearer tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Create a token service from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
        }
    }

    /// Issue a token for a user, valid for 30 days.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if signing fails.
    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.as_i32(),
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Verify a token and return the user ID it was issued for.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` for any malformed, tampered, or
    /// expired token.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| TokenError::Invalid)?;

        Ok(UserId::new(data.claims.sub))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&SecretString::from("test-signing-secret-0123456789"))
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let svc = service();
        let token = svc.issue(UserId::new(42)).unwrap();
        assert_eq!(svc.verify(&token).unwrap().as_i32(), 42);
    }

    #[test]
    fn test_garbage_rejected() {
        let svc = service();
        assert!(matches!(
            svc.verify("not.a.token"),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue(UserId::new(1)).unwrap();
        let other = TokenService::new(&SecretString::from("another-secret-entirely-9876"));
        assert!(matches!(other.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let svc = service();
        let token = svc.issue(UserId::new(1)).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let tampered_payload = "eyJzdWIiOjk5OSwiaWF0IjowLCJleHAiOjk5OTk5OTk5OTl9";
        parts[1] = tampered_payload;
        let tampered = parts.join(".");
        assert!(svc.verify(&tampered).is_err());
    }
}
