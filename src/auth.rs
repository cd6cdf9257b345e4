// ABOUTME: JWT-based authentication and bcrypt password hashing
// ABOUTME: Issues bearer tokens with a 7-day default expiry and resolves them back to user ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication manager
//!
//! Credential failures surface with one uniform message regardless of
//! which part failed (unknown email, wrong password, expired or
//! malformed token), so the API never reveals which check tripped.

use chrono::{Duration, Utc};
use fittrack_core::errors::{AppError, AppResult};
use fittrack_core::models::User;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Default token lifetime: 7 days
pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 168;

/// Uniform message for every credential failure
const CREDENTIALS_MESSAGE: &str = "Could not validate credentials";

/// JWT claims for user authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    /// Expiration timestamp (seconds)
    pub exp: i64,
}

/// Issues and validates bearer tokens; hashes and verifies passwords
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry: Duration,
}

impl AuthManager {
    /// Create a manager from the shared secret and token lifetime
    #[must_use]
    pub fn new(jwt_secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret),
            decoding_key: DecodingKey::from_secret(jwt_secret),
            token_expiry: Duration::hours(token_expiry_hours),
        }
    }

    /// Hash a password with bcrypt
    ///
    /// # Errors
    ///
    /// Returns an internal error when hashing fails.
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Verify a password against its stored hash
    ///
    /// A malformed stored hash verifies as false rather than erroring,
    /// keeping the login failure path uniform.
    #[must_use]
    pub fn verify_password(&self, password: &str, password_hash: &str) -> bool {
        bcrypt::verify(password, password_hash).unwrap_or(false)
    }

    /// Issue a bearer token for a user
    ///
    /// # Errors
    ///
    /// Returns an internal error when token encoding fails.
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + self.token_expiry).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Token encoding failed: {e}")))
    }

    /// Resolve a bearer token back to its claims
    ///
    /// # Errors
    ///
    /// Returns a uniform authentication error for expired, malformed,
    /// or otherwise invalid tokens.
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|_| AppError::auth_invalid(CREDENTIALS_MESSAGE))
    }

    /// The uniform credential-failure error
    #[must_use]
    pub fn credentials_error() -> AppError {
        AppError::auth_invalid(CREDENTIALS_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "athlete@example.com".into(),
            password_hash: String::new(),
            name: "Athlete".into(),
            initial_weight_kg: None,
            height_cm: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let manager = AuthManager::new(b"test-secret", DEFAULT_TOKEN_EXPIRY_HOURS);
        let user = test_user();
        let token = manager.generate_token(&user).unwrap();
        let claims = manager.validate_token(&token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, user.email);
    }

    #[test]
    fn test_wrong_secret_rejected_uniformly() {
        let issuer = AuthManager::new(b"secret-a", DEFAULT_TOKEN_EXPIRY_HOURS);
        let verifier = AuthManager::new(b"secret-b", DEFAULT_TOKEN_EXPIRY_HOURS);
        let token = issuer.generate_token(&test_user()).unwrap();
        let err = verifier.validate_token(&token).unwrap_err();
        assert_eq!(err.message, "Could not validate credentials");
    }

    #[test]
    fn test_garbage_token_rejected() {
        let manager = AuthManager::new(b"test-secret", DEFAULT_TOKEN_EXPIRY_HOURS);
        assert!(manager.validate_token("not.a.token").is_err());
    }

    #[test]
    fn test_password_hash_and_verify() {
        let manager = AuthManager::new(b"test-secret", DEFAULT_TOKEN_EXPIRY_HOURS);
        let hash = manager.hash_password("SecurePass123!").unwrap();
        assert!(manager.verify_password("SecurePass123!", &hash));
        assert!(!manager.verify_password("wrong-password", &hash));
        assert!(!manager.verify_password("SecurePass123!", "not-a-hash"));
    }
}
