use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::sync::RwLock;
use uuid::Uuid;

use crate::config;

/// Claims carried by an admin session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    /// Token id, used for server-side revocation on logout.
    pub jti: Uuid,
    /// Whether the client asked for a long-lived session.
    pub remember: bool,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(remember: bool) -> Self {
        let now = Utc::now();
        let security = &config::config().security;
        let lifetime = if remember {
            Duration::days(security.remember_expiry_days as i64)
        } else {
            Duration::hours(security.session_expiry_hours as i64)
        };

        Self {
            sub: "admin".to_string(),
            jti: Uuid::new_v4(),
            remember,
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
        }
    }

    pub fn expires_in_secs(&self) -> i64 {
        self.exp - self.iat
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Token has been revoked")]
    Revoked,
    #[error("Admin credentials not configured")]
    NotConfigured,
}

/// Verify the submitted staff password against the configured SHA-256
/// digest. Exact comparison on the plaintext: case-sensitive, no trimming,
/// so "secret " and "SECRET" both fail for a configured "secret".
pub fn verify_password(submitted: &str) -> Result<bool, AuthError> {
    let expected = &config::config().security.admin_password_sha256;
    if expected.is_empty() {
        return Err(AuthError::NotConfigured);
    }

    Ok(sha256_hex(submitted) == expected.to_lowercase())
}

pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn generate_token(claims: &Claims) -> Result<String, AuthError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(AuthError::NotConfigured);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
}

/// Validate signature and expiry, then check the revocation set.
pub fn validate_token(token: &str) -> Result<Claims, AuthError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(AuthError::NotConfigured);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    if is_revoked(&token_data.claims.jti) {
        return Err(AuthError::Revoked);
    }

    Ok(token_data.claims)
}

// Revoked token ids, per-process. A restart forgets revocations; tokens
// still expire on their own.
static REVOKED: Lazy<RwLock<HashSet<Uuid>>> = Lazy::new(|| RwLock::new(HashSet::new()));

pub fn revoke(jti: Uuid) {
    REVOKED.write().expect("revocation set poisoned").insert(jti);
}

pub fn is_revoked(jti: &Uuid) -> bool {
    REVOKED.read().expect("revocation set poisoned").contains(jti)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configure() {
        // sha256("correct-secret")
        std::env::set_var("ADMIN_PASSWORD_SHA256", sha256_hex("correct-secret"));
        std::env::set_var("ADMIN_JWT_SECRET", "test-signing-key");
        let _ = config::config();
    }

    #[test]
    fn password_check_is_exact() {
        configure();
        assert!(verify_password("correct-secret").unwrap());
        assert!(!verify_password("correct-secret ").unwrap());
        assert!(!verify_password(" correct-secret").unwrap());
        assert!(!verify_password("Correct-Secret").unwrap());
        assert!(!verify_password("").unwrap());
        assert!(!verify_password("wrong").unwrap());
    }

    #[test]
    fn token_round_trip() {
        configure();
        let claims = Claims::new(false);
        let token = generate_token(&claims).unwrap();
        let decoded = validate_token(&token).unwrap();
        assert_eq!(decoded.jti, claims.jti);
        assert_eq!(decoded.sub, "admin");
        assert!(!decoded.remember);
    }

    #[test]
    fn remember_extends_expiry() {
        configure();
        let session = Claims::new(false);
        let remembered = Claims::new(true);
        assert!(remembered.expires_in_secs() > session.expires_in_secs());
    }

    #[test]
    fn revoked_token_is_rejected() {
        configure();
        let claims = Claims::new(false);
        let token = generate_token(&claims).unwrap();
        assert!(validate_token(&token).is_ok());

        revoke(claims.jti);
        assert!(matches!(validate_token(&token), Err(AuthError::Revoked)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        configure();
        assert!(matches!(
            validate_token("not-a-token"),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
