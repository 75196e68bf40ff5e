/**
 * Session Tokens
 *
 * This module issues and verifies the HS256 JWTs handed out by login.
 * Tokens carry the account's internal id as `sub`, expire 7 days after
 * issue, and include a random `jti` so two logins never produce the same
 * token string.
 */

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Fixed token lifetime
pub const TOKEN_TTL_DAYS: i64 = 7;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account ID
    pub sub: String,
    /// Unique token ID
    pub jti: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token rejected: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("invalid account id in token: {0}")]
    Subject(#[from] uuid::Error),
}

/// Signing and verification keys derived from the server secret
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
            ttl: Duration::days(TOKEN_TTL_DAYS),
        }
    }

    /// Create a token for an account, issued now
    pub fn issue(&self, account_id: Uuid) -> Result<String, TokenError> {
        self.issue_at(account_id, Utc::now())
    }

    /// Create a token as if issued at `issued_at`
    pub fn issue_at(&self, account_id: Uuid, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: account_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            exp: (issued_at + self.ttl).timestamp(),
            iat: issued_at.timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verify signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Verify a token and extract the account ID
    pub fn account_id(&self, token: &str) -> Result<Uuid, TokenError> {
        let claims = self.verify(token)?;
        Ok(Uuid::parse_str(&claims.sub)?)
    }
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
