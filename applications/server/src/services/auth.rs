/// Authentication service - bearer token issuing and verification
use crate::error::{Result, ServerError};
use cadence_core::UserId;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issues and verifies HS256 bearer tokens
///
/// User accounts live with the identity provider; the server only trusts the
/// `sub` claim of a token signed with the shared secret.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiration: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
}

/// Longest token lifetime accepted (ten years)
pub const MAX_TOKEN_EXPIRATION_HOURS: u64 = 24 * 365 * 10;

impl AuthService {
    /// Lifetimes above [`MAX_TOKEN_EXPIRATION_HOURS`] are clamped to it
    pub fn new(secret: &str, expiration_hours: u64) -> Self {
        let hours = expiration_hours.min(MAX_TOKEN_EXPIRATION_HOURS) as i64;
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiration: Duration::hours(hours),
        }
    }

    /// Create a signed token for the user
    pub fn create_token(&self, user_id: &UserId) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.as_str().to_string(),
            exp: (now + self.token_expiration).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(ServerError::from)
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Verify a token and return the user it was issued to
    pub fn verify_user(&self, token: &str) -> Result<UserId> {
        let claims = self.verify_token(token)?;
        if claims.sub.trim().is_empty() {
            return Err(ServerError::Auth("Token has no subject".to_string()));
        }
        Ok(UserId::new(claims.sub))
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("token_expiration", &self.token_expiration)
            .finish_non_exhaustive()
    }
}
