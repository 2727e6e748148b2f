use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::JwtError;

/// Issuer stamped into every access token.
pub const ISSUER: &str = "chirpy";

/// Access token claims.
///
/// Every field is required; a token missing or mistyping any of them fails
/// to decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp, fractional with microsecond precision)
    pub iat: f64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject issued at `issued_at` and valid for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - User identifier
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    pub fn new(subject: Uuid, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let expires_at = issued_at + ttl;

        Self {
            iss: ISSUER.to_string(),
            sub: subject.to_string(),
            iat: numeric_date(issued_at),
            exp: expires_at.timestamp(),
        }
    }

    /// Parse the subject back into a user identifier.
    ///
    /// # Errors
    /// * `InvalidToken` - Subject is not a UUID
    pub fn subject(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub)
            .map_err(|e| JwtError::InvalidToken(format!("Invalid subject: {}", e)))
    }
}

/// Fractional NumericDate; tokens issued within the same second still differ.
fn numeric_date(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_micros() as f64 / 1_000_000.0
}
