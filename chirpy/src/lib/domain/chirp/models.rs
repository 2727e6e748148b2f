use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::chirp::errors::ChirpBodyError;
use crate::domain::user::models::UserId;

/// Maximum chirp length, counted in characters.
pub const MAX_CHIRP_LENGTH: usize = 140;

/// A short post owned by a user.
#[derive(Debug, Clone)]
pub struct Chirp {
    pub id: ChirpId,
    pub body: ChirpBody,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chirp unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChirpId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChirpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Chirp text, at most [`MAX_CHIRP_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

impl ChirpBody {
    /// Create a validated chirp body.
    ///
    /// # Errors
    /// * `TooLong` - Body exceeds the maximum length
    pub fn new(body: String) -> Result<Self, ChirpBodyError> {
        let length = body.chars().count();
        if length > MAX_CHIRP_LENGTH {
            return Err(ChirpBodyError::TooLong(length));
        }
        Ok(Self(body))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to post a chirp on behalf of an authenticated user
#[derive(Debug)]
pub struct CreateChirpCommand {
    pub body: ChirpBody,
    pub author: UserId,
}
