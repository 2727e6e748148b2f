use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;
use rand::RngCore;
use uuid::Uuid;

use super::errors::RefreshTokenError;
use super::models::RefreshToken;
use super::models::RefreshTokenState;
use super::ports::TokenStore;

/// Default lifetime of a refresh token.
pub const DEFAULT_REFRESH_TOKEN_WINDOW_DAYS: i64 = 60;

/// Random bytes drawn per token (hex-encoded to twice as many characters).
const TOKEN_BYTES: usize = 32;

/// Generate a fresh opaque refresh token without persisting it.
///
/// # Returns
/// 64 lowercase hex characters encoding 32 bytes from the thread-local CSPRNG
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Refresh token lifecycle service.
///
/// Tokens are Active until they expire or are revoked; both terminal states
/// are permanent.
pub struct RefreshTokenService<S>
where
    S: TokenStore + ?Sized,
{
    store: Arc<S>,
    window: Duration,
}

impl<S> RefreshTokenService<S>
where
    S: TokenStore + ?Sized,
{
    /// Create a refresh token service.
    ///
    /// # Arguments
    /// * `store` - Token persistence implementation
    /// * `window` - Lifetime applied to every created token
    pub fn new(store: Arc<S>, window: Duration) -> Self {
        Self { store, window }
    }

    /// Create and persist a refresh token for `user_id`.
    ///
    /// The token must not be handed out unless this returns `Ok`.
    ///
    /// # Errors
    /// * `Store` - Persistence failed
    pub async fn create(&self, user_id: Uuid) -> Result<RefreshToken, RefreshTokenError> {
        let now = Utc::now();
        let record = RefreshToken {
            token: generate_token(),
            user_id,
            created_at: now,
            updated_at: now,
            expires_at: now + self.window,
            revoked_at: None,
        };

        self.store.put(record.clone()).await.map_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "Failed to persist refresh token");
            RefreshTokenError::from(e)
        })?;

        tracing::debug!(
            user_id = %user_id,
            expires_at = %record.expires_at,
            "Refresh token created"
        );

        Ok(record)
    }

    /// Resolve a token to its owner.
    ///
    /// Never mutates the record; repeated validation of an active token keeps
    /// succeeding.
    ///
    /// # Errors
    /// * `NotFound` - No record for this token
    /// * `Revoked` - Token was revoked
    /// * `Expired` - Token is past its expiry
    /// * `Store` - Lookup failed
    pub async fn validate(&self, token: &str) -> Result<Uuid, RefreshTokenError> {
        let record = self.store.get(token).await?.ok_or_else(|| {
            tracing::warn!("Refresh token not found");
            RefreshTokenError::NotFound
        })?;

        match record.state_at(Utc::now()) {
            RefreshTokenState::Active => Ok(record.user_id),
            RefreshTokenState::Revoked => {
                tracing::warn!(user_id = %record.user_id, "Attempt to use revoked refresh token");
                Err(RefreshTokenError::Revoked)
            }
            RefreshTokenState::Expired => {
                tracing::info!(user_id = %record.user_id, "Refresh token expired");
                Err(RefreshTokenError::Expired)
            }
        }
    }

    /// Revoke a token.
    ///
    /// Revoking an already revoked token succeeds and keeps the first
    /// revocation time.
    ///
    /// # Errors
    /// * `NotFound` - No record for this token
    /// * `Store` - Update failed
    pub async fn revoke(&self, token: &str) -> Result<(), RefreshTokenError> {
        let affected = self.store.set_revoked(token, Utc::now()).await?;

        if affected == 0 {
            tracing::warn!("Attempt to revoke unknown refresh token");
            return Err(RefreshTokenError::NotFound);
        }

        Ok(())
    }

    /// Delete every stored token.
    ///
    /// Administrative; callers restrict this to non-production platforms.
    ///
    /// # Errors
    /// * `Store` - Deletion failed
    pub async fn reset_all(&self) -> Result<(), RefreshTokenError> {
        self.store.delete_all().await?;
        tracing::info!("All refresh tokens deleted");
        Ok(())
    }
}
