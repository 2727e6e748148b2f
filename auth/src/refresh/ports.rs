use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use super::errors::StoreError;
use super::models::RefreshToken;

/// Durable keyed storage for refresh token records.
///
/// Implementations must make each single-row write atomic; the service adds
/// no locking of its own.
#[async_trait]
pub trait TokenStore: Send + Sync + 'static {
    /// Insert a new record.
    ///
    /// # Errors
    /// * `Duplicate` - A record with the same token already exists
    /// * `Database` - Storage operation failed
    async fn put(&self, record: RefreshToken) -> Result<(), StoreError>;

    /// Retrieve a record by exact token match.
    ///
    /// # Returns
    /// Optional record (None if not found)
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn get(&self, token: &str) -> Result<Option<RefreshToken>, StoreError>;

    /// Mark a record revoked at `at`.
    ///
    /// A record that is already revoked keeps its original `revoked_at` but is
    /// still counted as affected.
    ///
    /// # Returns
    /// Number of matching records (0 or 1)
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn set_revoked(&self, token: &str, at: DateTime<Utc>) -> Result<u64, StoreError>;

    /// Remove every record.
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn delete_all(&self) -> Result<(), StoreError>;
}
