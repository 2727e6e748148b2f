use thiserror::Error;

/// Error reported by a [`TokenStore`](super::ports::TokenStore) implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Refresh token already exists")]
    Duplicate,

    #[error("Database error: {0}")]
    Database(String),
}

/// Error type for refresh token lifecycle operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    #[error("Refresh token not found")]
    NotFound,

    #[error("Refresh token is expired")]
    Expired,

    #[error("Refresh token has been revoked")]
    Revoked,

    #[error("Token store error: {0}")]
    Store(#[from] StoreError),
}
