use thiserror::Error;

/// Error for ChirpBody validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChirpBodyError {
    #[error("Chirp is too long ({0} characters)")]
    TooLong(usize),
}

/// Top-level error for all chirp-related operations
#[derive(Debug, Clone, Error)]
pub enum ChirpError {
    #[error("Invalid chirp: {0}")]
    InvalidBody(#[from] ChirpBodyError),

    #[error("Author not found: {0}")]
    AuthorNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
