use thiserror::Error;

use crate::user::errors::UserError;

/// Top-level error for session operations
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Authentication failed: {0}")]
    Authentication(#[from] auth::AuthenticationError),

    #[error("User error: {0}")]
    User(#[from] UserError),
}

impl SessionError {
    /// Whether the failure must be reported as a generic "unauthorized".
    pub fn is_unauthorized(&self) -> bool {
        match self {
            SessionError::Authentication(err) => err.is_unauthorized(),
            SessionError::User(_) => false,
        }
    }
}
