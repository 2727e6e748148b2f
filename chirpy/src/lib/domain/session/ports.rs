use async_trait::async_trait;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for session (authentication) operations.
///
/// `authorization` arguments are raw `Authorization` header values, `None`
/// when the header is absent.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify credentials and open a session.
    ///
    /// # Errors
    /// * `Authentication` - Unknown email or wrong password (indistinguishable),
    ///   or token issuance failed
    /// * `User` - User lookup failed
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;

    /// Open a session for an already authenticated user.
    ///
    /// # Errors
    /// * `Authentication` - Token issuance failed
    async fn start_session(&self, user: User) -> Result<Session, SessionError>;

    /// Resolve the access token in `authorization` to the current user.
    ///
    /// # Errors
    /// * `Authentication` - Missing, malformed, invalid or expired credential
    async fn authenticate(&self, authorization: Option<&str>) -> Result<UserId, SessionError>;

    /// Exchange the refresh token in `authorization` for a new access token.
    ///
    /// # Errors
    /// * `Authentication` - Missing, unknown, revoked or expired refresh token
    async fn refresh(&self, authorization: Option<&str>) -> Result<String, SessionError>;

    /// Revoke the refresh token in `authorization`.
    ///
    /// # Errors
    /// * `Authentication` - Missing or unknown refresh token
    async fn revoke(&self, authorization: Option<&str>) -> Result<(), SessionError>;

    /// Delete every refresh token.
    ///
    /// # Errors
    /// * `Authentication` - Token store failure
    async fn reset_sessions(&self) -> Result<(), SessionError>;
}
