use std::sync::Arc;

use async_trait::async_trait;
use auth::Account;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::TokenStore;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::Session;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Domain service implementation for session operations.
pub struct SessionService<UR, TS>
where
    UR: UserRepository,
    TS: TokenStore + ?Sized,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator<TS>>,
}

impl<UR, TS> SessionService<UR, TS>
where
    UR: UserRepository,
    TS: TokenStore + ?Sized,
{
    /// Create a new session service.
    ///
    /// # Arguments
    /// * `repository` - User lookup for credential checks
    /// * `authenticator` - Password, access token and refresh token handling
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator<TS>>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR, TS> SessionServicePort for SessionService<UR, TS>
where
    UR: UserRepository,
    TS: TokenStore + ?Sized,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let user = match EmailAddress::new(command.email) {
            Ok(email) => self.repository.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            tracing::info!("Login rejected");
            let err = self
                .authenticator
                .login(&command.password, None)
                .await
                .err()
                .unwrap_or(AuthenticationError::InvalidCredentials);
            return Err(err.into());
        };

        let account = Account {
            subject: user.id.0,
            password_hash: &user.password_hash,
        };
        let tokens = self
            .authenticator
            .login(&command.password, Some(account))
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session::new(user, tokens))
    }

    async fn start_session(&self, user: User) -> Result<Session, SessionError> {
        let tokens = self.authenticator.issue_tokens(user.id.0).await?;
        Ok(Session::new(user, tokens))
    }

    async fn authenticate(&self, authorization: Option<&str>) -> Result<UserId, SessionError> {
        let subject = self.authenticator.authenticate(authorization)?;
        Ok(UserId(subject))
    }

    async fn refresh(&self, authorization: Option<&str>) -> Result<String, SessionError> {
        Ok(self.authenticator.refresh(authorization).await?)
    }

    async fn revoke(&self, authorization: Option<&str>) -> Result<(), SessionError> {
        self.authenticator.revoke(authorization).await?;
        tracing::info!("Refresh token revoked");
        Ok(())
    }

    async fn reset_sessions(&self) -> Result<(), SessionError> {
        Ok(self.authenticator.reset_refresh_tokens().await?)
    }
}
