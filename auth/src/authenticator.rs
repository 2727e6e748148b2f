use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use crate::bearer::extract_bearer;
use crate::bearer::BearerError;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::RefreshTokenError;
use crate::refresh::RefreshTokenService;
use crate::refresh::TokenStore;

/// Plaintext checked against the decoy hash when no account matches a login.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Authentication coordinator combining password verification, access tokens
/// and refresh tokens.
pub struct Authenticator<S>
where
    S: TokenStore + ?Sized,
{
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    refresh_tokens: RefreshTokenService<S>,
    access_token_ttl: Duration,
    decoy_hash: String,
}

/// Stored credentials of the account a login attempt targets.
#[derive(Debug, Clone, Copy)]
pub struct Account<'a> {
    pub subject: Uuid,
    pub password_hash: &'a str,
}

/// Tokens handed to a client after login or account update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Signed short-lived access token
    pub access_token: String,
    /// Opaque store-backed refresh token
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),

    #[error("Bearer error: {0}")]
    Bearer(#[from] BearerError),

    #[error("Refresh token error: {0}")]
    RefreshToken(#[from] RefreshTokenError),
}

impl AuthenticationError {
    /// Whether the failure is the caller's fault (bad credential or token)
    /// rather than an internal fault.
    ///
    /// Every unauthorized failure should be reported identically to clients.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            AuthenticationError::InvalidCredentials | AuthenticationError::Bearer(_) => true,
            AuthenticationError::Jwt(err) => !matches!(err, JwtError::SigningFailed(_)),
            AuthenticationError::RefreshToken(err) => {
                !matches!(err, RefreshTokenError::Store(_))
            }
        }
    }
}

impl<S> Authenticator<S>
where
    S: TokenStore + ?Sized,
{
    /// Create a new authenticator hashing at the default bcrypt cost.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for access token signing
    /// * `token_store` - Refresh token persistence
    /// * `access_token_ttl` - Lifetime of issued access tokens
    /// * `refresh_token_window` - Lifetime of created refresh tokens
    ///
    /// # Errors
    /// * `HashingFailed` - The decoy hash could not be computed
    pub fn new(
        jwt_secret: &[u8],
        token_store: Arc<S>,
        access_token_ttl: Duration,
        refresh_token_window: Duration,
    ) -> Result<Self, PasswordError> {
        Self::with_password_hasher(
            PasswordHasher::new(),
            jwt_secret,
            token_store,
            access_token_ttl,
            refresh_token_window,
        )
    }

    /// Create an authenticator with a custom password hasher.
    ///
    /// The decoy hash for unknown accounts is computed here, at the hasher's
    /// cost, so a hasher that cannot hash is rejected up front.
    ///
    /// # Errors
    /// * `HashingFailed` - The hasher is unusable (e.g. cost out of range)
    pub fn with_password_hasher(
        password_hasher: PasswordHasher,
        jwt_secret: &[u8],
        token_store: Arc<S>,
        access_token_ttl: Duration,
        refresh_token_window: Duration,
    ) -> Result<Self, PasswordError> {
        let decoy_hash = password_hasher.hash(DECOY_PASSWORD)?;

        Ok(Self {
            password_hasher,
            jwt_handler: JwtHandler::new(jwt_secret),
            refresh_tokens: RefreshTokenService::new(token_store, refresh_token_window),
            access_token_ttl,
            decoy_hash,
        })
    }

    /// Verify credentials and issue a token pair.
    ///
    /// A missing account, a wrong password and an unusable stored hash all
    /// fail identically. When the account is missing the decoy hash is
    /// verified instead, so every path costs one bcrypt verification.
    ///
    /// # Arguments
    /// * `password` - Plaintext password supplied by the caller
    /// * `account` - Stored credentials, `None` if no account matched
    ///
    /// # Errors
    /// * `InvalidCredentials` - No account, or the password does not match
    /// * `RefreshToken` - Refresh token could not be persisted
    /// * `Jwt` - Access token signing failed
    pub async fn login(
        &self,
        password: &str,
        account: Option<Account<'_>>,
    ) -> Result<TokenPair, AuthenticationError> {
        let Some(account) = account else {
            // Always a mismatch; only the elapsed time matters.
            let _ = self.password_hasher.verify(password, &self.decoy_hash);
            return Err(AuthenticationError::InvalidCredentials);
        };

        match self.password_hasher.verify(password, account.password_hash) {
            Ok(()) => {}
            Err(PasswordError::Mismatch) => {
                tracing::info!(user_id = %account.subject, "Password mismatch on login");
                return Err(AuthenticationError::InvalidCredentials);
            }
            Err(err) => {
                tracing::error!(user_id = %account.subject, error = %err, "Stored password hash is unusable");
                return Err(AuthenticationError::InvalidCredentials);
            }
        }

        self.issue_tokens(account.subject).await
    }

    /// Issue a token pair without password verification.
    ///
    /// Used after the caller has been authenticated by other means, such as an
    /// account update carrying a valid access token.
    ///
    /// # Errors
    /// * `RefreshToken` - Refresh token could not be persisted
    /// * `Jwt` - Access token signing failed
    pub async fn issue_tokens(&self, subject: Uuid) -> Result<TokenPair, AuthenticationError> {
        let refresh_token = self.refresh_tokens.create(subject).await?;
        let access_token = self.issue_access_token(subject)?;

        Ok(TokenPair {
            access_token,
            refresh_token: refresh_token.token,
        })
    }

    fn issue_access_token(&self, subject: Uuid) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, self.access_token_ttl)
    }

    /// Resolve the access token carried in an `Authorization` header.
    ///
    /// # Errors
    /// * `Bearer` - Header missing or not a bearer credential
    /// * `Jwt` - Access token invalid or expired
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Uuid, AuthenticationError> {
        let token = extract_bearer(authorization)?;
        Ok(self.jwt_handler.verify(token)?)
    }

    /// Exchange the refresh token carried in an `Authorization` header for a
    /// new access token bound to the same subject.
    ///
    /// # Errors
    /// * `Bearer` - Header missing or not a bearer credential
    /// * `RefreshToken` - Token unknown, revoked, expired, or lookup failed
    /// * `Jwt` - Access token signing failed
    pub async fn refresh(&self, authorization: Option<&str>) -> Result<String, AuthenticationError> {
        let token = extract_bearer(authorization)?;
        let subject = self.refresh_tokens.validate(token).await?;
        Ok(self.issue_access_token(subject)?)
    }

    /// Revoke the refresh token carried in an `Authorization` header.
    ///
    /// # Errors
    /// * `Bearer` - Header missing or not a bearer credential
    /// * `RefreshToken` - Token unknown, or update failed
    pub async fn revoke(&self, authorization: Option<&str>) -> Result<(), AuthenticationError> {
        let token = extract_bearer(authorization)?;
        Ok(self.refresh_tokens.revoke(token).await?)
    }

    /// Delete every refresh token.
    ///
    /// # Errors
    /// * `RefreshToken` - Deletion failed
    pub async fn reset_refresh_tokens(&self) -> Result<(), AuthenticationError> {
        Ok(self.refresh_tokens.reset_all().await?)
    }
}
