use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use auth::PasswordError;
use auth::TokenStore;
use sqlx::postgres::PgPoolOptions;

use crate::config::AuthConfig;
use crate::config::Config;
use crate::config::DEV_PLATFORM;
use crate::domain::chirp::ports::ChirpRepository;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::chirp::service::ChirpService;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::session::service::SessionService;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::PostgresChirpRepository;
use crate::outbound::repositories::PostgresTokenStore;
use crate::outbound::repositories::PostgresUserRepository;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub session_service: Arc<dyn SessionServicePort>,
    pub chirp_service: Arc<dyn ChirpServicePort>,
    pub platform: String,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserServicePort>,
        session_service: Arc<dyn SessionServicePort>,
        chirp_service: Arc<dyn ChirpServicePort>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            user_service,
            session_service,
            chirp_service,
            platform: platform.into(),
        }
    }

    /// Wire the domain services on top of the given persistence adapters.
    ///
    /// # Arguments
    /// * `users` - User persistence
    /// * `tokens` - Refresh token persistence
    /// * `chirps` - Chirp persistence
    /// * `auth` - Signing secret, token lifetimes and bcrypt cost
    /// * `platform` - Deployment platform name
    ///
    /// # Errors
    /// * `HashingFailed` - The configured bcrypt cost is unusable
    pub fn from_adapters<UR, TS, CR>(
        users: Arc<UR>,
        tokens: Arc<TS>,
        chirps: Arc<CR>,
        auth: &AuthConfig,
        platform: impl Into<String>,
    ) -> Result<Self, PasswordError>
    where
        UR: UserRepository,
        TS: TokenStore,
        CR: ChirpRepository,
    {
        let authenticator = Arc::new(Authenticator::with_password_hasher(
            auth.password_hasher(),
            auth.jwt_secret.as_bytes(),
            tokens,
            auth.access_token_ttl(),
            auth.refresh_token_window(),
        )?);

        let user_service = Arc::new(UserService::new(
            Arc::clone(&users),
            auth.password_hasher(),
        ));
        let session_service = Arc::new(SessionService::new(users, authenticator));
        let chirp_service = Arc::new(ChirpService::new(chirps));

        Ok(Self::new(
            user_service,
            session_service,
            chirp_service,
            platform,
        ))
    }

    /// Connect to Postgres and build the state from configuration.
    ///
    /// # Errors
    /// Returns an error when the database pool cannot be established or the
    /// password hashing configuration is unusable.
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database.url)
            .await
            .context("Failed to connect to Postgres")?;

        tracing::info!(
            max_connections = config.database.max_connections,
            platform = %config.platform,
            "Database pool ready"
        );

        Self::from_adapters(
            Arc::new(PostgresUserRepository::new(pool.clone())),
            Arc::new(PostgresTokenStore::new(pool.clone())),
            Arc::new(PostgresChirpRepository::new(pool)),
            &config.auth,
            config.platform.clone(),
        )
        .context("Invalid password hashing configuration")
    }

    /// Whether destructive administrative operations are permitted.
    pub fn is_dev(&self) -> bool {
        self.platform == DEV_PLATFORM
    }
}
