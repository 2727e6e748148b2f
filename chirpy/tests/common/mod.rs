use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::RefreshToken;
use auth::StoreError;
use auth::TokenStore;
use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use chirpy::chirp::errors::ChirpError;
use chirpy::chirp::models::Chirp;
use chirpy::chirp::models::ChirpId;
use chirpy::chirp::ports::ChirpRepository;
use chirpy::config::AuthConfig;
use chirpy::domain::user::models::EmailAddress;
use chirpy::domain::user::models::User;
use chirpy::domain::user::models::UserId;
use chirpy::domain::user::ports::UserRepository;
use chirpy::inbound::http::handlers::create_chirp::create_chirp;
use chirpy::inbound::http::handlers::create_user::create_user;
use chirpy::inbound::http::handlers::login::login;
use chirpy::inbound::http::handlers::refresh::refresh;
use chirpy::inbound::http::handlers::reset::reset;
use chirpy::inbound::http::handlers::revoke::revoke;
use chirpy::inbound::http::handlers::update_user::update_user;
use chirpy::inbound::http::AppState;
use chirpy::user::errors::UserError;
use chrono::DateTime;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// User repository backed by a map, enforcing unique emails.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    fn email_taken(users: &HashMap<UserId, User>, user: &User) -> bool {
        users
            .values()
            .any(|other| other.id != user.id && other.email == user.email)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if Self::email_taken(&users, &user) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        if Self::email_taken(&users, &user) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_all(&self) -> Result<(), UserError> {
        self.users.lock().unwrap().clear();
        Ok(())
    }
}

/// Token store backed by a map; the first revocation timestamp wins.
#[derive(Default)]
pub struct InMemoryTokenStore {
    records: Mutex<HashMap<String, RefreshToken>>,
}

impl InMemoryTokenStore {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn put(&self, record: RefreshToken) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&record.token) {
            return Err(StoreError::Duplicate);
        }
        records.insert(record.token.clone(), record);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<RefreshToken>, StoreError> {
        Ok(self.records.lock().unwrap().get(token).cloned())
    }

    async fn set_revoked(&self, token: &str, at: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut records = self.records.lock().unwrap();
        match records.get_mut(token) {
            Some(record) => {
                if record.revoked_at.is_none() {
                    record.revoked_at = Some(at);
                    record.updated_at = at;
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        self.records.lock().unwrap().clear();
        Ok(())
    }
}

/// Chirp repository backed by a map; authors must exist in the user map.
pub struct InMemoryChirpRepository {
    users: Arc<InMemoryUserRepository>,
    chirps: Mutex<HashMap<ChirpId, Chirp>>,
}

impl InMemoryChirpRepository {
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            users,
            chirps: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.chirps.lock().unwrap().len()
    }
}

#[async_trait]
impl ChirpRepository for InMemoryChirpRepository {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        if !self.users.users.lock().unwrap().contains_key(&chirp.user_id) {
            return Err(ChirpError::AuthorNotFound(chirp.user_id.to_string()));
        }
        self.chirps.lock().unwrap().insert(chirp.id, chirp.clone());
        Ok(chirp)
    }

    async fn delete_all(&self) -> Result<(), ChirpError> {
        self.chirps.lock().unwrap().clear();
        Ok(())
    }
}

/// Handlers mounted on a throwaway router over in-memory adapters.
pub struct TestApp {
    pub router: Router,
    pub tokens: Arc<InMemoryTokenStore>,
    pub chirps: Arc<InMemoryChirpRepository>,
}

/// Status and decoded JSON body (`Value::Null` when empty).
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn spawn() -> Self {
        Self::spawn_on("production")
    }

    pub fn spawn_on(platform: &str) -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let tokens = Arc::new(InMemoryTokenStore::default());
        let chirps = Arc::new(InMemoryChirpRepository::new(Arc::clone(&users)));
        let auth = AuthConfig {
            jwt_secret: JWT_SECRET.to_string(),
            access_token_ttl_seconds: 3600,
            refresh_token_ttl_days: 60,
            password_cost: 4,
        };
        let state = AppState::from_adapters(
            users,
            Arc::clone(&tokens),
            Arc::clone(&chirps),
            &auth,
            platform,
        )
        .expect("Failed to build app state");

        let router = Router::new()
            .route("/api/users", post(create_user).put(update_user))
            .route("/api/login", post(login))
            .route("/api/refresh", post(refresh))
            .route("/api/revoke", post(revoke))
            .route("/api/chirps", post(create_chirp))
            .route("/admin/reset", post(reset))
            .with_state(state);

        Self {
            router,
            tokens,
            chirps,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(authorization) = authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Failed to parse response")
        };

        TestResponse { status, body }
    }

    pub async fn create_user(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/api/users",
            None,
            Some(serde_json::json!({ "email": email, "password": password })),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/api/login",
            None,
            Some(serde_json::json!({ "email": email, "password": password })),
        )
        .await
    }

    pub async fn refresh(&self, refresh_token: &str) -> TestResponse {
        let authorization = format!("Bearer {}", refresh_token);
        self.request(Method::POST, "/api/refresh", Some(authorization.as_str()), None)
            .await
    }

    pub async fn revoke(&self, refresh_token: &str) -> TestResponse {
        let authorization = format!("Bearer {}", refresh_token);
        self.request(Method::POST, "/api/revoke", Some(authorization.as_str()), None)
            .await
    }

    pub async fn post_chirp(&self, access_token: Option<&str>, body: Value) -> TestResponse {
        let authorization = access_token.map(|token| format!("Bearer {}", token));
        self.request(
            Method::POST,
            "/api/chirps",
            authorization.as_deref(),
            Some(body),
        )
        .await
    }
}
