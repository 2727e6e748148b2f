//! Authentication and session token library
//!
//! Provides the authentication core of the chirpy service:
//! - Password hashing (bcrypt, cost 10)
//! - Signed access tokens (HS256 JWT with a fixed claim set)
//! - Bearer credential extraction
//! - Opaque refresh tokens persisted through a [`TokenStore`]
//! - Authentication coordination
//!
//! Storage is not part of this crate; services implement [`TokenStore`] on top
//! of their own persistence.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("chirpy").unwrap();
//! assert!(hasher.verify("chirpy", &hash).is_ok());
//! assert!(hasher.verify("wrong", &hash).is_err());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = handler.issue(user_id, Duration::hours(1)).unwrap();
//! assert_eq!(handler.verify(&token).unwrap(), user_id);
//! ```
//!
//! ## Bearer Credentials
//! ```
//! use auth::extract_bearer;
//!
//! assert_eq!(extract_bearer(Some("Bearer abc123")).unwrap(), "abc123");
//! assert!(extract_bearer(Some("Basic abc123")).is_err());
//! ```

pub mod authenticator;
pub mod bearer;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::Account;
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use bearer::extract_bearer;
pub use bearer::BearerError;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::RefreshToken;
pub use refresh::RefreshTokenError;
pub use refresh::RefreshTokenService;
pub use refresh::StoreError;
pub use refresh::TokenStore;
