pub mod errors;
pub mod models;
pub mod ports;
pub mod service;

pub use errors::RefreshTokenError;
pub use errors::StoreError;
pub use models::RefreshToken;
pub use models::RefreshTokenState;
pub use ports::TokenStore;
pub use service::generate_token;
pub use service::RefreshTokenService;
pub use service::DEFAULT_REFRESH_TOKEN_WINDOW_DAYS;
