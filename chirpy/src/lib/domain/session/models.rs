use crate::domain::user::models::User;

/// Command to log in with an email/password pair.
///
/// The email is kept raw so a malformed address fails exactly like an
/// unknown one.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Authenticated user together with freshly issued tokens.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

impl Session {
    pub fn new(user: User, tokens: auth::TokenPair) -> Self {
        Self {
            user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}
