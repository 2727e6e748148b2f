use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::state::AppState;

/// Identity of the caller, resolved from an access token bearer.
///
/// Handlers taking this extractor reject unauthenticated requests with the
/// uniform 401 before running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authorization = authorization_header(&parts.headers)?;
        let user_id = state.session_service.authenticate(authorization).await?;

        Ok(AuthenticatedUser { user_id })
    }
}

/// Raw `Authorization` header value, `None` when absent.
///
/// # Errors
/// Unauthorized when the value is not valid UTF-8.
pub fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, ApiError> {
    headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str())
        .transpose()
        .map_err(|_| {
            tracing::info!(reason = %auth::BearerError::MalformedHeader, "Authentication rejected");
            ApiError::unauthorized()
        })
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_authorization_header_absent() {
        assert_eq!(authorization_header(&HeaderMap::new()), Ok(None));
    }

    #[test]
    fn test_authorization_header_present() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));

        assert_eq!(authorization_header(&headers), Ok(Some("Bearer abc")));
    }

    #[test]
    fn test_authorization_header_not_utf8() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_bytes(b"Bearer \xff").unwrap());

        assert_eq!(authorization_header(&headers), Err(ApiError::unauthorized()));
    }
}
