use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use crate::inbound::http::middleware::authorization_header;
use crate::inbound::http::state::AppState;

/// Revoke the refresh token bearer. Answers 204 with no body.
pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let authorization = authorization_header(&headers)?;
    state.session_service.revoke(authorization).await?;

    Ok(StatusCode::NO_CONTENT)
}
