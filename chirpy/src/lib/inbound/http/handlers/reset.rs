use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::state::AppState;

/// Delete every chirp, refresh token and user. Only allowed on the dev
/// platform.
pub async fn reset(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ResetResponseData>, ApiError> {
    if !state.is_dev() {
        tracing::warn!(platform = %state.platform, "Reset refused");
        return Err(ApiError::Forbidden(
            "Reset is only allowed in dev environment".to_string(),
        ));
    }

    state.chirp_service.reset_chirps().await?;
    state.session_service.reset_sessions().await?;
    state.user_service.reset_users().await?;

    tracing::info!("Application state reset");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetResponseData {
            message: "Reset complete".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetResponseData {
    pub message: String,
}
