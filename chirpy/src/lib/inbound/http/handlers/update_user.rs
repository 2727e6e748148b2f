use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SessionResponseData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateUserCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::state::AppState;
use crate::user::errors::UserError;

/// Update the caller's own email and password.
///
/// The response carries a fresh token pair for the updated account.
pub async fn update_user(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Json(body): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let command = body.try_into_command()?;

    let user = state
        .user_service
        .update_user(&caller.user_id, command)
        .await?;
    let session = state.session_service.start_session(user).await?;

    Ok(ApiSuccess::new(StatusCode::OK, (&session).into()))
}

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateUserRequest {
    email: String,
    password: String,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        Ok(UpdateUserCommand {
            email: Some(EmailAddress::new(self.email)?),
            password: Some(self.password),
        })
    }
}
