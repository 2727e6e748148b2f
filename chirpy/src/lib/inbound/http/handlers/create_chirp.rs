use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ChirpResponseData;
use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::ChirpBody;
use crate::domain::chirp::models::CreateChirpCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::state::AppState;

/// Post a chirp owned by the caller.
///
/// The author always comes from the access token; the request body cannot
/// name one.
pub async fn create_chirp(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Json(body): Json<CreateChirpRequest>,
) -> Result<ApiSuccess<ChirpResponseData>, ApiError> {
    let command = body.try_into_command(caller.user_id)?;

    state
        .chirp_service
        .create_chirp(command)
        .await
        .map_err(ApiError::from)
        .map(|ref chirp| ApiSuccess::new(StatusCode::CREATED, chirp.into()))
}

/// HTTP request body for posting a chirp (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateChirpRequest {
    body: String,
}

impl CreateChirpRequest {
    fn try_into_command(self, author: UserId) -> Result<CreateChirpCommand, ChirpError> {
        Ok(CreateChirpCommand {
            body: ChirpBody::new(self.body)?,
            author,
        })
    }
}
