use crate::api::AppState;
use crate::api::middleware::AuthUser;
use crate::api::schemas::Ack;
use crate::api::schemas::users::{AcceptMessagesResponse, SetAcceptMessages, UsernameQuery};
use crate::domain::validation;
use crate::error::{AppError, Result};
use axum::{Json, extract::Query, extract::State, response::IntoResponse};

/// Reports whether a username is free. Only verified holders block a name.
pub async fn check_username_unique(
    State(state): State<AppState>,
    Query(params): Query<UsernameQuery>,
) -> Result<impl IntoResponse> {
    validation::validate_username(&params.username).map_err(AppError::Validation)?;

    if state.account_service.is_username_taken(&params.username).await? {
        return Err(AppError::Conflict("Username is already taken".to_string()));
    }

    Ok(Json(Ack::ok("Username is unique")))
}

pub async fn get_accept_messages(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let accepting = state.account_service.is_accepting_messages(auth_user.user_id).await?;

    Ok(Json(AcceptMessagesResponse { success: true, is_accepting_messages: accepting }))
}

pub async fn set_accept_messages(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<SetAcceptMessages>,
) -> Result<impl IntoResponse> {
    state
        .account_service
        .set_accepting_messages(auth_user.user_id, payload.accept_messages)
        .await?;

    Ok(Json(AcceptMessagesResponse {
        success: true,
        is_accepting_messages: payload.accept_messages,
    }))
}
