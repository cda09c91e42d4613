use crate::api::AppState;
use crate::api::middleware::AuthUser;
use crate::api::schemas::Ack;
use crate::api::schemas::messages::{MessagesResponse, SendMessage};
use crate::domain::validation;
use crate::error::{AppError, Result};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// Accepts an anonymous message for the named user. No authentication.
///
/// # Errors
/// `AppError::NotFound` for an unknown username; `AppError::Forbidden` when
/// the target has message acceptance turned off.
pub async fn send_message(
    State(state): State<AppState>,
    Json(payload): Json<SendMessage>,
) -> Result<impl IntoResponse> {
    validation::validate_message_content(&payload.content).map_err(AppError::Validation)?;

    state.message_service.send_to_username(&payload.username, &payload.content).await?;

    Ok((StatusCode::CREATED, Json(Ack::ok("Message sent successfully"))))
}

/// Lists the caller's received messages, most recent first.
pub async fn get_messages(auth_user: AuthUser, State(state): State<AppState>) -> Result<impl IntoResponse> {
    let messages = state.message_service.list_for_user(auth_user.user_id).await?;

    Ok(Json(MessagesResponse {
        success: true,
        messages: messages.into_iter().map(Into::into).collect(),
    }))
}

/// Deletes one of the caller's messages by id.
pub async fn delete_message(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(message_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.message_service.delete_message(auth_user.user_id, message_id).await?;
    Ok(Json(Ack::ok("Message deleted")))
}
