use crate::api::AppState;
use crate::api::schemas::Ack;
use crate::api::schemas::auth::{SignIn, SignInResponse, SignUp, VerifyCode};
use crate::domain::validation;
use crate::error::{AppError, Result};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// Registers an account and emails its verification code.
///
/// # Errors
/// `AppError::Conflict` when a verified user holds the username or email;
/// `AppError::Upstream` when the email cannot be sent (the record stays).
pub async fn sign_up(State(state): State<AppState>, Json(payload): Json<SignUp>) -> Result<impl IntoResponse> {
    validation::validate_username(&payload.username).map_err(AppError::Validation)?;
    validation::validate_email(&payload.email).map_err(AppError::Validation)?;
    validation::validate_password(&payload.password).map_err(AppError::Validation)?;

    state.account_service.sign_up(&payload.username, &payload.email, &payload.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(Ack::ok("User registered. Please check your email to verify your account")),
    ))
}

/// Marks an account verified when the submitted code matches and has not
/// expired.
pub async fn verify_code(
    State(state): State<AppState>,
    Json(payload): Json<VerifyCode>,
) -> Result<impl IntoResponse> {
    state.account_service.verify_code(&payload.username, &payload.code).await?;
    Ok(Json(Ack::ok("Account verified successfully")))
}

pub async fn sign_in(State(state): State<AppState>, Json(payload): Json<SignIn>) -> Result<impl IntoResponse> {
    let session = state.account_service.sign_in(&payload.identifier, &payload.password).await?;

    Ok(Json(SignInResponse {
        success: true,
        message: "Signed in".to_string(),
        token: session.token,
        expires_at: session.expires_at,
    }))
}
