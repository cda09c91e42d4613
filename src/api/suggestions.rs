use crate::api::AppState;
use crate::api::schemas::suggestions::SuggestionsResponse;
use crate::error::Result;
use axum::{Json, extract::State, response::IntoResponse};

/// Returns suggested message prompts from the generative-text service.
///
/// Takes no request body; any body sent by a client is ignored.
pub async fn suggest_messages(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let suggestions = state.suggestion_service.suggest().await?;
    Ok(Json(SuggestionsResponse { success: true, suggestions }))
}
