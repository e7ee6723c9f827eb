use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html><body><h1>Welcome, Chirpy Admin</h1><p>Chirpy has been visited {} times!</p></body></html>",
        state.hits.get()
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetResponseData {
    pub status: String,
}

/// Delete all users and chirps and zero the hit counter. Development only.
pub async fn reset(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ResetResponseData>, ApiError> {
    state.admin_service.reset().await?;
    state.hits.reset();

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetResponseData {
            status: "ok".to_string(),
        },
    ))
}
