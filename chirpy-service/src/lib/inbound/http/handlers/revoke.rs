use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use crate::inbound::http::middleware::authorization_header;
use crate::inbound::http::router::AppState;

/// Revoke the bearer refresh token
pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let authorization = authorization_header(&headers)?;

    state.session_service.end_session(authorization).await?;

    Ok(StatusCode::NO_CONTENT)
}
