use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates the bearer access token and adds the caller's
/// identity to request extensions
pub async fn require_access_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = authorization_header(req.headers())?;
    let user_id = state.session_service.authenticate(authorization).await?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

/// Raw `Authorization` header value, or an empty string when absent.
pub fn authorization_header(headers: &HeaderMap) -> Result<&str, ApiError> {
    match headers.get(header::AUTHORIZATION) {
        None => Ok(""),
        Some(value) => value.to_str().map_err(|_| {
            tracing::warn!("Authorization header is not valid UTF-8");
            ApiError::unauthorized()
        }),
    }
}
