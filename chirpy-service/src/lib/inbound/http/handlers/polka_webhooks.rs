use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::inbound::http::middleware::authorization_header;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::models::UserId;

const USER_UPGRADED_EVENT: &str = "user.upgraded";

/// Event delivered by the payment provider
#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    event: String,
    data: WebhookData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    user_id: String,
}

/// Receive payment provider events. Only `user.upgraded` has an effect; other
/// events are acknowledged and ignored.
pub async fn polka_webhooks(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<WebhookRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let authorization = authorization_header(&headers)?;
    if !state.session_service.verify_server_callback(authorization).await {
        return Err(ApiError::unauthorized());
    }

    let Json(req) = payload?;
    if req.event != USER_UPGRADED_EVENT {
        tracing::debug!(event = %req.event, "Ignoring webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = UserId::from_string(&req.data.user_id).map_err(UserError::from)?;
    state.user_service.upgrade_user(&user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
