use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::create_user::UserResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::inbound::http::router::AppState;
use crate::session::models::Session;
use crate::user::errors::UserError;

/// HTTP request body for logging in (raw JSON)
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

/// Profile of the logged in user with their session tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    #[serde(flatten)]
    pub user: UserResponseData,
    pub token: String,
    pub refresh_token: String,
}

impl From<Session> for LoginResponseData {
    fn from(session: Session) -> Self {
        Self {
            user: UserResponseData::from(&session.user),
            token: session.tokens.access_token,
            refresh_token: session.tokens.refresh_token,
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = payload?;
    let email = EmailAddress::new(body.email).map_err(UserError::from)?;
    let password = Password::new(body.password).map_err(UserError::from)?;

    state
        .session_service
        .login(&email, &password)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}
