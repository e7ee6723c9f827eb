use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::create_chirp::ChirpResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::chirp::models::SortDirection;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::models::UserId;

/// Query string of the chirp listing
#[derive(Debug, Default, Deserialize)]
pub struct ListChirpsQuery {
    author_id: Option<String>,
    sort: Option<String>,
}

impl ListChirpsQuery {
    fn author(&self) -> Result<Option<UserId>, UserError> {
        Ok(self
            .author_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(UserId::from_string)
            .transpose()?)
    }

    /// Anything other than `desc` lists oldest first.
    fn sort(&self) -> SortDirection {
        match self.sort.as_deref() {
            Some(sort) if sort.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

pub async fn list_chirps(
    State(state): State<AppState>,
    query: Result<Query<ListChirpsQuery>, QueryRejection>,
) -> Result<ApiSuccess<Vec<ChirpResponseData>>, ApiError> {
    let Query(query) = query?;
    let author = query.author()?;

    state
        .chirp_service
        .list_chirps(author, query.sort())
        .await
        .map_err(ApiError::from)
        .map(|chirps| {
            ApiSuccess::new(
                StatusCode::OK,
                chirps.iter().map(ChirpResponseData::from).collect(),
            )
        })
}
