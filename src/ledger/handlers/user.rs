use axum::{extract::Extension, http::HeaderMap, Json};
use std::sync::Arc;

use super::types::UserResponse;
use crate::ledger::state::AppState;

#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Current user, or null when anonymous", body = UserResponse),
    ),
    tag = "session"
)]
// Never fails: a missing or unusable cookie is just an anonymous request.
pub async fn user(headers: HeaderMap, state: Extension<Arc<AppState>>) -> Json<UserResponse> {
    Json(UserResponse {
        user: state.sessions().read(&headers),
    })
}
