use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{debug, error};

use super::types::LogoutResponse;
use crate::ledger::state::AppState;

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Session cleared", body = LogoutResponse),
    ),
    tag = "session"
)]
pub async fn logout(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    if let Some(user) = state.sessions().read(&headers) {
        debug!("Clearing session for user {}", user.id);
    }

    // Always clear the cookie, even for anonymous requests.
    let mut response_headers = HeaderMap::new();
    match state.sessions().clear() {
        Ok(cookie) => {
            response_headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build clearing cookie: {err}"),
    }

    (response_headers, Json(LogoutResponse { success: true }))
}
