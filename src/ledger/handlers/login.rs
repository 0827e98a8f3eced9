use axum::{
    extract::Extension,
    http::{
        header::{ALLOW, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use super::types::{LoginRequest, LoginResponse, MessageResponse};
use crate::ledger::{session::SessionPayload, state::AppState};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = LoginResponse),
        (status = 405, description = "Method not allowed", body = MessageResponse),
    ),
    tag = "session"
)]
#[instrument(skip_all)]
pub async fn login(
    state: Extension<Arc<AppState>>,
    payload: Option<Json<LoginRequest>>,
) -> Response {
    let Some(Json(request)) = payload else {
        debug!("Missing or malformed login payload");
        return unauthorized();
    };

    let user = match state.identity().login(&request.email, &request.password).await {
        Ok(user) => user,
        Err(err) if err.is_upstream_unavailable() => {
            error!("Identity provider unavailable: {err}");
            return unauthorized();
        }
        Err(err) => {
            warn!("Login failed: {err}");
            return unauthorized();
        }
    };

    let payload = SessionPayload::from(user);
    let cookie = match state.sessions().issue(&payload) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to seal session cookie: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(LoginResponse::failure("Internal server error")),
            )
                .into_response();
        }
    };

    info!("Session established for user {}", payload.id);

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    (StatusCode::OK, headers, Json(LoginResponse::success(payload))).into_response()
}

/// Every verb except `POST` on the login route.
pub async fn method_not_allowed() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(ALLOW, HeaderValue::from_static("POST"));

    (
        StatusCode::METHOD_NOT_ALLOWED,
        headers,
        Json(MessageResponse {
            message: "Method not allowed".to_string(),
        }),
    )
        .into_response()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(LoginResponse::failure(INVALID_CREDENTIALS)),
    )
        .into_response()
}
