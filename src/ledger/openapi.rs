use utoipa::OpenApi;

use super::{
    handlers::{self, health::Health, types},
    session::SessionPayload,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "SafeBeautyLedger session API"),
    paths(
        handlers::health::health,
        handlers::login::login,
        handlers::user::user,
        handlers::logout::logout,
    ),
    components(schemas(
        Health,
        SessionPayload,
        types::LoginRequest,
        types::LoginResponse,
        types::UserResponse,
        types::LogoutResponse,
        types::MessageResponse,
    )),
    tags(
        (name = "session", description = "Login, current user and logout"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// OpenAPI document for the session endpoints.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
