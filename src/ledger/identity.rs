//! Client for the external identity provider.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use super::session::SessionPayload;
use crate::APP_USER_AGENT;

/// User as reported by the identity provider.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<UserIdentity> for SessionPayload {
    fn from(user: UserIdentity) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    user: UserIdentity,
}

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("email and password are required")]
    MissingCredentials,
    #[error("identity provider rejected the login with status {0}")]
    Rejected(StatusCode),
    #[error("identity provider returned a malformed body: {0}")]
    MalformedResponse(#[source] reqwest::Error),
    #[error("identity provider unavailable: {0}")]
    UpstreamUnavailable(#[source] reqwest::Error),
}

impl LoginError {
    /// Transport failures and timeouts, as opposed to a refused login.
    #[must_use]
    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable(_))
    }
}

#[derive(Clone, Debug)]
pub struct IdentityClient {
    client: Client,
    login_url: String,
}

impl IdentityClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            login_url: format!("{}/login", api_url.trim_end_matches('/')),
        })
    }

    /// Check `email`/`password` against the identity provider.
    ///
    /// Exactly one upstream request per call, never retried. Credentials
    /// stay out of the span.
    ///
    /// # Errors
    /// Returns [`LoginError`] on empty input, transport failure, non-2xx
    /// status or an unexpected body.
    #[instrument(skip_all, fields(url = %self.login_url))]
    pub async fn login(&self, email: &str, password: &str) -> Result<UserIdentity, LoginError> {
        if email.is_empty() || password.is_empty() {
            return Err(LoginError::MissingCredentials);
        }

        let response = self
            .client
            .post(&self.login_url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(LoginError::UpstreamUnavailable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoginError::Rejected(status));
        }

        let body: LoginResponse = response.json().await.map_err(|err| {
            if err.is_timeout() {
                LoginError::UpstreamUnavailable(err)
            } else {
                LoginError::MalformedResponse(err)
            }
        })?;

        debug!("Identity provider accepted user {}", body.user.id);

        Ok(body.user)
    }
}
