//! Client-held sessions.
//!
//! The session lives entirely in one sealed cookie; there is no server-side
//! session table. Anything that fails to open, or is older than the
//! configured TTL, reads as anonymous.

pub mod codec;
pub mod secret;

pub use codec::{CookieCodec, IntegrityError, SealError};
pub use secret::{ConfigurationError, SessionSecret, MIN_SECRET_LEN};

use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue,
};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;
use utoipa::ToSchema;

pub const SESSION_COOKIE_NAME: &str = "safebeautyledger-session";

/// Identity carried between requests.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionPayload {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug)]
struct SessionEnvelope {
    user: SessionPayload,
    iat: u64,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Seal(#[from] SealError),
    #[error("invalid cookie header: {0}")]
    Header(#[from] InvalidHeaderValue),
}

/// Why a presented cookie did not yield a session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Rejected {
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
    #[error("session issued at {issued_at} expired")]
    Expired { issued_at: u64 },
}

#[derive(Clone)]
pub struct SessionManager {
    codec: CookieCodec,
    secure: bool,
    ttl_seconds: u64,
}

impl SessionManager {
    /// `ttl_seconds == 0` issues browser-session cookies and skips the age check.
    #[must_use]
    pub fn new(codec: CookieCodec, secure: bool, ttl_seconds: u64) -> Self {
        Self {
            codec,
            secure,
            ttl_seconds,
        }
    }

    /// Seal `payload` into a `Set-Cookie` value.
    ///
    /// # Errors
    /// Returns [`SessionError`] if sealing fails or the header cannot be built.
    pub fn issue(&self, payload: &SessionPayload) -> Result<HeaderValue, SessionError> {
        let envelope = SessionEnvelope {
            user: payload.clone(),
            iat: now_unix(),
        };
        let sealed = self.codec.seal(&envelope)?;

        let mut cookie = format!("{SESSION_COOKIE_NAME}={sealed}; Path=/; HttpOnly; SameSite=Lax");
        if self.ttl_seconds > 0 {
            cookie.push_str(&format!("; Max-Age={}", self.ttl_seconds));
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        Ok(HeaderValue::from_str(&cookie)?)
    }

    /// Identity of the request, or `None` for anonymous.
    ///
    /// Corrupt, foreign and expired cookies are logged and read as anonymous.
    #[must_use]
    pub fn read(&self, headers: &HeaderMap) -> Option<SessionPayload> {
        match self.resolve(headers) {
            Ok(payload) => payload,
            Err(reason) => {
                debug!("Ignoring session cookie: {reason}");
                None
            }
        }
    }

    /// Like [`SessionManager::read`] but keeps the rejection reason.
    ///
    /// # Errors
    /// Returns [`Rejected`] when a session cookie is present but unusable.
    pub fn resolve(&self, headers: &HeaderMap) -> Result<Option<SessionPayload>, Rejected> {
        let Some(value) = extract_session_cookie(headers) else {
            return Ok(None);
        };
        let envelope: SessionEnvelope = self.codec.open(&value)?;

        if self.ttl_seconds > 0 && now_unix().saturating_sub(envelope.iat) > self.ttl_seconds {
            return Err(Rejected::Expired {
                issued_at: envelope.iat,
            });
        }

        Ok(Some(envelope.user))
    }

    /// `Set-Cookie` value that removes the session cookie.
    ///
    /// # Errors
    /// Returns an error if the header value cannot be built.
    pub fn clear(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut cookie =
            format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
    }
}

fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(value) = header.to_str() else {
            continue;
        };
        for pair in value.split(';') {
            let Some((key, val)) = pair.trim().split_once('=') else {
                continue;
            };
            if key.trim() == SESSION_COOKIE_NAME {
                let val = val.trim();
                if val.is_empty() {
                    return None;
                }
                return Some(val.to_string());
            }
        }
    }
    None
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}
