//! # SafeBeautyLedger session service
//!
//! Authentication boundary for the SafeBeautyLedger product ledger. A browser
//! posts credentials, the service checks them against the external identity
//! provider and, on success, hands back a sealed cookie carrying the user's
//! id, name and email. There is no server-side session table.
//!
//! ## Cookies
//!
//! Cookies are sealed with AES-256-GCM under a key derived from the session
//! secret (at least 32 bytes, checked at startup). A cookie that fails to
//! open, or is older than the session TTL, reads as anonymous rather than as
//! an error.
//!
//! ## Endpoints
//!
//! - `POST /api/login` establishes a session.
//! - `GET /api/user` returns the current user or `null`.
//! - `POST /api/logout` clears the session cookie.

pub mod cli;
pub mod ledger;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
