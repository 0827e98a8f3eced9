//! Process-wide cookie sealing secret.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Minimum accepted secret length in bytes.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("missing required argument: --session-secret")]
    MissingSecret,
    #[error("session secret must be at least 32 bytes long, got {0}")]
    SecretTooShort(usize),
    #[error("invalid API URL {url}: {reason}")]
    InvalidApiUrl { url: String, reason: String },
    #[error("invalid environment {0}, expected development or production")]
    InvalidEnvironment(String),
    #[error("failed to derive cookie key from session secret")]
    KeyDerivation,
}

/// Validated secret used to derive cookie keys.
///
/// Only constructed through [`SessionSecret::new`], so holding one proves the
/// length policy was checked at startup.
#[derive(Debug, Clone)]
pub struct SessionSecret(SecretString);

impl SessionSecret {
    /// # Errors
    /// Returns [`ConfigurationError::SecretTooShort`] for secrets under
    /// [`MIN_SECRET_LEN`] bytes.
    pub fn new(secret: SecretString) -> Result<Self, ConfigurationError> {
        let len = secret.expose_secret().len();
        if len < MIN_SECRET_LEN {
            return Err(ConfigurationError::SecretTooShort(len));
        }
        Ok(Self(secret))
    }

    pub(super) fn as_bytes(&self) -> &[u8] {
        self.0.expose_secret().as_bytes()
    }
}
