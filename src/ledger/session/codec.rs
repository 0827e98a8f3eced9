//! Cookie sealing.
//!
//! AES-256-GCM under a per-cookie key derived with HMAC-SHA256 from the
//! session secret and a random salt. Layout before base64url encoding:
//!
//! ```text
//! version (1) | salt (32) | nonce (12) | ciphertext + tag (16)
//! ```
//!
//! The version byte is bound to the tag as associated data.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{digest::InvalidLength, Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use serde::{de::DeserializeOwned, Serialize};
use sha2::Sha256;
use thiserror::Error;

use super::secret::{ConfigurationError, SessionSecret};

type HmacSha256 = Hmac<Sha256>;

const VERSION: u8 = 1;
const SALT_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;
const HEADER_LEN: usize = 1 + SALT_LEN + NONCE_LEN;
const MASTER_KEY_LABEL: &[u8] = b"safebeautyledger-session-v1";

#[derive(Debug, Error)]
pub enum SealError {
    #[error("failed to serialize session payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to derive cookie key")]
    KeyDerivation,
    #[error("failed to encrypt session payload")]
    Encrypt,
}

/// Reasons a cookie failed to open. Callers on the request path treat all of
/// them as "no session".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("cookie is not valid base64url")]
    Encoding,
    #[error("cookie is truncated")]
    Truncated,
    #[error("unsupported cookie format version {0}")]
    UnsupportedVersion(u8),
    #[error("cookie authentication failed")]
    TagMismatch,
    #[error("cookie payload is malformed")]
    MalformedPayload,
    #[error("failed to derive cookie key")]
    KeyDerivation,
}

#[derive(Clone)]
pub struct CookieCodec {
    master_key: [u8; 32],
}

impl CookieCodec {
    /// # Errors
    /// Returns [`ConfigurationError::KeyDerivation`] if the master key cannot
    /// be derived from `secret`.
    pub fn new(secret: &SessionSecret) -> Result<Self, ConfigurationError> {
        let master_key = hmac_sha256(secret.as_bytes(), MASTER_KEY_LABEL)
            .map_err(|_| ConfigurationError::KeyDerivation)?;
        Ok(Self { master_key })
    }

    /// Serialize and seal `value` into a URL-safe cookie value.
    ///
    /// # Errors
    /// Returns [`SealError`] if the value cannot be serialized or encrypted.
    pub fn seal<T: Serialize>(&self, value: &T) -> Result<String, SealError> {
        let plaintext = serde_json::to_vec(value)?;

        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);

        let cipher = self.cipher(&salt).map_err(|_| SealError::KeyDerivation)?;
        let ciphertext = cipher
            .encrypt(
                Nonce::from_slice(&nonce_bytes),
                Payload {
                    msg: &plaintext,
                    aad: &[VERSION],
                },
            )
            .map_err(|_| SealError::Encrypt)?;

        let mut combined = Vec::with_capacity(HEADER_LEN + ciphertext.len());
        combined.push(VERSION);
        combined.extend_from_slice(&salt);
        combined.extend_from_slice(&nonce_bytes);
        combined.extend_from_slice(&ciphertext);

        Ok(Base64UrlUnpadded::encode_string(&combined))
    }

    /// Verify, decrypt and deserialize a cookie value.
    ///
    /// # Errors
    /// Returns [`IntegrityError`] when the value was not produced by
    /// [`CookieCodec::seal`] under the same secret.
    pub fn open<T: DeserializeOwned>(&self, encoded: &str) -> Result<T, IntegrityError> {
        let combined =
            Base64UrlUnpadded::decode_vec(encoded).map_err(|_| IntegrityError::Encoding)?;

        if combined.len() < HEADER_LEN + TAG_LEN {
            return Err(IntegrityError::Truncated);
        }
        if combined[0] != VERSION {
            return Err(IntegrityError::UnsupportedVersion(combined[0]));
        }

        let salt = &combined[1..=SALT_LEN];
        let nonce = Nonce::from_slice(&combined[1 + SALT_LEN..HEADER_LEN]);
        let ciphertext = &combined[HEADER_LEN..];

        let plaintext = self
            .cipher(salt)
            .map_err(|_| IntegrityError::KeyDerivation)?
            .decrypt(
                nonce,
                Payload {
                    msg: ciphertext,
                    aad: &[VERSION],
                },
            )
            .map_err(|_| IntegrityError::TagMismatch)?;

        serde_json::from_slice(&plaintext).map_err(|_| IntegrityError::MalformedPayload)
    }

    fn cipher(&self, salt: &[u8]) -> Result<Aes256Gcm, InvalidLength> {
        let key = hmac_sha256(&self.master_key, salt)?;
        Ok(Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key)))
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<[u8; 32], InvalidLength> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)?;
    mac.update(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}
