//! Application configuration and shared request state.

use std::{fmt, str::FromStr, time::Duration};
use thiserror::Error;
use url::Url;

use super::{
    identity::IdentityClient,
    session::{ConfigurationError, CookieCodec, SessionManager, SessionSecret},
};

pub const DEFAULT_API_URL: &str = "http://localhost:3001";
const DEFAULT_SESSION_TTL_SECONDS: u64 = 12 * 60 * 60;
const DEFAULT_LOGIN_TIMEOUT_SECONDS: u64 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigurationError::InvalidEnvironment(s.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    api_url: String,
    environment: Environment,
    session_ttl_seconds: u64,
    login_timeout_seconds: u64,
}

impl AppConfig {
    /// # Errors
    /// Returns [`ConfigurationError::InvalidApiUrl`] unless `api_url` is an
    /// absolute http(s) URL.
    pub fn new(api_url: String) -> Result<Self, ConfigurationError> {
        let parsed = Url::parse(&api_url).map_err(|err| ConfigurationError::InvalidApiUrl {
            url: api_url.clone(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigurationError::InvalidApiUrl {
                url: api_url,
                reason: "scheme must be http or https".to_string(),
            });
        }

        Ok(Self {
            api_url,
            environment: Environment::default(),
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            login_timeout_seconds: DEFAULT_LOGIN_TIMEOUT_SECONDS,
        })
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: u64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_login_timeout_seconds(mut self, seconds: u64) -> Self {
        self.login_timeout_seconds = seconds;
        self
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> u64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login_timeout_seconds)
    }

    /// Cookies are only marked `Secure` in production.
    #[must_use]
    pub fn session_cookie_secure(&self) -> bool {
        self.environment == Environment::Production
    }
}

/// Immutable state shared by every request.
#[derive(Clone)]
pub struct AppState {
    config: AppConfig,
    sessions: SessionManager,
    identity: IdentityClient,
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("failed to build identity client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl AppState {
    /// # Errors
    /// Returns an error if the cookie key cannot be derived or the identity
    /// client cannot be built.
    pub fn new(config: AppConfig, secret: &SessionSecret) -> Result<Self, StateError> {
        let sessions = SessionManager::new(
            CookieCodec::new(secret)?,
            config.session_cookie_secure(),
            config.session_ttl_seconds(),
        );
        let identity = IdentityClient::new(config.api_url(), config.login_timeout())?;

        Ok(Self {
            config,
            sessions,
            identity,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    #[must_use]
    pub fn identity(&self) -> &IdentityClient {
        &self.identity
    }
}
