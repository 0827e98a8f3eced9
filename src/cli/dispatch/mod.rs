//! Command-line argument dispatch.
//!
//! Validates parsed arguments into a ready-to-run action. Every
//! configuration problem surfaces here, before any listener is bound.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{identity, session};
use crate::ledger::{
    session::{ConfigurationError, SessionSecret},
    state::{AppConfig, Environment},
};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns a [`ConfigurationError`] if the session secret is missing or too
/// short, or if the API URL or environment is invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let session_opts = session::Options::parse(matches)?;
    let identity_opts = identity::Options::parse(matches)?;

    let secret = session_opts
        .secret
        .ok_or(ConfigurationError::MissingSecret)
        .and_then(SessionSecret::new)?;

    let environment: Environment = session_opts.environment.parse()?;

    let config = AppConfig::new(identity_opts.api_url)?
        .with_environment(environment)
        .with_session_ttl_seconds(session_opts.ttl_seconds)
        .with_login_timeout_seconds(identity_opts.login_timeout_seconds);

    Ok(Action::Server(Args {
        port,
        secret,
        config,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatch(vars: &[(&str, Option<&str>)]) -> Result<Action> {
        let mut all: Vec<(&str, Option<&str>)> = vec![
            ("SAFEBEAUTYLEDGER_SESSION_SECRET", None),
            ("SAFEBEAUTYLEDGER_ENV", None),
            ("SAFEBEAUTYLEDGER_API_URL", None),
            ("SAFEBEAUTYLEDGER_SESSION_TTL_SECONDS", None),
        ];
        all.extend_from_slice(vars);
        temp_env::with_vars(all, || {
            let command = crate::cli::commands::new();
            let matches = command.get_matches_from(vec!["safebeautyledger"]);
            handler(&matches)
        })
    }

    fn configuration_error(result: Result<Action>) -> Option<ConfigurationError> {
        result
            .err()
            .and_then(|err| err.downcast_ref::<ConfigurationError>().cloned())
    }

    #[test]
    fn session_secret_required() {
        assert_eq!(
            configuration_error(dispatch(&[])),
            Some(ConfigurationError::MissingSecret)
        );
    }

    #[test]
    fn short_session_secret_is_fatal() {
        assert_eq!(
            configuration_error(dispatch(&[(
                "SAFEBEAUTYLEDGER_SESSION_SECRET",
                Some("0123456789abcdef")
            )])),
            Some(ConfigurationError::SecretTooShort(16))
        );
    }

    #[test]
    fn invalid_environment_is_fatal() {
        assert_eq!(
            configuration_error(dispatch(&[
                (
                    "SAFEBEAUTYLEDGER_SESSION_SECRET",
                    Some("0123456789abcdef0123456789abcdef")
                ),
                ("SAFEBEAUTYLEDGER_ENV", Some("staging")),
            ])),
            Some(ConfigurationError::InvalidEnvironment("staging".to_string()))
        );
    }

    #[test]
    fn invalid_api_url_is_fatal() {
        let error = configuration_error(dispatch(&[
            (
                "SAFEBEAUTYLEDGER_SESSION_SECRET",
                Some("0123456789abcdef0123456789abcdef"),
            ),
            ("SAFEBEAUTYLEDGER_API_URL", Some("ftp://files.tld")),
        ]));
        assert!(matches!(
            error,
            Some(ConfigurationError::InvalidApiUrl { .. })
        ));
    }

    #[test]
    fn valid_configuration_builds_server_action() {
        let action = dispatch(&[
            (
                "SAFEBEAUTYLEDGER_SESSION_SECRET",
                Some("0123456789abcdef0123456789abcdef"),
            ),
            ("SAFEBEAUTYLEDGER_ENV", Some("production")),
            ("SAFEBEAUTYLEDGER_SESSION_TTL_SECONDS", Some("600")),
        ]);
        let Ok(Action::Server(args)) = action else {
            panic!("expected a server action");
        };
        assert_eq!(args.config.environment(), Environment::Production);
        assert_eq!(args.config.session_ttl_seconds(), 600);
        assert_eq!(args.config.api_url(), "http://localhost:3001");
        assert!(args.config.session_cookie_secure());
    }
}
