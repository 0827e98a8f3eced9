use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_SESSION_SECRET: &str = "session-secret";
pub const ARG_ENVIRONMENT: &str = "environment";
pub const ARG_SESSION_TTL_SECONDS: &str = "session-ttl-seconds";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SESSION_SECRET)
                .long(ARG_SESSION_SECRET)
                .help("Secret used to seal session cookies, at least 32 bytes")
                .env("SAFEBEAUTYLEDGER_SESSION_SECRET")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_ENVIRONMENT)
                .long(ARG_ENVIRONMENT)
                .help("Deployment environment: development or production (production marks cookies Secure)")
                .env("SAFEBEAUTYLEDGER_ENV")
                .default_value("development"),
        )
        .arg(
            Arg::new(ARG_SESSION_TTL_SECONDS)
                .long(ARG_SESSION_TTL_SECONDS)
                .help("Session lifetime in seconds, 0 for browser-session cookies without expiry")
                .env("SAFEBEAUTYLEDGER_SESSION_TTL_SECONDS")
                .default_value("43200")
                .value_parser(clap::value_parser!(u64)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub secret: Option<SecretString>,
    pub environment: String,
    pub ttl_seconds: u64,
}

impl Options {
    /// # Errors
    /// Returns an error if a defaulted argument is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        Ok(Self {
            secret: matches
                .get_one::<String>(ARG_SESSION_SECRET)
                .map(|secret| SecretString::from(secret.clone())),
            environment: matches
                .get_one::<String>(ARG_ENVIRONMENT)
                .cloned()
                .context("missing required argument: --environment")?,
            ttl_seconds: matches
                .get_one::<u64>(ARG_SESSION_TTL_SECONDS)
                .copied()
                .context("missing required argument: --session-ttl-seconds")?,
        })
    }
}
