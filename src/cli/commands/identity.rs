use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};

use crate::ledger::state::DEFAULT_API_URL;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_LOGIN_TIMEOUT_SECONDS: &str = "login-timeout-seconds";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Base URL of the product and identity API")
                .env("SAFEBEAUTYLEDGER_API_URL")
                .default_value(DEFAULT_API_URL),
        )
        .arg(
            Arg::new(ARG_LOGIN_TIMEOUT_SECONDS)
                .long(ARG_LOGIN_TIMEOUT_SECONDS)
                .help("Timeout in seconds for the identity provider login call")
                .env("SAFEBEAUTYLEDGER_LOGIN_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub api_url: String,
    pub login_timeout_seconds: u64,
}

impl Options {
    /// # Errors
    /// Returns an error if a defaulted argument is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        Ok(Self {
            api_url: matches
                .get_one::<String>(ARG_API_URL)
                .cloned()
                .context("missing required argument: --api-url")?,
            login_timeout_seconds: matches
                .get_one::<u64>(ARG_LOGIN_TIMEOUT_SECONDS)
                .copied()
                .context("missing required argument: --login-timeout-seconds")?,
        })
    }
}
