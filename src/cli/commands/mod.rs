pub mod identity;
pub mod logging;
pub mod session;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("safebeautyledger")
        .about("Session and login boundary for SafeBeautyLedger")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("SAFEBEAUTYLEDGER_PORT")
                .value_parser(clap::value_parser!(u16)),
        );

    let command = session::with_args(command);
    let command = identity::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENV_VARS: [&str; 7] = [
        "SAFEBEAUTYLEDGER_PORT",
        "SAFEBEAUTYLEDGER_SESSION_SECRET",
        "SAFEBEAUTYLEDGER_ENV",
        "SAFEBEAUTYLEDGER_SESSION_TTL_SECONDS",
        "SAFEBEAUTYLEDGER_API_URL",
        "SAFEBEAUTYLEDGER_LOGIN_TIMEOUT_SECONDS",
        "SAFEBEAUTYLEDGER_LOG_LEVEL",
    ];

    fn clean_env() -> Vec<(&'static str, Option<&'static str>)> {
        ENV_VARS.iter().map(|name| (*name, None)).collect()
    }

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "safebeautyledger");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Session and login boundary for SafeBeautyLedger".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(clean_env(), || {
            let matches = new().get_matches_from(vec!["safebeautyledger"]);
            assert_eq!(matches.get_one::<u16>("port").copied(), Some(8080));
            assert_eq!(
                matches
                    .get_one::<String>(identity::ARG_API_URL)
                    .map(String::as_str),
                Some("http://localhost:3001")
            );
            assert_eq!(
                matches
                    .get_one::<String>(session::ARG_ENVIRONMENT)
                    .map(String::as_str),
                Some("development")
            );
            assert_eq!(
                matches
                    .get_one::<u64>(session::ARG_SESSION_TTL_SECONDS)
                    .copied(),
                Some(43_200)
            );
            assert_eq!(
                matches
                    .get_one::<u64>(identity::ARG_LOGIN_TIMEOUT_SECONDS)
                    .copied(),
                Some(10)
            );
            assert!(matches
                .get_one::<String>(session::ARG_SESSION_SECRET)
                .is_none());
        });
    }

    #[test]
    fn test_check_args() {
        temp_env::with_vars(clean_env(), || {
            let matches = new().get_matches_from(vec![
                "safebeautyledger",
                "--port",
                "9090",
                "--session-secret",
                "0123456789abcdef0123456789abcdef",
                "--api-url",
                "https://api.safebeautyledger.dev",
                "--environment",
                "production",
                "--session-ttl-seconds",
                "0",
            ]);

            assert_eq!(matches.get_one::<u16>("port").copied(), Some(9090));
            assert_eq!(
                matches
                    .get_one::<String>(session::ARG_SESSION_SECRET)
                    .map(String::as_str),
                Some("0123456789abcdef0123456789abcdef")
            );
            assert_eq!(
                matches
                    .get_one::<String>(identity::ARG_API_URL)
                    .map(String::as_str),
                Some("https://api.safebeautyledger.dev")
            );
            assert_eq!(
                matches
                    .get_one::<u64>(session::ARG_SESSION_TTL_SECONDS)
                    .copied(),
                Some(0)
            );
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("SAFEBEAUTYLEDGER_PORT", Some("443")),
                (
                    "SAFEBEAUTYLEDGER_SESSION_SECRET",
                    Some("0123456789abcdef0123456789abcdef"),
                ),
                ("SAFEBEAUTYLEDGER_ENV", Some("production")),
                ("SAFEBEAUTYLEDGER_API_URL", Some("https://api.tld")),
                ("SAFEBEAUTYLEDGER_LOGIN_TIMEOUT_SECONDS", Some("3")),
                ("SAFEBEAUTYLEDGER_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["safebeautyledger"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(443));
                assert_eq!(
                    matches
                        .get_one::<String>(session::ARG_ENVIRONMENT)
                        .map(String::as_str),
                    Some("production")
                );
                assert_eq!(
                    matches
                        .get_one::<String>(identity::ARG_API_URL)
                        .map(String::as_str),
                    Some("https://api.tld")
                );
                assert_eq!(
                    matches
                        .get_one::<u64>(identity::ARG_LOGIN_TIMEOUT_SECONDS)
                        .copied(),
                    Some(3)
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_zero_login_timeout_rejected() {
        temp_env::with_vars(clean_env(), || {
            let result =
                new().try_get_matches_from(vec!["safebeautyledger", "--login-timeout-seconds", "0"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("SAFEBEAUTYLEDGER_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["safebeautyledger"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_usize {
            temp_env::with_vars([("SAFEBEAUTYLEDGER_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["safebeautyledger".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }
}
