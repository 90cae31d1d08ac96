//! Command-line argument dispatch.
//!
//! Parses the validated CLI matches and maps them to the action for the
//! selected subcommand, carrying the shared client settings along.

use crate::cli::{
    actions::{Action, countries, signin, signup},
    commands::{self, ARG_API_BASE_URL, ARG_JSON, ARG_TIMEOUT_SECONDS},
    globals::GlobalArgs,
};
use anyhow::{Context, Result};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if the client settings are invalid or a subcommand
/// argument cannot be parsed.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let api_base_url = matches
        .get_one::<String>(ARG_API_BASE_URL)
        .cloned()
        .context("missing required argument: --api-base-url")?;
    let timeout_seconds = matches
        .get_one::<u64>(ARG_TIMEOUT_SECONDS)
        .copied()
        .unwrap_or(crate::client::config::DEFAULT_TIMEOUT_SECONDS);

    let globals = GlobalArgs::new(&api_base_url, timeout_seconds)
        .context("invalid AUTHFORM_API_BASE_URL")?;

    match matches.subcommand() {
        Some((commands::CMD_SIGNIN, sub)) => {
            let options = commands::signin::Options::parse(sub)?;
            Ok(Action::SignIn(signin::Args { globals, options }))
        }
        Some((commands::CMD_SIGNUP, sub)) => {
            let options = commands::signup::Options::parse(sub)?;
            Ok(Action::SignUp(signup::Args { globals, options }))
        }
        Some((commands::CMD_COUNTRIES, sub)) => Ok(Action::Countries(countries::Args {
            json: sub.get_flag(ARG_JSON),
        })),
        Some((name, _)) => anyhow::bail!("unknown subcommand: {name}"),
        None => anyhow::bail!("missing subcommand"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::forms::LoginMode;

    fn with_clean_env<F: FnOnce()>(f: F) {
        temp_env::with_vars(
            [
                ("AUTHFORM_API_BASE_URL", None::<&str>),
                ("AUTHFORM_TIMEOUT_SECONDS", None::<&str>),
                ("AUTHFORM_PASSWORD", None::<&str>),
                ("AUTHFORM_DENIED_COUNTRIES", None::<&str>),
                ("AUTHFORM_LOG_LEVEL", None::<&str>),
            ],
            f,
        );
    }

    #[test]
    fn signin_action_carries_globals() {
        with_clean_env(|| {
            let matches = commands::new().get_matches_from([
                "authform",
                "--api-base-url",
                "http://127.0.0.1:9000/",
                "signin",
                "--mode",
                "mobile",
                "--phone",
                "2015550123",
            ]);
            match handler(&matches).unwrap() {
                Action::SignIn(args) => {
                    assert_eq!(args.globals.client.api_base_url, "http://127.0.0.1:9000");
                    assert_eq!(args.options.mode, LoginMode::Mobile);
                    assert_eq!(args.options.phone, "2015550123");
                }
                other => panic!("unexpected action: {other:?}"),
            }
        });
    }

    #[test]
    fn countries_action() {
        with_clean_env(|| {
            let matches = commands::new().get_matches_from(["authform", "countries", "--json"]);
            assert!(matches!(
                handler(&matches).unwrap(),
                Action::Countries(countries::Args { json: true })
            ));
        });
    }

    #[test]
    fn invalid_base_url_is_reported() {
        with_clean_env(|| {
            let matches = commands::new().get_matches_from([
                "authform",
                "--api-base-url",
                "ftp://example.com",
                "signup",
            ]);
            let err = handler(&matches).unwrap_err();
            assert!(err.to_string().contains("AUTHFORM_API_BASE_URL"));
        });
    }
}
