use crate::forms::LoginMode;
use clap::{Arg, ArgMatches, Command, builder::PossibleValuesParser};
use secrecy::SecretString;

pub const ARG_MODE: &str = "mode";
pub const ARG_EMAIL: &str = "email";
pub const ARG_COUNTRY: &str = "country";
pub const ARG_PHONE: &str = "phone";
pub const ARG_PASSWORD: &str = "password";

/// Raw sign-in values. Field rules are applied by the form, not here.
#[derive(Debug, Clone)]
pub struct Options {
    pub mode: LoginMode,
    pub email: String,
    pub country: Option<String>,
    pub phone: String,
    pub password: SecretString,
}

impl Options {
    /// Parse sign-in arguments from the subcommand matches.
    ///
    /// # Errors
    /// Returns an error if the mode is not one of the supported tabs.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let mode = matches
            .get_one::<String>(ARG_MODE)
            .map_or(Ok(LoginMode::default()), |value| value.parse::<LoginMode>())
            .map_err(|err| anyhow::anyhow!(err))?;

        let get = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();

        Ok(Self {
            mode,
            email: get(ARG_EMAIL),
            country: matches
                .get_one::<String>(ARG_COUNTRY)
                .cloned()
                .filter(|v| !v.trim().is_empty()),
            phone: get(ARG_PHONE),
            password: SecretString::from(get(ARG_PASSWORD)),
        })
    }
}

#[must_use]
pub fn command() -> Command {
    Command::new(super::CMD_SIGNIN)
        .about("Sign in with an email address or a mobile number")
        .arg(
            Arg::new(ARG_MODE)
                .long(ARG_MODE)
                .help("Identity channel")
                .default_value("email")
                .value_parser(PossibleValuesParser::new(["email", "mobile"])),
        )
        .arg(
            Arg::new(ARG_EMAIL)
                .long(ARG_EMAIL)
                .help("Email address (email mode)"),
        )
        .arg(
            Arg::new(ARG_COUNTRY)
                .long(ARG_COUNTRY)
                .help("Country code for the mobile number, e.g. US (mobile mode)"),
        )
        .arg(
            Arg::new(ARG_PHONE)
                .long(ARG_PHONE)
                .help("Mobile number, digits only (mobile mode)"),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("Account password")
                .env("AUTHFORM_PASSWORD")
                .hide_env_values(true),
        )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn parse(args: &[&str]) -> Options {
        let matches = command().get_matches_from(args);
        Options::parse(&matches).unwrap()
    }

    #[test]
    fn defaults_to_email_mode() {
        temp_env::with_var("AUTHFORM_PASSWORD", None::<&str>, || {
            let options = parse(&["signin", "--email", "a@example.com"]);
            assert_eq!(options.mode, LoginMode::Email);
            assert_eq!(options.email, "a@example.com");
            assert!(options.country.is_none());
            assert!(options.password.expose_secret().is_empty());
        });
    }

    #[test]
    fn mobile_mode_with_password_from_env() {
        temp_env::with_var("AUTHFORM_PASSWORD", Some("password1"), || {
            let options = parse(&[
                "signin", "--mode", "mobile", "--country", "GB", "--phone", "7123456789",
            ]);
            assert_eq!(options.mode, LoginMode::Mobile);
            assert_eq!(options.country.as_deref(), Some("GB"));
            assert_eq!(options.phone, "7123456789");
            assert_eq!(options.password.expose_secret(), "password1");
        });
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(command()
            .try_get_matches_from(["signin", "--mode", "fax"])
            .is_err());
    }
}
