use crate::forms::{CountryCode, SignUpPolicy};
use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_FIRST_NAME: &str = "first-name";
pub const ARG_LAST_NAME: &str = "last-name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_COUNTRY: &str = "country";
pub const ARG_PHONE: &str = "phone";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_ACCEPT_RISK: &str = "accept-risk";
pub const ARG_ACCEPT_TERMS: &str = "accept-terms";
pub const ARG_MARKETING: &str = "marketing";
pub const ARG_DENY_COUNTRY: &str = "deny-country";

#[derive(Debug, Clone)]
pub struct Options {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: Option<String>,
    pub phone: String,
    pub password: SecretString,
    pub accept_risk: bool,
    pub accept_terms: bool,
    pub marketing: bool,
    pub policy: SignUpPolicy,
}

impl Options {
    /// Parse sign-up arguments from the subcommand matches.
    ///
    /// # Errors
    /// Returns an error if a denied country is not a known country code.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let denied_countries = matches
            .get_many::<String>(ARG_DENY_COUNTRY)
            .into_iter()
            .flatten()
            .filter(|v| !v.trim().is_empty())
            .map(|v| {
                v.parse::<CountryCode>()
                    .with_context(|| format!("invalid --{ARG_DENY_COUNTRY} value: {v}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let get = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();

        Ok(Self {
            first_name: get(ARG_FIRST_NAME),
            last_name: get(ARG_LAST_NAME),
            email: get(ARG_EMAIL),
            country: matches
                .get_one::<String>(ARG_COUNTRY)
                .cloned()
                .filter(|v| !v.trim().is_empty()),
            phone: get(ARG_PHONE),
            password: SecretString::from(get(ARG_PASSWORD)),
            accept_risk: matches.get_flag(ARG_ACCEPT_RISK),
            accept_terms: matches.get_flag(ARG_ACCEPT_TERMS),
            marketing: matches.get_flag(ARG_MARKETING),
            policy: SignUpPolicy::new(denied_countries),
        })
    }
}

#[must_use]
pub fn command() -> Command {
    Command::new(super::CMD_SIGNUP)
        .about("Create an account")
        .arg(Arg::new(ARG_FIRST_NAME).long(ARG_FIRST_NAME).help("First name"))
        .arg(Arg::new(ARG_LAST_NAME).long(ARG_LAST_NAME).help("Last name"))
        .arg(Arg::new(ARG_EMAIL).long(ARG_EMAIL).help("Email address"))
        .arg(
            Arg::new(ARG_COUNTRY)
                .long(ARG_COUNTRY)
                .help("Country code, e.g. GB"),
        )
        .arg(
            Arg::new(ARG_PHONE)
                .long(ARG_PHONE)
                .help("Mobile number, digits only"),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("Account password (at least 8 characters)")
                .env("AUTHFORM_PASSWORD")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_ACCEPT_RISK)
                .long(ARG_ACCEPT_RISK)
                .help("Accept the risk disclaimer")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_ACCEPT_TERMS)
                .long(ARG_ACCEPT_TERMS)
                .help("Accept the terms and conditions")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_MARKETING)
                .long(ARG_MARKETING)
                .help("Opt in to marketing messages")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_DENY_COUNTRY)
                .long(ARG_DENY_COUNTRY)
                .help("Countries where registration is refused, comma separated")
                .env("AUTHFORM_DENIED_COUNTRIES")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .default_value("IR"),
        )
}
