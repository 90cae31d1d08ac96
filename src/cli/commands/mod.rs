pub mod logging;
pub mod signin;
pub mod signup;

use crate::client::config::DEFAULT_API_BASE_URL;
use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_API_BASE_URL: &str = "api-base-url";
pub const ARG_TIMEOUT_SECONDS: &str = "timeout-seconds";
pub const ARG_JSON: &str = "json";

pub const CMD_SIGNIN: &str = "signin";
pub const CMD_SIGNUP: &str = "signup";
pub const CMD_COUNTRIES: &str = "countries";

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

    let command = Command::new("authform")
        .about("Validate and submit sign-in and sign-up forms")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_BASE_URL)
                .long(ARG_API_BASE_URL)
                .help("Base URL of the auth API")
                .env("AUTHFORM_API_BASE_URL")
                .default_value(DEFAULT_API_BASE_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT_SECONDS)
                .long(ARG_TIMEOUT_SECONDS)
                .help("Request timeout in seconds")
                .env("AUTHFORM_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..))
                .global(true),
        )
        .subcommand(signin::command())
        .subcommand(signup::command())
        .subcommand(
            Command::new(CMD_COUNTRIES)
                .about("List the selectable countries")
                .arg(
                    Arg::new(ARG_JSON)
                        .long(ARG_JSON)
                        .help("Print the catalog as JSON")
                        .action(ArgAction::SetTrue),
                ),
        );

    logging::with_args(command)
}
