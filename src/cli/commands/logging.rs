use clap::{Arg, ArgAction, ArgMatches, Command, builder::ValueParser};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ENV_LOG_LEVEL: &str = "AUTHFORM_LOG_LEVEL";

/// Indexed by verbosity count.
const LEVEL_NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accepts a level name or its verbosity count, so `AUTHFORM_LOG_LEVEL=debug`
/// and `-vvv` select the same level.
#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(|level: &str| -> Result<u8, String> {
        let level = level.trim().to_lowercase();

        if let Ok(parsed) = level.parse::<u8>() {
            if usize::from(parsed) < LEVEL_NAMES.len() {
                return Ok(parsed);
            }
        }

        LEVEL_NAMES
            .iter()
            .position(|name| *name == level)
            .and_then(|index| u8::try_from(index).ok())
            .ok_or_else(|| {
                format!(
                    "invalid log level `{level}`, expected one of: {}",
                    LEVEL_NAMES.join(", ")
                )
            })
    })
}

/// Tracing level for a verbosity count. Zero leaves the error-only default,
/// which `RUST_LOG` may still override.
#[must_use]
pub const fn level(verbosity: u8) -> Option<Level> {
    match verbosity {
        0 => None,
        1 => Some(Level::WARN),
        2 => Some(Level::INFO),
        3 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

/// Level requested by `-v` flags or `AUTHFORM_LOG_LEVEL`.
#[must_use]
pub fn verbosity(matches: &ArgMatches) -> Option<Level> {
    level(matches.get_one::<u8>(ARG_VERBOSITY).copied().unwrap_or(0))
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Log more to stderr: -v warn, -vv info, -vvv debug, -vvvv trace (default: error)")
            .env(ENV_LOG_LEVEL)
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}
