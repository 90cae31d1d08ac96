use crate::{
    GIT_COMMIT_HASH,
    cli::{actions::Action, commands, dispatch, telemetry},
};
use anyhow::Result;
use tracing::debug;

/// Parse the command line, set up stderr logging, and resolve the action to
/// run. Nothing is sent to the auth API here.
///
/// # Errors
///
/// Returns an error if telemetry initialization or action dispatch fails
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    telemetry::init(commands::logging::verbosity(&matches))?;

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        commit = GIT_COMMIT_HASH,
        command = matches.subcommand_name().unwrap_or_default(),
        "authform starting"
    );

    dispatch::handler(&matches)
}
