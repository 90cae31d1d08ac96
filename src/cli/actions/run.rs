use crate::cli::actions::{Action, countries, signin, signup};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::SignIn(args) => signin::execute(args).await,
        Action::SignUp(args) => signup::execute(args).await,
        Action::Countries(args) => countries::execute(&args),
    }
}
