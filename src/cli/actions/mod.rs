pub mod countries;
pub mod signin;
pub mod signup;

// Internal "interpreter" for `Action`.
// We keep the match in a separate module so `mod.rs` stays small as more actions are added.
mod run;

use crate::forms::FieldErrors;

#[derive(Debug)]
pub enum Action {
    SignIn(signin::Args),
    SignUp(signup::Args),
    Countries(countries::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}

/// Render form errors for the terminal, banner first.
#[must_use]
pub fn render_errors(errors: &FieldErrors) -> String {
    let mut lines = Vec::with_capacity(errors.len());
    if let Some(message) = errors.global_message() {
        lines.push(message.to_string());
    }
    lines.extend(
        errors
            .fields()
            .map(|(field, message)| format!("  {field}: {message}")),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_comes_before_fields() {
        let mut errors = FieldErrors::global("Sign-up failed!");
        errors.insert("phone", "Use digits only");
        errors.insert("email", "Email address is invalid");

        assert_eq!(
            render_errors(&errors),
            "Sign-up failed!\n  email: Email address is invalid\n  phone: Use digits only"
        );
    }

    #[test]
    fn empty_errors_render_nothing() {
        assert_eq!(render_errors(&FieldErrors::new()), "");
    }
}
