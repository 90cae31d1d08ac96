use crate::{
    cli::{actions::render_errors, commands::signin::Options, globals::GlobalArgs},
    forms::{
        CountryCatalog, LoginMode, SignInForm,
        fields::PHONE,
        submit::{SIGN_IN_INVALID, SIGN_IN_SUCCEEDED, SubmitError},
    },
};
use anyhow::{Context, Result};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub options: Options,
}

/// Fill the sign-in form from the options, starting from the defaults of
/// the selected tab.
#[must_use]
pub fn form_from(options: Options, catalog: CountryCatalog) -> SignInForm {
    let mut form = SignInForm::new(catalog);
    form.switch_mode(options.mode);

    let values = form.values_mut();
    values.email = options.email;
    if let Some(country) = options.country {
        values.country = country;
    }
    values.phone = options.phone;
    values.password = options.password;

    form
}

/// Terminal report for a failed sign-in. Input rejected before any request
/// is headed by the invalid-details banner.
#[must_use]
pub fn failure_report(form: &SignInForm, err: &SubmitError) -> String {
    let mut lines = Vec::new();
    if matches!(err, SubmitError::Validation(_)) {
        lines.push(SIGN_IN_INVALID.to_string());
    }
    let errors = render_errors(form.errors());
    if !errors.is_empty() {
        lines.push(errors);
    }
    if form.mode() == LoginMode::Mobile && form.errors().contains(PHONE) {
        lines.push(format!("  expected format: {}", form.phone_placeholder()));
    }
    lines.join("\n")
}

/// Execute the sign-in action.
/// # Errors
/// Returns an error if the client cannot be built or the submission fails.
pub async fn execute(args: Args) -> Result<()> {
    let client = args
        .globals
        .auth_client()
        .context("failed to initialize API client")?;

    let mut form = form_from(args.options, CountryCatalog::default());
    debug!(mode = %form.mode(), "submitting sign-in form");

    match form.submit(&client).await {
        Ok(response) => {
            println!("{SIGN_IN_SUCCEEDED}");
            if let Some(user) = &response.user {
                println!("user: {}", user.id);
            }
            println!("token: {}", response.token);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", failure_report(&form, &err));
            Err(anyhow::Error::new(err).context("sign-in was not completed"))
        }
    }
}
