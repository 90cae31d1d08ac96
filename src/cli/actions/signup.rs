use crate::{
    cli::{actions::render_errors, commands::signup::Options, globals::GlobalArgs},
    forms::{CountryCatalog, Screen, SignUpForm, submit::SIGN_UP_SUCCEEDED},
};
use anyhow::{Context, Result};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub options: Options,
}

/// Fill the sign-up form from the options. Acceptance boxes reflect the
/// flags exactly; omitting one counts as unchecked.
#[must_use]
pub fn form_from(options: Options, catalog: CountryCatalog) -> SignUpForm {
    let mut form = SignUpForm::new(catalog, options.policy);

    let values = form.values_mut();
    values.first_name = options.first_name;
    values.last_name = options.last_name;
    values.email = options.email;
    if let Some(country) = options.country {
        values.country = country;
    }
    values.phone = options.phone;
    values.password = options.password;
    values.risk_accepted = Some(options.accept_risk);
    values.terms_accepted = Some(options.accept_terms);
    values.marketing_opt_in = Some(options.marketing);

    form
}

/// Execute the sign-up action.
/// # Errors
/// Returns an error if the client cannot be built or the submission fails.
pub async fn execute(args: Args) -> Result<()> {
    let client = args
        .globals
        .auth_client()
        .context("failed to initialize API client")?;

    let mut form = form_from(args.options, CountryCatalog::default());
    debug!(
        denied = form.policy().denied_countries().len(),
        "submitting sign-up form"
    );

    match form.submit(&client).await {
        Ok(response) => {
            println!("{SIGN_UP_SUCCEEDED}");
            if let Some(message) = &response.message {
                println!("{message}");
            }
            println!("id: {}", response.id);
            println!("next: {}", Screen::SignUp.after_success().hash());
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", render_errors(form.errors()));
            Err(anyhow::Error::new(err).context("sign-up was not completed"))
        }
    }
}
