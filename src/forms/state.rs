//! Screen state for the sign-in and sign-up forms: current values, the errors
//! shown next to each field, and the banner error. Submitting runs the
//! pipeline in [`super::submit`] and folds its outcome back into the state.

use super::{
    catalog::{Country, CountryCatalog},
    fields::FieldErrors,
    payload::SignUpPolicy,
    submit::{self, AuthApi, SubmitError},
    validation::{LoginCandidate, LoginMode, SignUpCandidate},
};
use crate::client::{LoginResponse, RegisterResponse};

/// Screen selected by the location hash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    SignIn,
    SignUp,
}

impl Screen {
    /// Any route under `/signup` selects the sign-up screen; anything else is
    /// sign-in. The leading `#` is optional.
    #[must_use]
    pub fn from_hash(hash: &str) -> Self {
        let route = hash.trim().trim_start_matches('#');
        if route.starts_with("/signup") {
            Self::SignUp
        } else {
            Self::SignIn
        }
    }

    #[must_use]
    pub const fn hash(self) -> &'static str {
        match self {
            Self::SignIn => "#/signin",
            Self::SignUp => "#/signup",
        }
    }

    /// Screen to show once a submission on `self` succeeds.
    #[must_use]
    pub const fn after_success(self) -> Self {
        Self::SignIn
    }
}

fn apply(errors: &mut FieldErrors, error: &SubmitError) {
    *errors = error.field_errors();
}

#[derive(Clone, Debug)]
pub struct SignInForm {
    catalog: CountryCatalog,
    values: LoginCandidate,
    errors: FieldErrors,
}

impl SignInForm {
    #[must_use]
    pub fn new(catalog: CountryCatalog) -> Self {
        Self {
            values: Self::defaults(&catalog, LoginMode::default()),
            catalog,
            errors: FieldErrors::new(),
        }
    }

    fn defaults(catalog: &CountryCatalog, mode: LoginMode) -> LoginCandidate {
        LoginCandidate {
            mode,
            country: catalog.default_entry().code.to_string(),
            ..LoginCandidate::default()
        }
    }

    #[must_use]
    pub const fn mode(&self) -> LoginMode {
        self.values.mode
    }

    /// Change tab. Values go back to their defaults and the banner clears.
    pub fn switch_mode(&mut self, mode: LoginMode) {
        self.values = Self::defaults(&self.catalog, mode);
        self.errors = FieldErrors::new();
    }

    #[must_use]
    pub const fn values(&self) -> &LoginCandidate {
        &self.values
    }

    /// Mutable access for editing fields. The tab is changed with
    /// [`Self::switch_mode`].
    pub fn values_mut(&mut self) -> &mut LoginCandidate {
        &mut self.values
    }

    #[must_use]
    pub fn selected_country(&self) -> &'static Country {
        self.catalog.resolve_str(&self.values.country)
    }

    #[must_use]
    pub fn phone_placeholder(&self) -> &'static str {
        self.selected_country().phone_placeholder
    }

    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub fn global_error(&self) -> Option<&str> {
        self.errors.global_message()
    }

    pub fn apply_error(&mut self, error: &SubmitError) {
        apply(&mut self.errors, error);
    }

    /// Reset after a successful sign-in, keeping the current tab.
    pub fn complete(&mut self) {
        self.switch_mode(self.values.mode);
    }

    /// Run the sign-in pipeline and update the form with its outcome.
    ///
    /// # Errors
    /// Returns the pipeline error after placing it on the form.
    pub async fn submit<A: AuthApi>(&mut self, api: &A) -> Result<LoginResponse, SubmitError> {
        self.errors = FieldErrors::new();
        match submit::sign_in(api, &self.values, &self.catalog).await {
            Ok(response) => {
                self.complete();
                Ok(response)
            }
            Err(err) => {
                self.apply_error(&err);
                Err(err)
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct SignUpForm {
    catalog: CountryCatalog,
    policy: SignUpPolicy,
    values: SignUpCandidate,
    errors: FieldErrors,
}

impl SignUpForm {
    #[must_use]
    pub fn new(catalog: CountryCatalog, policy: SignUpPolicy) -> Self {
        Self {
            values: Self::defaults(&catalog),
            catalog,
            policy,
            errors: FieldErrors::new(),
        }
    }

    fn defaults(catalog: &CountryCatalog) -> SignUpCandidate {
        SignUpCandidate {
            country: catalog.default_entry().code.to_string(),
            risk_accepted: Some(true),
            terms_accepted: Some(true),
            marketing_opt_in: Some(false),
            ..SignUpCandidate::default()
        }
    }

    #[must_use]
    pub const fn values(&self) -> &SignUpCandidate {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut SignUpCandidate {
        &mut self.values
    }

    #[must_use]
    pub const fn policy(&self) -> &SignUpPolicy {
        &self.policy
    }

    #[must_use]
    pub fn phone_placeholder(&self) -> &'static str {
        self.catalog.resolve_str(&self.values.country).phone_placeholder
    }

    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub fn global_error(&self) -> Option<&str> {
        self.errors.global_message()
    }

    pub fn apply_error(&mut self, error: &SubmitError) {
        apply(&mut self.errors, error);
    }

    pub fn complete(&mut self) {
        self.values = Self::defaults(&self.catalog);
        self.errors = FieldErrors::new();
    }

    /// Run the sign-up pipeline. On success the form resets and the caller
    /// should move to [`Screen::SignUp`]`.after_success()`.
    ///
    /// # Errors
    /// Returns the pipeline error after placing it on the form.
    pub async fn submit<A: AuthApi>(&mut self, api: &A) -> Result<RegisterResponse, SubmitError> {
        self.errors = FieldErrors::new();
        match submit::sign_up(api, &self.values, &self.policy, &self.catalog).await {
            Ok(response) => {
                self.complete();
                Ok(response)
            }
            Err(err) => {
                self.apply_error(&err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{
        client::AppError,
        forms::{
            fields,
            payload::{LoginPayload, SignUpPayload, COUNTRY_NOT_ALLOWED},
            server_error::ServerErrorBody,
            validation::messages,
        },
    };
    use secrecy::{ExposeSecret, SecretString};
    use serde_json::json;

    struct StaticApi(Result<(), AppError>);

    impl AuthApi for StaticApi {
        async fn login(&self, _payload: &LoginPayload) -> Result<LoginResponse, AppError> {
            self.0.clone().map(|()| LoginResponse {
                token: "t0k3n".to_string(),
                user: None,
            })
        }

        async fn register(&self, _payload: &SignUpPayload) -> Result<RegisterResponse, AppError> {
            self.0.clone().map(|()| RegisterResponse {
                id: "42".to_string(),
                message: None,
            })
        }
    }

    fn filled_sign_up(form: &mut SignUpForm, country: &str) {
        let values = form.values_mut();
        values.first_name = "Ada".to_string();
        values.last_name = "Lovelace".to_string();
        values.email = "ada@example.com".to_string();
        values.country = country.to_string();
        values.phone = "7123456789".to_string();
        values.password = SecretString::from("analytical".to_string());
    }

    #[test]
    fn screen_routing_follows_hash() {
        assert_eq!(Screen::from_hash("#/signup"), Screen::SignUp);
        assert_eq!(Screen::from_hash("#/signin"), Screen::SignIn);
        assert_eq!(Screen::from_hash(""), Screen::SignIn);
        assert_eq!(Screen::from_hash("#/unknown"), Screen::SignIn);
        assert_eq!(Screen::from_hash("#/signup/"), Screen::SignUp);
        assert_eq!(Screen::from_hash("#/signup?ref=mail"), Screen::SignUp);
        assert_eq!(Screen::from_hash("/signup"), Screen::SignUp);
        assert_eq!(Screen::from_hash("#/sign"), Screen::SignIn);
        assert_eq!(Screen::SignUp.after_success(), Screen::SignIn);
        assert_eq!(Screen::from_hash(Screen::SignUp.hash()), Screen::SignUp);
    }

    #[test]
    fn sign_in_defaults_to_email_and_first_country() {
        let form = SignInForm::new(CountryCatalog::default());
        assert_eq!(form.mode(), LoginMode::Email);
        assert_eq!(form.values().country, "US");
        assert_eq!(form.phone_placeholder(), "201-555-0123");
        assert!(form.global_error().is_none());
    }

    #[test]
    fn placeholder_tracks_selected_country() {
        let mut form = SignInForm::new(CountryCatalog::default());
        form.values_mut().country = "GB".to_string();
        assert_eq!(form.phone_placeholder(), "07123 456789");

        form.values_mut().country = "ZZ".to_string();
        assert_eq!(form.phone_placeholder(), "201-555-0123");
    }

    #[test]
    fn switching_mode_clears_values_and_banner() {
        let mut form = SignInForm::new(CountryCatalog::default());
        form.values_mut().email = "a@example.com".to_string();
        form.values_mut().country = "AE".to_string();
        form.apply_error(&SubmitError::ServerMessage("server unavailable".to_string()));
        assert_eq!(form.global_error(), Some("server unavailable"));

        form.switch_mode(LoginMode::Mobile);

        assert_eq!(form.mode(), LoginMode::Mobile);
        assert!(form.values().email.is_empty());
        assert_eq!(form.values().country, "US");
        assert!(form.global_error().is_none());
    }

    #[tokio::test]
    async fn failed_sign_in_places_field_errors() {
        let mut form = SignInForm::new(CountryCatalog::default());
        form.values_mut().email = "not-an-email".to_string();
        form.values_mut().password = SecretString::from("password1".to_string());

        let err = form.submit(&StaticApi(Ok(()))).await.unwrap_err();

        assert!(err.is_local());
        assert_eq!(form.errors().get(fields::EMAIL), Some(messages::EMAIL_INVALID));
        assert!(form.global_error().is_none());
        assert_eq!(form.values().email, "not-an-email");
    }

    #[tokio::test]
    async fn successful_sign_in_resets_the_form() {
        let mut form = SignInForm::new(CountryCatalog::default());
        form.switch_mode(LoginMode::Mobile);
        form.values_mut().phone = "2015550123".to_string();
        form.values_mut().password = SecretString::from("password1".to_string());

        let response = form.submit(&StaticApi(Ok(()))).await.unwrap();

        assert_eq!(response.token, "t0k3n");
        assert_eq!(form.mode(), LoginMode::Mobile);
        assert!(form.values().phone.is_empty());
        assert!(form.values().password.expose_secret().is_empty());
    }

    #[test]
    fn sign_up_defaults_match_the_screen() {
        let form = SignUpForm::new(CountryCatalog::default(), SignUpPolicy::default());
        assert_eq!(form.values().risk_accepted, Some(true));
        assert_eq!(form.values().terms_accepted, Some(true));
        assert_eq!(form.values().marketing_opt_in, Some(false));
        assert_eq!(form.values().country, "US");
    }

    #[tokio::test]
    async fn denied_country_shows_banner() {
        let mut form = SignUpForm::new(CountryCatalog::default(), SignUpPolicy::default());
        filled_sign_up(&mut form, "IR");

        form.submit(&StaticApi(Ok(()))).await.unwrap_err();

        assert_eq!(form.global_error(), Some(COUNTRY_NOT_ALLOWED));
        assert_eq!(form.values().country, "IR");
    }

    #[tokio::test]
    async fn server_errors_replace_previous_errors() {
        let mut form = SignUpForm::new(CountryCatalog::default(), SignUpPolicy::default());
        filled_sign_up(&mut form, "GB");
        form.apply_error(&SubmitError::ServerMessage("stale".to_string()));

        let api = StaticApi(Err(AppError::Http {
            status: 422,
            body: ServerErrorBody::classify(&json!({ "errors": { "email": "already used" } })),
        }));
        form.submit(&api).await.unwrap_err();

        assert_eq!(form.errors().get(fields::EMAIL), Some("already used"));
        assert!(form.global_error().is_none());
    }

    #[tokio::test]
    async fn successful_sign_up_resets_to_defaults() {
        let mut form = SignUpForm::new(CountryCatalog::default(), SignUpPolicy::default());
        filled_sign_up(&mut form, "AE");
        form.values_mut().marketing_opt_in = Some(true);

        let response = form.submit(&StaticApi(Ok(()))).await.unwrap();

        assert_eq!(response.id, "42");
        assert!(form.values().first_name.is_empty());
        assert_eq!(form.values().marketing_opt_in, Some(false));
        assert_eq!(form.values().country, "US");
    }
}
