//! Local validation for the sign-in and sign-up forms.
//!
//! Validation is pure and exhaustive: every rule of every field is checked in
//! a single pass and each violated field gets one entry in the returned
//! [`FieldErrors`]. When a field breaks several rules the last rule checked
//! supplies the message. Countries must belong to the catalog the form uses.
//! Nothing here logs; callers decide how errors are displayed.

use super::{
    catalog::{CountryCatalog, CountryCode},
    fields::{self, FieldErrors},
};
use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Minimum password length in UTF-16 code units, the unit browsers count
/// input length in. No other password rules apply.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Minimum phone length in UTF-16 code units.
pub const MIN_PHONE_LENGTH: usize = 5;

// Negative lookaheads for a leading dot and `..` are checked separately.
const EMAIL_PATTERN: &str =
    r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$";

static EMAIL_REGEX: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(EMAIL_PATTERN).ok());

pub mod messages {
    pub const EMAIL_REQUIRED: &str = "Email must not be empty";
    pub const EMAIL_INVALID: &str = "Email address is invalid";
    pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
    pub const COUNTRY_REQUIRED: &str = "Select a country";
    pub const COUNTRY_UNSUPPORTED: &str = "Selected country is not supported";
    pub const PHONE_DIGITS_ONLY: &str = "Use digits only";
    pub const PHONE_TOO_SHORT: &str = "Mobile number is too short";
    pub const FIRST_NAME_REQUIRED: &str = "Enter your first name";
    pub const LAST_NAME_REQUIRED: &str = "Enter your last name";
    pub const RISK_REQUIRED: &str = "You must accept the risk disclaimer";
    pub const TERMS_REQUIRED: &str = "You must accept the terms and conditions";
    pub const FORM_MISMATCH: &str = "Submitted form does not match the selected screen";
}

/// Sign-in tab. Each tab requires a different identity channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMode {
    #[default]
    Email,
    Mobile,
}

impl LoginMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Mobile => "mobile",
        }
    }

    #[must_use]
    pub const fn schema(self) -> SchemaKind {
        match self {
            Self::Email => SchemaKind::EmailLogin,
            Self::Mobile => SchemaKind::MobileLogin,
        }
    }
}

impl fmt::Display for LoginMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoginMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "mobile" => Ok(Self::Mobile),
            _ => Err(format!("invalid sign-in mode: {value}")),
        }
    }
}

/// Rule set to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaKind {
    EmailLogin,
    MobileLogin,
    SignUp,
}

/// Raw sign-in form values. Inputs are plain strings; an empty string is a
/// missing value.
#[derive(Clone, Debug)]
pub struct LoginCandidate {
    pub mode: LoginMode,
    pub email: String,
    pub country: String,
    pub phone: String,
    pub password: SecretString,
}

/// Raw sign-up form values. Checkboxes are `None` when never touched.
#[derive(Clone, Debug)]
pub struct SignUpCandidate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: String,
    pub phone: String,
    pub password: SecretString,
    pub risk_accepted: Option<bool>,
    pub terms_accepted: Option<bool>,
    pub marketing_opt_in: Option<bool>,
}

impl Default for LoginCandidate {
    fn default() -> Self {
        Self {
            mode: LoginMode::default(),
            email: String::new(),
            country: String::new(),
            phone: String::new(),
            password: SecretString::from(String::new()),
        }
    }
}

impl Default for SignUpCandidate {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            country: String::new(),
            phone: String::new(),
            password: SecretString::from(String::new()),
            risk_accepted: None,
            terms_accepted: None,
            marketing_opt_in: None,
        }
    }
}

#[derive(Clone, Debug)]
pub enum Candidate {
    Login(LoginCandidate),
    SignUp(SignUpCandidate),
}

/// Sign-in input that passed validation for its mode.
#[derive(Clone, Debug)]
pub enum ValidatedLogin {
    Email {
        email: String,
        password: SecretString,
    },
    Mobile {
        country: CountryCode,
        phone: String,
        password: SecretString,
    },
}

impl ValidatedLogin {
    #[must_use]
    pub const fn mode(&self) -> LoginMode {
        match self {
            Self::Email { .. } => LoginMode::Email,
            Self::Mobile { .. } => LoginMode::Mobile,
        }
    }
}

/// Sign-up input that passed validation. Both acceptances were literally
/// `true`, so they are not stored.
#[derive(Clone, Debug)]
pub struct ValidatedSignUp {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: CountryCode,
    pub phone: String,
    pub password: SecretString,
    pub marketing_opt_in: bool,
}

#[derive(Clone, Debug)]
pub enum ValidatedRecord {
    Login(ValidatedLogin),
    SignUp(ValidatedSignUp),
}

/// Validate `candidate` against the rules of `kind`.
///
/// # Errors
/// Returns every violated rule keyed by field path. A candidate of the wrong
/// shape for `kind` yields a single `_global` entry.
pub fn validate(
    kind: SchemaKind,
    candidate: &Candidate,
    catalog: &CountryCatalog,
) -> Result<ValidatedRecord, FieldErrors> {
    match (kind, candidate) {
        (SchemaKind::EmailLogin, Candidate::Login(login)) => {
            validate_email_login(login).map(ValidatedRecord::Login)
        }
        (SchemaKind::MobileLogin, Candidate::Login(login)) => {
            validate_mobile_login(login, catalog).map(ValidatedRecord::Login)
        }
        (SchemaKind::SignUp, Candidate::SignUp(sign_up)) => {
            validate_sign_up(sign_up, catalog).map(ValidatedRecord::SignUp)
        }
        _ => Err(FieldErrors::global(messages::FORM_MISMATCH)),
    }
}

/// Validate sign-in values with the rule set of their current mode.
///
/// # Errors
/// Returns every violated rule keyed by field path.
pub fn validate_login(
    candidate: &LoginCandidate,
    catalog: &CountryCatalog,
) -> Result<ValidatedLogin, FieldErrors> {
    match candidate.mode {
        LoginMode::Email => validate_email_login(candidate),
        LoginMode::Mobile => validate_mobile_login(candidate, catalog),
    }
}

fn validate_email_login(candidate: &LoginCandidate) -> Result<ValidatedLogin, FieldErrors> {
    let mut errors = FieldErrors::new();
    check_email(&mut errors, &candidate.email);
    check_password(&mut errors, &candidate.password);
    errors.into_result()?;

    Ok(ValidatedLogin::Email {
        email: candidate.email.clone(),
        password: candidate.password.clone(),
    })
}

fn validate_mobile_login(
    candidate: &LoginCandidate,
    catalog: &CountryCatalog,
) -> Result<ValidatedLogin, FieldErrors> {
    let mut errors = FieldErrors::new();
    let country = check_country(&mut errors, &candidate.country, catalog);
    check_phone(&mut errors, &candidate.phone);
    check_password(&mut errors, &candidate.password);
    errors.into_result()?;

    match country {
        Some(country) => Ok(ValidatedLogin::Mobile {
            country,
            phone: candidate.phone.clone(),
            password: candidate.password.clone(),
        }),
        None => Err(FieldErrors::global(messages::COUNTRY_REQUIRED)),
    }
}

/// Validate sign-up values.
///
/// # Errors
/// Returns every violated rule keyed by field path.
pub fn validate_sign_up(
    candidate: &SignUpCandidate,
    catalog: &CountryCatalog,
) -> Result<ValidatedSignUp, FieldErrors> {
    let mut errors = FieldErrors::new();

    check_required(
        &mut errors,
        fields::FIRST_NAME,
        &candidate.first_name,
        messages::FIRST_NAME_REQUIRED,
    );
    check_required(
        &mut errors,
        fields::LAST_NAME,
        &candidate.last_name,
        messages::LAST_NAME_REQUIRED,
    );
    check_email(&mut errors, &candidate.email);
    let country = check_country(&mut errors, &candidate.country, catalog);
    check_phone(&mut errors, &candidate.phone);
    check_password(&mut errors, &candidate.password);
    check_accepted(
        &mut errors,
        fields::RISK_ACCEPTED,
        candidate.risk_accepted,
        messages::RISK_REQUIRED,
    );
    check_accepted(
        &mut errors,
        fields::TERMS_ACCEPTED,
        candidate.terms_accepted,
        messages::TERMS_REQUIRED,
    );
    errors.into_result()?;

    match country {
        Some(country) => Ok(ValidatedSignUp {
            first_name: candidate.first_name.clone(),
            last_name: candidate.last_name.clone(),
            email: candidate.email.clone(),
            country,
            phone: candidate.phone.clone(),
            password: candidate.password.clone(),
            marketing_opt_in: candidate.marketing_opt_in.unwrap_or(false),
        }),
        None => Err(FieldErrors::global(messages::COUNTRY_REQUIRED)),
    }
}

/// Address grammar check, without the emptiness rule.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    if email.starts_with('.') || email.contains("..") {
        return false;
    }
    EMAIL_REGEX
        .as_ref()
        .is_some_and(|regex| regex.is_match(email))
}

/// True when `phone` is only ASCII digits and long enough.
#[must_use]
pub fn valid_phone(phone: &str) -> bool {
    phone_error(phone).is_none()
}

fn input_length(value: &str) -> usize {
    value.encode_utf16().count()
}

// Both rules run; the length rule is checked last.
fn phone_error(phone: &str) -> Option<&'static str> {
    let mut message = None;
    if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
        message = Some(messages::PHONE_DIGITS_ONLY);
    }
    if input_length(phone) < MIN_PHONE_LENGTH {
        message = Some(messages::PHONE_TOO_SHORT);
    }
    message
}

fn check_required(errors: &mut FieldErrors, path: &str, value: &str, message: &str) {
    if value.is_empty() {
        errors.insert(path, message);
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.is_empty() {
        errors.insert(fields::EMAIL, messages::EMAIL_REQUIRED);
    }
    if !valid_email(email) {
        errors.insert(fields::EMAIL, messages::EMAIL_INVALID);
    }
}

fn check_password(errors: &mut FieldErrors, password: &SecretString) {
    if input_length(password.expose_secret()) < MIN_PASSWORD_LENGTH {
        errors.insert(fields::PASSWORD, messages::PASSWORD_TOO_SHORT);
    }
}

fn check_country(
    errors: &mut FieldErrors,
    country: &str,
    catalog: &CountryCatalog,
) -> Option<CountryCode> {
    if country.is_empty() {
        errors.insert(fields::COUNTRY, messages::COUNTRY_REQUIRED);
        return None;
    }
    match country.parse::<CountryCode>() {
        Ok(code) if catalog.contains(code) => Some(code),
        _ => {
            errors.insert(fields::COUNTRY, messages::COUNTRY_UNSUPPORTED);
            None
        }
    }
}

fn check_phone(errors: &mut FieldErrors, phone: &str) {
    if let Some(message) = phone_error(phone) {
        errors.insert(fields::PHONE, message);
    }
}

fn check_accepted(errors: &mut FieldErrors, path: &str, accepted: Option<bool>, message: &str) {
    if accepted != Some(true) {
        errors.insert(path, message);
    }
}
