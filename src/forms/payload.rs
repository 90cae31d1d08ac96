//! Wire payloads for the auth endpoints and the sign-up country policy.
//! Payloads carry the password, so they are serialized for the request body
//! only and never logged.

use super::{
    catalog::{CountryCatalog, CountryCode},
    validation::{LoginMode, ValidatedLogin, ValidatedSignUp},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Message shown when the deny-list blocks a sign-up.
pub const COUNTRY_NOT_ALLOWED: &str = "Registration is not available in some countries";

fn expose_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginPayload {
    #[serde(rename = "type")]
    pub mode: LoginMode,
    pub identifier: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
}

impl fmt::Debug for LoginPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginPayload")
            .field("mode", &self.mode)
            .field("identifier", &"***")
            .field("password", &"***")
            .finish()
    }
}

/// Body of `POST /auth/register`: the validated record, country left as its code.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: CountryCode,
    pub phone: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
    pub risk_accepted: bool,
    pub terms_accepted: bool,
    pub marketing_opt_in: bool,
}

impl fmt::Debug for SignUpPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpPayload")
            .field("country", &self.country)
            .field("password", &"***")
            .field("marketing_opt_in", &self.marketing_opt_in)
            .finish_non_exhaustive()
    }
}

/// Build the login body. Mobile identifiers are the dial prefix of the
/// resolved country followed by the phone digits.
#[must_use]
pub fn build_login_payload(login: &ValidatedLogin, catalog: &CountryCatalog) -> LoginPayload {
    match login {
        ValidatedLogin::Email { email, password } => LoginPayload {
            mode: LoginMode::Email,
            identifier: email.clone(),
            password: password.clone(),
        },
        ValidatedLogin::Mobile {
            country,
            phone,
            password,
        } => {
            let country = catalog.resolve(*country);
            LoginPayload {
                mode: LoginMode::Mobile,
                identifier: format!("{}{}", country.dial_prefix, phone),
                password: password.clone(),
            }
        }
    }
}

#[must_use]
pub fn build_sign_up_payload(sign_up: &ValidatedSignUp) -> SignUpPayload {
    SignUpPayload {
        first_name: sign_up.first_name.clone(),
        last_name: sign_up.last_name.clone(),
        email: sign_up.email.clone(),
        country: sign_up.country,
        phone: sign_up.phone.clone(),
        password: sign_up.password.clone(),
        risk_accepted: true,
        terms_accepted: true,
        marketing_opt_in: sign_up.marketing_opt_in,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Registration is not available in some countries")]
    CountryNotAllowed(CountryCode),
}

/// Business rules applied to a schema-valid sign-up before it is sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignUpPolicy {
    denied_countries: Vec<CountryCode>,
}

impl Default for SignUpPolicy {
    fn default() -> Self {
        Self {
            denied_countries: vec![CountryCode::IR],
        }
    }
}

impl SignUpPolicy {
    #[must_use]
    pub fn new(denied_countries: Vec<CountryCode>) -> Self {
        Self { denied_countries }
    }

    #[must_use]
    pub fn denied_countries(&self) -> &[CountryCode] {
        &self.denied_countries
    }

    /// Check the deny-list.
    ///
    /// # Errors
    /// Returns `Rejection::CountryNotAllowed` when the sign-up country is denied.
    pub fn check(&self, sign_up: &ValidatedSignUp) -> Result<(), Rejection> {
        if self.denied_countries.contains(&sign_up.country) {
            return Err(Rejection::CountryNotAllowed(sign_up.country));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::forms::catalog::Country;
    use serde_json::json;

    fn validated_sign_up(country: CountryCode) -> ValidatedSignUp {
        ValidatedSignUp {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            country,
            phone: "7123456789".to_string(),
            password: SecretString::from("analytical".to_string()),
            marketing_opt_in: true,
        }
    }

    #[test]
    fn mobile_identifier_prefixes_dial_code() {
        let login = ValidatedLogin::Mobile {
            country: CountryCode::US,
            phone: "2015550123".to_string(),
            password: SecretString::from("password1".to_string()),
        };
        let payload = build_login_payload(&login, &CountryCatalog::default());
        assert_eq!(payload.identifier, "+12015550123");
        assert_eq!(payload.mode, LoginMode::Mobile);
    }

    #[test]
    fn mobile_identifier_uses_default_entry_when_catalog_misses() {
        const UAE_ONLY: &[Country] = &[Country {
            code: CountryCode::AE,
            display_label: "United Arab Emirates (+971)",
            dial_prefix: "+971",
            phone_placeholder: "050xxxxxxx",
        }];
        let catalog = CountryCatalog::new(UAE_ONLY).unwrap();
        let login = ValidatedLogin::Mobile {
            country: CountryCode::GB,
            phone: "7123456789".to_string(),
            password: SecretString::from("password1".to_string()),
        };
        assert_eq!(
            build_login_payload(&login, &catalog).identifier,
            "+9717123456789"
        );
    }

    #[test]
    fn login_payload_wire_shape() {
        let login = ValidatedLogin::Email {
            email: "a@example.com".to_string(),
            password: SecretString::from("password1".to_string()),
        };
        let payload = build_login_payload(&login, &CountryCatalog::default());
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "type": "email",
                "identifier": "a@example.com",
                "password": "password1"
            })
        );
    }

    #[test]
    fn sign_up_payload_wire_shape() {
        let payload = build_sign_up_payload(&validated_sign_up(CountryCode::GB));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "country": "GB",
                "phone": "7123456789",
                "password": "analytical",
                "riskAccepted": true,
                "termsAccepted": true,
                "marketingOptIn": true
            })
        );
    }

    #[test]
    fn debug_output_hides_credentials() {
        let payload = build_sign_up_payload(&validated_sign_up(CountryCode::GB));
        let rendered = format!("{payload:?}");
        assert!(!rendered.contains("analytical"));
        assert!(!rendered.contains("ada@example.com"));
    }

    #[test]
    fn default_policy_denies_iran_only() {
        let policy = SignUpPolicy::default();
        assert_eq!(
            policy.check(&validated_sign_up(CountryCode::IR)),
            Err(Rejection::CountryNotAllowed(CountryCode::IR))
        );
        for country in [CountryCode::US, CountryCode::GB, CountryCode::AE] {
            assert!(policy.check(&validated_sign_up(country)).is_ok());
        }
    }

    #[test]
    fn rejection_message_is_global_text() {
        let rejection = Rejection::CountryNotAllowed(CountryCode::IR);
        assert_eq!(rejection.to_string(), COUNTRY_NOT_ALLOWED);
    }

    #[test]
    fn empty_policy_allows_everything() {
        let policy = SignUpPolicy::new(Vec::new());
        assert!(policy.check(&validated_sign_up(CountryCode::IR)).is_ok());
    }
}
