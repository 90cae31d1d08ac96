//! Form logic shared by the sign-in and sign-up screens.
//!
//! - [`validation`]: per-form rule sets producing [`fields::FieldErrors`].
//! - [`payload`]: request bodies and the sign-up country policy.
//! - [`server_error`]: classification of failed responses.
//! - [`submit`]: the end-to-end pipeline over an [`submit::AuthApi`].
//! - [`state`]: screen state folded from pipeline outcomes.

pub mod catalog;
pub mod fields;
pub mod payload;
pub mod server_error;
pub mod state;
pub mod submit;
pub mod validation;

pub use self::{
    catalog::{Country, CountryCatalog, CountryCode},
    fields::FieldErrors,
    payload::SignUpPolicy,
    state::{Screen, SignInForm, SignUpForm},
    submit::{sign_in, sign_up, AuthApi, SubmitError},
    validation::{validate, LoginCandidate, LoginMode, SchemaKind, SignUpCandidate},
};
