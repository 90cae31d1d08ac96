//! Submission pipeline: validate, apply business rules, build the payload,
//! make the single network call, and translate failures into errors the
//! forms can display.
//!
//! Flow Overview: sign-in validates with the rule set of the active tab and
//! posts `{ type, identifier, password }`. Sign-up validates the full record,
//! runs the country deny-list, then posts the record. Failures at any stage
//! stop the flow before later stages run.

use super::{
    catalog::CountryCatalog,
    fields::FieldErrors,
    payload::{build_login_payload, build_sign_up_payload, LoginPayload, Rejection, SignUpPayload, SignUpPolicy},
    server_error::map_server_error,
    validation::{validate_login, validate_sign_up, LoginCandidate, SignUpCandidate},
};
use crate::client::{AppError, LoginResponse, RegisterResponse};
use std::future::Future;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use ulid::Ulid;

pub const SIGN_IN_FAILED: &str = "Sign-in failed!";
pub const SIGN_UP_FAILED: &str = "Sign-up failed!";
/// Banner for a sign-in blocked by local validation.
pub const SIGN_IN_INVALID: &str = "Sign-in failed! The details entered are not valid.";
pub const SIGN_IN_SUCCEEDED: &str = "Signed in successfully. Welcome!";
pub const SIGN_UP_SUCCEEDED: &str = "Account created. You can now sign in.";

/// Network seam for the pipeline. Implemented by [`crate::client::AuthClient`].
pub trait AuthApi {
    fn login(
        &self,
        payload: &LoginPayload,
    ) -> impl Future<Output = Result<LoginResponse, AppError>> + Send;

    fn register(
        &self,
        payload: &SignUpPayload,
    ) -> impl Future<Output = Result<RegisterResponse, AppError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Local rules failed; no request was made.
    #[error("submitted values are invalid")]
    Validation(FieldErrors),
    /// Valid input refused by policy; no request was made.
    #[error(transparent)]
    Rejected(#[from] Rejection),
    /// The server flagged specific fields.
    #[error("server rejected submitted values")]
    ServerFields(FieldErrors),
    /// The server returned a message not tied to a field.
    #[error("{0}")]
    ServerMessage(String),
    /// Transport failure or an error body of unknown shape.
    #[error("{message}")]
    Failed {
        message: &'static str,
        source: AppError,
    },
}

impl SubmitError {
    /// Classify a failed call. `generic` is used when the response carries
    /// nothing the form can show.
    #[must_use]
    pub fn from_server(error: AppError, generic: &'static str) -> Self {
        let mapped = map_server_error(&error);
        if mapped.fields().next().is_some() {
            return Self::ServerFields(mapped);
        }
        match mapped.global_message() {
            Some(message) => Self::ServerMessage(message.to_string()),
            None => Self::Failed {
                message: generic,
                source: error,
            },
        }
    }

    /// Every error as a field map, global messages under `_global`.
    #[must_use]
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            Self::Validation(errors) | Self::ServerFields(errors) => errors.clone(),
            Self::Rejected(rejection) => FieldErrors::global(rejection.to_string()),
            Self::ServerMessage(message) => FieldErrors::global(message.clone()),
            Self::Failed { message, .. } => FieldErrors::global(*message),
        }
    }

    /// Banner text, if this error has one.
    #[must_use]
    pub fn global_message(&self) -> Option<String> {
        self.field_errors().global_message().map(str::to_string)
    }

    /// True when the request never left the client.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Rejected(_))
    }
}

/// Validate and submit the sign-in form.
///
/// # Errors
/// Returns `SubmitError::Validation` before any request when the active tab's
/// rules fail, otherwise the classified server or transport failure.
#[instrument(skip_all, fields(submission = %Ulid::new(), mode = %candidate.mode))]
pub async fn sign_in<A: AuthApi>(
    api: &A,
    candidate: &LoginCandidate,
    catalog: &CountryCatalog,
) -> Result<LoginResponse, SubmitError> {
    let login = validate_login(candidate, catalog).map_err(|errors| {
        debug!(fields = errors.len(), "sign-in validation failed");
        SubmitError::Validation(errors)
    })?;

    let payload = build_login_payload(&login, catalog);

    let response = api.login(&payload).await.map_err(|err| {
        warn!(status = ?err.status(), "sign-in request failed: {err}");
        SubmitError::from_server(err, SIGN_IN_FAILED)
    })?;

    info!("sign-in succeeded");

    Ok(response)
}

/// Validate, check policy, and submit the sign-up form. The country must be
/// one of `catalog`'s entries.
///
/// # Errors
/// Returns `SubmitError::Validation` or `SubmitError::Rejected` before any
/// request, otherwise the classified server or transport failure.
#[instrument(skip_all, fields(submission = %Ulid::new()))]
pub async fn sign_up<A: AuthApi>(
    api: &A,
    candidate: &SignUpCandidate,
    policy: &SignUpPolicy,
    catalog: &CountryCatalog,
) -> Result<RegisterResponse, SubmitError> {
    let sign_up = validate_sign_up(candidate, catalog).map_err(|errors| {
        debug!(fields = errors.len(), "sign-up validation failed");
        SubmitError::Validation(errors)
    })?;

    policy.check(&sign_up).inspect_err(|rejection| {
        info!(?rejection, "sign-up rejected by policy");
    })?;

    let payload = build_sign_up_payload(&sign_up);

    let response = api.register(&payload).await.map_err(|err| {
        warn!(status = ?err.status(), "sign-up request failed: {err}");
        SubmitError::from_server(err, SIGN_UP_FAILED)
    })?;

    info!(user_id = %response.id, "sign-up succeeded");

    Ok(response)
}
