//! Client for the remote auth API (`POST /auth/login`, `POST /auth/register`).
//! Centralizing the transport keeps timeouts, user agent, and error
//! classification consistent for both screens.

mod api;
pub mod config;
pub mod errors;
pub mod types;

pub use self::{
    config::ClientConfig,
    errors::AppError,
    types::{LoginResponse, LoginUser, RegisterResponse},
};

use crate::forms::{
    payload::{LoginPayload, SignUpPayload},
    submit::AuthApi,
};
use reqwest::Client;

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";

#[derive(Clone, Debug)]
pub struct AuthClient {
    http: Client,
    config: ClientConfig,
}

impl AuthClient {
    /// Build a client for the configured API.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be initialized.
    pub fn new(config: ClientConfig) -> Result<Self, AppError> {
        let http = api::build_client(config.timeout)?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl AuthApi for AuthClient {
    async fn login(&self, payload: &LoginPayload) -> Result<LoginResponse, AppError> {
        api::post_json(&self.http, &self.config.url(LOGIN_PATH), payload).await
    }

    async fn register(&self, payload: &SignUpPayload) -> Result<RegisterResponse, AppError> {
        api::post_json(&self.http, &self.config.url(REGISTER_PATH), payload).await
    }
}
