use crate::client::{AppError, AuthClient, ClientConfig};
use std::time::Duration;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub client: ClientConfig,
}

impl GlobalArgs {
    /// # Errors
    /// Returns `AppError::Config` when the base URL is not a usable HTTP(S) URL.
    pub fn new(api_base_url: &str, timeout_seconds: u64) -> Result<Self, AppError> {
        let client =
            ClientConfig::new(api_base_url)?.with_timeout(Duration::from_secs(timeout_seconds));
        Ok(Self { client })
    }

    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be built.
    pub fn auth_client(&self) -> Result<AuthClient, AppError> {
        AuthClient::new(self.client.clone())
    }
}
