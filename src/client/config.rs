//! Connection settings for the auth API. Values are public; do not store
//! secrets here.

use super::errors::AppError;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.mock.local";
/// Default request timeout applied to every call.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl ClientConfig {
    /// Build a config for `api_base_url`.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the URL is empty, unparsable, or not HTTP(S).
    pub fn new(api_base_url: &str) -> Result<Self, AppError> {
        let api_base_url = normalize_base_url(api_base_url)?;
        Ok(Self {
            api_base_url,
            ..Self::default()
        })
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        build_url_with_base(&self.api_base_url, path)
    }
}

fn normalize_base_url(value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Config("API base URL is empty".to_string()));
    }

    let url = Url::parse(trimmed)
        .map_err(|err| AppError::Config(format!("Invalid API base URL {trimmed}: {err}")))?;

    match url.scheme() {
        "http" | "https" => Ok(trimmed.trim_end_matches('/').to_string()),
        scheme => Err(AppError::Config(format!(
            "Unsupported API base URL scheme: {scheme}"
        ))),
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
