//! HTTP helpers for JSON APIs with consistent timeouts and error handling.
//! Failed responses are classified into [`ServerErrorBody`] here so callers
//! never inspect raw bodies. The helpers do not log request bodies; payloads
//! carry passwords.

use super::errors::AppError;
use crate::forms::server_error::ServerErrorBody;
use reqwest::{Client, Response};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{Instrument, debug, info_span};

/// Builds the shared reqwest client with the crate user agent and timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, AppError> {
    Client::builder()
        .user_agent(crate::APP_USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))
}

/// Posts JSON and parses a JSON response.
pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
    client: &Client,
    url: &str,
    body: &B,
) -> Result<T, AppError> {
    let span = info_span!("http.request", http.method = "POST", url = %url);
    let response = client
        .post(url)
        .json(body)
        .send()
        .instrument(span)
        .await
        .map_err(map_request_error)?;

    handle_json_response(response).await
}

/// Maps reqwest failures into user-facing `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and classifies HTTP error bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(|err| {
            if err.is_timeout() {
                AppError::Timeout("Request timed out. Please try again.".to_string())
            } else {
                AppError::Parse(format!("Failed to decode response: {err}"))
            }
        });
    }

    let body = response.text().await.unwrap_or_default();
    let body = ServerErrorBody::from_body(&body);
    debug!(status = status.as_u16(), ?body, "request failed");

    Err(AppError::Http {
        status: status.as_u16(),
        body,
    })
}
