//! Classification of failed auth API responses.
//!
//! Error bodies are decoded once, at the HTTP boundary, into
//! [`ServerErrorBody`]. Anything that is not a recognized shape becomes
//! `Unrecognized` instead of an error, so mapping never fails.

use super::fields::FieldErrors;
use crate::client::AppError;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ServerErrorBody {
    /// `{ "errors": { "<field path>": "msg" | ["msg", ...] } }`
    FieldErrors(FieldErrors),
    /// `{ "message": "msg" }` without a non-empty `errors` object.
    GlobalMessage(String),
    #[default]
    Unrecognized,
}

impl ServerErrorBody {
    /// Classify a raw response body. Non-JSON bodies are `Unrecognized`.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str::<Value>(body).map_or(Self::Unrecognized, |value| Self::classify(&value))
    }

    /// Classify a decoded JSON body. An empty `errors` object defers to
    /// `message`.
    #[must_use]
    pub fn classify(body: &Value) -> Self {
        if let Some(errors) = body
            .get("errors")
            .and_then(Value::as_object)
            .filter(|errors| !errors.is_empty())
        {
            return Self::FieldErrors(field_errors(errors));
        }

        match body.get("message").and_then(Value::as_str) {
            Some(message) if !message.is_empty() => Self::GlobalMessage(message.to_string()),
            _ => Self::Unrecognized,
        }
    }

    /// Field errors for display. `GlobalMessage` maps to the `_global` key and
    /// `Unrecognized` to an empty map.
    #[must_use]
    pub fn to_field_errors(&self) -> FieldErrors {
        match self {
            Self::FieldErrors(errors) => errors.clone(),
            Self::GlobalMessage(message) => FieldErrors::global(message.clone()),
            Self::Unrecognized => FieldErrors::new(),
        }
    }
}

fn field_errors(errors: &Map<String, Value>) -> FieldErrors {
    errors
        .iter()
        .map(|(path, value)| (path.clone(), message_text(value)))
        .collect()
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(message) => message.clone(),
        Value::Array(items) => items
            .iter()
            .map(message_text)
            .collect::<Vec<_>>()
            .join(" "),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Field errors carried by a failed call. Transport failures and bodies of
/// unknown shape yield an empty map; callers then show their generic message.
#[must_use]
pub fn map_server_error(error: &AppError) -> FieldErrors {
    match error {
        AppError::Http { body, .. } => body.to_field_errors(),
        _ => FieldErrors::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::fields::GLOBAL;
    use serde_json::json;

    fn http_error(body: Value) -> AppError {
        AppError::Http {
            status: 422,
            body: ServerErrorBody::classify(&body),
        }
    }

    #[test]
    fn string_field_error_is_kept() {
        let mapped = map_server_error(&http_error(json!({ "errors": { "email": "already used" } })));
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped.get("email"), Some("already used"));
    }

    #[test]
    fn array_field_errors_are_joined_with_spaces() {
        let mapped = map_server_error(&http_error(
            json!({ "errors": { "phone": ["too short", "invalid"] } }),
        ));
        assert_eq!(mapped.get("phone"), Some("too short invalid"));
    }

    #[test]
    fn message_only_body_is_global() {
        let mapped = map_server_error(&http_error(json!({ "message": "server unavailable" })));
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped.get(GLOBAL), Some("server unavailable"));
    }

    #[test]
    fn errors_take_precedence_over_message() {
        let body = json!({
            "message": "validation failed",
            "errors": { "profile.firstName": "required" }
        });
        let mapped = map_server_error(&http_error(body));
        assert_eq!(mapped.get("profile.firstName"), Some("required"));
        assert!(!mapped.contains(GLOBAL));
    }

    #[test]
    fn empty_errors_object_falls_back_to_message() {
        let body = json!({ "errors": {}, "message": "Validation failed" });
        assert_eq!(
            ServerErrorBody::classify(&body),
            ServerErrorBody::GlobalMessage("Validation failed".to_string())
        );
        let mapped = map_server_error(&http_error(body));
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped.get(GLOBAL), Some("Validation failed"));
    }

    #[test]
    fn unexpected_shapes_map_to_nothing() {
        for body in [
            json!(null),
            json!([1, 2, 3]),
            json!("oops"),
            json!({ "message": "" }),
            json!({ "message": 500 }),
            json!({ "errors": ["email"] }),
            json!({ "errors": {} }),
            json!({ "detail": "nope" }),
        ] {
            assert!(map_server_error(&http_error(body.clone())).is_empty(), "{body}");
        }
    }

    #[test]
    fn non_string_entries_are_stringified() {
        let mapped = map_server_error(&http_error(
            json!({ "errors": { "age": 18, "tags": ["a", 2, null] } }),
        ));
        assert_eq!(mapped.get("age"), Some("18"));
        assert_eq!(mapped.get("tags"), Some("a 2 "));
    }

    #[test]
    fn raw_bodies_that_are_not_json_are_unrecognized() {
        assert_eq!(
            ServerErrorBody::from_body("<html>502 Bad Gateway</html>"),
            ServerErrorBody::Unrecognized
        );
        assert_eq!(ServerErrorBody::from_body(""), ServerErrorBody::Unrecognized);
        assert_eq!(
            ServerErrorBody::from_body(r#"{"message":"slow down"}"#),
            ServerErrorBody::GlobalMessage("slow down".to_string())
        );
    }

    #[test]
    fn transport_failures_map_to_nothing() {
        for error in [
            AppError::Network("connection refused".to_string()),
            AppError::Timeout("Request timed out. Please try again.".to_string()),
            AppError::Parse("missing field `token`".to_string()),
        ] {
            assert!(map_server_error(&error).is_empty());
        }
    }

    #[test]
    fn mapping_is_repeatable() {
        let error = http_error(json!({ "errors": { "email": ["taken", "blocked"] } }));
        assert_eq!(map_server_error(&error), map_server_error(&error));
    }
}
