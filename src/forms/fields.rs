//! Field paths and the error map shared by local validation and server
//! responses. Keys are dot-joined field paths; errors that cannot be pinned to
//! a field live under [`GLOBAL`].

use serde::Serialize;
use std::collections::BTreeMap;

/// Reserved key for errors that do not belong to a single field.
pub const GLOBAL: &str = "_global";

pub const EMAIL: &str = "email";
pub const COUNTRY: &str = "country";
pub const PHONE: &str = "phone";
pub const PASSWORD: &str = "password";
pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const RISK_ACCEPTED: &str = "riskAccepted";
pub const TERMS_ACCEPTED: &str = "termsAccepted";
pub const MARKETING_OPT_IN: &str = "marketingOptIn";

/// Join path segments into a field path, `_global` when there are none.
#[must_use]
pub fn field_path<S: AsRef<str>>(segments: &[S]) -> String {
    if segments.is_empty() {
        return GLOBAL.to_string();
    }
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(".")
}

/// Field path to message, one message per path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map holding only a global message.
    #[must_use]
    pub fn global(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(GLOBAL, message);
        errors
    }

    /// Record a message for `path`, replacing any earlier message for it.
    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.insert(path.into(), message.into());
    }

    /// Record a message for a nested field given as path segments.
    pub fn insert_at<S: AsRef<str>>(&mut self, segments: &[S], message: impl Into<String>) {
        self.insert(field_path(segments), message);
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    /// Message stored under the global key.
    #[must_use]
    pub fn global_message(&self) -> Option<&str> {
        self.get(GLOBAL)
    }

    /// Field-level entries, skipping the global key.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(path, _)| *path != GLOBAL)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(path, message)| (path.as_str(), message.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Convert into `Ok(())` when empty, `Err(self)` otherwise.
    ///
    /// # Errors
    /// Returns the map itself when it holds at least one entry.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl FromIterator<(String, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (path, message) in iter {
            errors.insert(path, message);
        }
        errors
    }
}
