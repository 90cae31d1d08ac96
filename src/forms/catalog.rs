//! Static country catalog used by the phone inputs. Each entry carries the
//! dial prefix sent to the login endpoint and the placeholder shown for the
//! phone field. The catalog is fixed at build time and never fetched.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CountryCode {
    US,
    IR,
    GB,
    AE,
}

impl CountryCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::US => "US",
            Self::IR => "IR",
            Self::GB => "GB",
            Self::AE => "AE",
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown country code: {0}")]
    UnknownCountry(String),
    #[error("country catalog must contain at least one entry")]
    Empty,
}

impl FromStr for CountryCode {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "US" => Ok(Self::US),
            "IR" => Ok(Self::IR),
            "GB" => Ok(Self::GB),
            "AE" => Ok(Self::AE),
            _ => Err(CatalogError::UnknownCountry(value.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub code: CountryCode,
    pub display_label: &'static str,
    pub dial_prefix: &'static str,
    pub phone_placeholder: &'static str,
}

const COUNTRIES: &[Country] = &[
    Country {
        code: CountryCode::US,
        display_label: "United States (+1)",
        dial_prefix: "+1",
        phone_placeholder: "201-555-0123",
    },
    Country {
        code: CountryCode::IR,
        display_label: "Iran (+98)",
        dial_prefix: "+98",
        phone_placeholder: "0912xxxxxxx",
    },
    Country {
        code: CountryCode::GB,
        display_label: "United Kingdom (+44)",
        dial_prefix: "+44",
        phone_placeholder: "07123 456789",
    },
    Country {
        code: CountryCode::AE,
        display_label: "United Arab Emirates (+971)",
        dial_prefix: "+971",
        phone_placeholder: "050xxxxxxx",
    },
];

/// Ordered list of selectable countries. The first entry is the default
/// selection and the fallback for lookups that miss.
#[derive(Clone, Copy, Debug)]
pub struct CountryCatalog {
    entries: &'static [Country],
}

impl Default for CountryCatalog {
    fn default() -> Self {
        Self { entries: COUNTRIES }
    }
}

impl CountryCatalog {
    /// Build a catalog over a custom table.
    ///
    /// # Errors
    /// Returns `CatalogError::Empty` when `entries` is empty, since every
    /// lookup needs a default entry to fall back on.
    pub fn new(entries: &'static [Country]) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &'static [Country] {
        self.entries
    }

    /// Default selection: the first entry.
    #[must_use]
    pub fn default_entry(&self) -> &'static Country {
        // `new` rejects empty tables and the built-in table is non-empty.
        &self.entries[0]
    }

    #[must_use]
    pub fn find(&self, code: CountryCode) -> Option<&'static Country> {
        self.entries.iter().find(|country| country.code == code)
    }

    #[must_use]
    pub fn contains(&self, code: CountryCode) -> bool {
        self.find(code).is_some()
    }

    /// Total lookup: a code missing from this catalog resolves to the default
    /// entry. A miss means the catalog and the validated input disagree, so it
    /// is logged.
    #[must_use]
    pub fn resolve(&self, code: CountryCode) -> &'static Country {
        self.find(code).unwrap_or_else(|| {
            let fallback = self.default_entry();
            warn!(
                country = %code,
                fallback = %fallback.code,
                "country missing from catalog, using default entry"
            );
            fallback
        })
    }

    /// Lookup from raw form input, used for placeholders before validation.
    #[must_use]
    pub fn resolve_str(&self, value: &str) -> &'static Country {
        value
            .parse::<CountryCode>()
            .ok()
            .and_then(|code| self.find(code))
            .unwrap_or_else(|| self.default_entry())
    }
}
