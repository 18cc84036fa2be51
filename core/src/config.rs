//! Form configuration supplied by the host.
//!
//! Every field has a default, so an empty JSON object (or no configuration
//! at all) yields the strict header contract and `GET` as the initial
//! method.

use serde::Deserialize;

use crate::error::FormError;
use crate::http::HttpMethod;
use crate::validate::validate_headers;

/// How header text is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderValidation {
    /// Every non-blank line must be a `Name: Value` header.
    #[default]
    Strict,
    /// Any text is accepted. Matches older hosts that never checked headers.
    Permissive,
}

impl HeaderValidation {
    pub fn check(self, text: &str) -> bool {
        match self {
            HeaderValidation::Strict => validate_headers(text),
            HeaderValidation::Permissive => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    pub header_validation: HeaderValidation,
    /// Method selected when a draft is created or reset.
    pub default_method: HttpMethod,
}

impl FormConfig {
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        serde_json::from_str(json).map_err(|e| FormError::Config(e.to_string()))
    }
}
