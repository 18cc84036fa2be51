//! Plain data handed across the form's boundaries.
//!
//! # Design
//! `FinalizedRequest` is an owned snapshot: once built it shares nothing with
//! the draft, so later edits cannot change a request already handed to the
//! executor. `FormSnapshot` is the read-only view a host UI polls to drive
//! rendering.

use serde::Serialize;

use crate::error::FormError;
use crate::http::{Header, HttpMethod};
use crate::validate::parse_headers;

/// The request produced by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalizedRequest {
    pub method: HttpMethod,
    /// Normalized URL.
    pub url: String,
    /// Header text exactly as typed.
    pub headers: String,
    pub body: String,
}

impl FinalizedRequest {
    /// Headers as `(name, value)` pairs.
    ///
    /// Fails only when the form was configured with permissive header
    /// validation and the text is not actually well-formed.
    pub fn header_pairs(&self) -> Result<Vec<Header>, FormError> {
        parse_headers(&self.headers)
    }

    /// JSON handed to the downstream executor.
    pub fn to_json(&self) -> Result<String, FormError> {
        serde_json::to_string(self).map_err(|e| FormError::Serialization(e.to_string()))
    }
}

/// Everything a host UI needs to render the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub method: HttpMethod,
    pub raw_url: String,
    pub normalized_url: String,
    pub headers: String,
    pub body: String,
    pub url_valid: bool,
    pub headers_valid: bool,
    pub submittable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> FinalizedRequest {
        FinalizedRequest {
            method: HttpMethod::Post,
            url: "https://api.example.com/x".to_string(),
            headers: "Content-Type: text/plain\nX-Id: 7".to_string(),
            body: "hi".to_string(),
        }
    }

    #[test]
    fn json_carries_all_four_fields() {
        let value: serde_json::Value = serde_json::from_str(&request().to_json().unwrap()).unwrap();
        assert_eq!(value["method"], "POST");
        assert_eq!(value["url"], "https://api.example.com/x");
        assert_eq!(value["headers"], "Content-Type: text/plain\nX-Id: 7");
        assert_eq!(value["body"], "hi");
    }

    #[test]
    fn serialization_error_names_the_cause() {
        let err = FormError::Serialization("boom".to_string());
        assert_eq!(err.to_string(), "serialization failed: boom");
        assert!(request().to_json().is_ok());
    }

    #[test]
    fn header_pairs_are_parsed_in_order() {
        let pairs = request().header_pairs().unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].name, "Content-Type");
        assert_eq!(pairs[1].value, "7");
    }

    #[test]
    fn header_pairs_fail_on_unchecked_text() {
        let mut req = request();
        req.headers = "whatever".to_string();
        assert!(matches!(
            req.header_pairs(),
            Err(FormError::InvalidHeaderLine { line: 1, .. })
        ));
    }
}
