//! Error types for the request form core.
//!
//! # Design
//! Validation failures are not errors: a malformed URL or header block only
//! flips a flag in `ValidationState`. `FormError` covers the cases where a
//! caller asked for something the form cannot do, most importantly calling
//! `submit` while the form is not submittable.

use std::fmt;

/// Errors returned by `RequestForm` and the header parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// `submit` was called while the form was not submittable. The host UI
    /// is expected to gate its submit control on `is_submittable`.
    InvalidState { url_valid: bool, headers_valid: bool },

    /// The method name is not one of `HttpMethod::ALL`.
    UnknownMethod(String),

    /// A non-blank header line does not have the `Name: Value` shape.
    /// `line` is 1-based.
    InvalidHeaderLine { line: usize, content: String },

    /// The configuration document could not be read.
    Config(String),

    /// A finalized request could not be serialized to JSON.
    Serialization(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::InvalidState {
                url_valid,
                headers_valid,
            } => {
                write!(
                    f,
                    "form is not submittable (url valid: {url_valid}, headers valid: {headers_valid})"
                )
            }
            FormError::UnknownMethod(name) => write!(f, "unknown HTTP method: {name}"),
            FormError::InvalidHeaderLine { line, content } => {
                write!(f, "invalid header on line {line}: {content}")
            }
            FormError::Config(msg) => write!(f, "invalid configuration: {msg}"),
            FormError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
        }
    }
}

impl std::error::Error for FormError {}
