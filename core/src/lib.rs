//! UI-independent core of an HTTP client's request form.
//!
//! # Overview
//! Holds the method/url/headers/body a user is composing, normalizes and
//! validates the URL and header text on every edit, and produces a
//! `FinalizedRequest` snapshot on submission. Nothing here performs I/O:
//! rendering belongs to the host UI and sending the request belongs to a
//! downstream executor that receives the snapshot.
//!
//! # Design
//! - `RequestForm` is a plain owned struct; each setter recomputes the
//!   validity flag it affects before returning.
//! - `normalize_url`, `validate_url` and `validate_headers` are free, pure
//!   functions so hosts can call them without a form.
//! - Validation failure is a flag, never an error. `FormError` is reserved
//!   for misuse such as submitting a form that is not submittable.

pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod types;
pub mod validate;

pub use config::{FormConfig, HeaderValidation};
pub use error::FormError;
pub use form::{is_submittable, Field, RequestDraft, RequestForm, ValidationState};
pub use http::{Header, HttpMethod};
pub use types::{FinalizedRequest, FormSnapshot};
pub use validate::{normalize_url, parse_headers, validate_headers, validate_url};
