//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use request_form_core::{FinalizedRequest, FormError, HttpMethod, ValidationState};

/// Opaque handle to a `RequestForm`. C callers receive a pointer to this
/// and pass it back into every `request_form_*` function.
pub struct FfiRequestForm {
    pub(crate) inner: request_form_core::RequestForm,
}

/// Move a Rust string onto the C heap. Strings read from C cannot contain
/// interior NULs, so the empty fallback is never observed in practice.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Edit input
// ---------------------------------------------------------------------------

/// Form field targeted by `request_form_edit`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub enum FfiField {
    Method = 0,
    Url = 1,
    Headers = 2,
    Body = 3,
}

impl From<FfiField> for request_form_core::Field {
    fn from(f: FfiField) -> Self {
        match f {
            FfiField::Method => request_form_core::Field::Method,
            FfiField::Url => request_form_core::Field::Url,
            FfiField::Headers => request_form_core::Field::Headers,
            FfiField::Body => request_form_core::Field::Body,
        }
    }
}

/// HTTP method as a C enum. Discriminants follow `HttpMethod::ALL`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
    Patch = 4,
    Head = 5,
    Options = 6,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
            HttpMethod::Patch => FfiHttpMethod::Patch,
            HttpMethod::Head => FfiHttpMethod::Head,
            HttpMethod::Options => FfiHttpMethod::Options,
        }
    }
}

// ---------------------------------------------------------------------------
// Observable state
// ---------------------------------------------------------------------------

/// Validity flags returned by value from `request_form_validation`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FfiValidation {
    pub url_valid: bool,
    pub headers_valid: bool,
    pub submittable: bool,
}

impl From<ValidationState> for FfiValidation {
    fn from(v: ValidationState) -> Self {
        FfiValidation {
            url_valid: v.url_valid,
            headers_valid: v.headers_valid,
            submittable: request_form_core::is_submittable(&v),
        }
    }
}

// ---------------------------------------------------------------------------
// Submission output
// ---------------------------------------------------------------------------

/// Error codes returned by `request_form_edit` and in `FfiSubmitResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    InvalidState = 1,
    UnknownMethod = 2,
    InvalidHeaderLine = 3,
    Config = 4,
    NullArg = 5,
    InvalidUtf8 = 6,
    Panic = 7,
    Serialization = 8,
}

impl From<&FormError> for FfiErrorCode {
    fn from(err: &FormError) -> Self {
        match err {
            FormError::InvalidState { .. } => FfiErrorCode::InvalidState,
            FormError::UnknownMethod(_) => FfiErrorCode::UnknownMethod,
            FormError::InvalidHeaderLine { .. } => FfiErrorCode::InvalidHeaderLine,
            FormError::Config(_) => FfiErrorCode::Config,
            FormError::Serialization(_) => FfiErrorCode::Serialization,
        }
    }
}

/// A single parsed header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A submitted request as C-compatible plain data.
///
/// `headers_text` is the header block exactly as typed. `headers` holds the
/// parsed pairs; it is empty (null, len 0) when the text does not parse,
/// which can only happen under permissive header validation.
#[repr(C)]
pub struct FfiFinalizedRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers_text: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: usize,
    pub body: *mut c_char,
}

impl FfiFinalizedRequest {
    fn from_core(req: FinalizedRequest) -> Box<Self> {
        let pairs = req.header_pairs().unwrap_or_default();
        let headers_len = pairs.len();
        let headers = if pairs.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = pairs
                .into_iter()
                .map(|h| FfiHeader {
                    key: into_c_string(h.name),
                    value: into_c_string(h.value),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::new(FfiFinalizedRequest {
            method: req.method.into(),
            url: into_c_string(req.url),
            headers_text: into_c_string(req.headers),
            headers,
            headers_len,
            body: into_c_string(req.body),
        })
    }
}

/// Result envelope for `request_form_submit`.
///
/// On success `error_code` is `Ok`, `error_message` is null and `request`
/// points to the snapshot. On failure `request` is null and
/// `error_message` is a human-readable C string. The validity flags always
/// describe the form at the time of the call (false when `form` was null).
#[repr(C)]
pub struct FfiSubmitResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub url_valid: bool,
    pub headers_valid: bool,
    pub request: *mut FfiFinalizedRequest,
}

impl FfiSubmitResult {
    pub(crate) fn ok(req: FinalizedRequest) -> *mut Self {
        let result = Box::new(FfiSubmitResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            url_valid: true,
            headers_valid: true,
            request: Box::into_raw(FfiFinalizedRequest::from_core(req)),
        });
        Box::into_raw(result)
    }

    pub(crate) fn from_error(err: FormError) -> *mut Self {
        let (url_valid, headers_valid) = match err {
            FormError::InvalidState {
                url_valid,
                headers_valid,
            } => (url_valid, headers_valid),
            _ => (false, false),
        };
        Self::failure(FfiErrorCode::from(&err), err.to_string(), url_valid, headers_valid)
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, format!("null argument: {name}"), false, false)
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, msg.to_string(), false, false)
    }

    fn failure(
        error_code: FfiErrorCode,
        msg: String,
        url_valid: bool,
        headers_valid: bool,
    ) -> *mut Self {
        let result = Box::new(FfiSubmitResult {
            error_code,
            error_message: into_c_string(msg),
            url_valid,
            headers_valid,
            request: std::ptr::null_mut(),
        });
        Box::into_raw(result)
    }
}
