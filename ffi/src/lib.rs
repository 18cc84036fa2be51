//! C-ABI wrapper around `request-form-core`.
//!
//! # Overview
//! Lets a host UI toolkit with a C FFI drive the request form: push edit
//! events, poll validity, and submit. The host renders; this library owns
//! the form state and its rules.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - A form is an opaque `FfiRequestForm` handle. Handles are not
//!   thread-safe; the host must serialize calls per handle.
//! - `request_form_submit` returns a single `FfiSubmitResult` envelope
//!   carrying either the finalized request or an error code and message.
//! - The C caller owns all returned pointers and must call the matching
//!   `request_form_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use request_form_core::{FormConfig, RequestForm};
use tracing_subscriber::EnvFilter;

use types::*;

/// Environment variable holding the `tracing` filter directives.
pub const LOG_LEVEL_ENV_VAR: &str = "REQUEST_FORM_LOG_LEVEL";

/// Read a borrowed C string, mapping null and non-UTF-8 input to an error
/// code.
fn read_str<'a>(ptr: *const c_char) -> Result<&'a str, FfiErrorCode> {
    if ptr.is_null() {
        return Err(FfiErrorCode::NullArg);
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| FfiErrorCode::InvalidUtf8)
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Install a stderr `tracing` subscriber filtered by
/// `REQUEST_FORM_LOG_LEVEL` (default `warn`).
///
/// Returns false if a subscriber was already installed.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_init_logging() -> bool {
    catch_unwind(|| {
        let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok()
    })
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Form lifecycle
// ---------------------------------------------------------------------------

/// Create a form with default configuration.
///
/// The caller must free the returned pointer with `request_form_free`.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_new() -> *mut FfiRequestForm {
    catch_unwind(|| {
        Box::into_raw(Box::new(FfiRequestForm {
            inner: RequestForm::default(),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Create a form from a JSON configuration document, e.g.
/// `{"header_validation":"permissive","default_method":"POST"}`.
///
/// Returns null if `config_json` is null, not UTF-8, or not a valid
/// configuration.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_new_with_config(config_json: *const c_char) -> *mut FfiRequestForm {
    catch_unwind(|| {
        let Ok(json) = read_str(config_json) else {
            return std::ptr::null_mut();
        };
        match FormConfig::from_json(json) {
            Ok(config) => Box::into_raw(Box::new(FfiRequestForm {
                inner: RequestForm::new(config),
            })),
            Err(e) => {
                tracing::warn!("rejecting form configuration: {e}");
                std::ptr::null_mut()
            }
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a form created by `request_form_new*`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_free(form: *mut FfiRequestForm) {
    if !form.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(form) });
        });
    }
}

/// Restore the form to its empty defaults. No-op for null.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_reset(form: *mut FfiRequestForm) {
    if !form.is_null() {
        let _ = catch_unwind(|| {
            let form = unsafe { &mut *form };
            form.inner.reset();
        });
    }
}

// ---------------------------------------------------------------------------
// Edit events
// ---------------------------------------------------------------------------

/// Apply an edit to one field and recompute its validity.
///
/// For `FfiField::Method`, `value` is the verb name (case-insensitive).
/// Returns `UnknownMethod` for an unrecognized verb, leaving the form
/// unchanged.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_edit(
    form: *mut FfiRequestForm,
    field: FfiField,
    value: *const c_char,
) -> FfiErrorCode {
    catch_unwind(|| {
        if form.is_null() {
            return FfiErrorCode::NullArg;
        }
        let value = match read_str(value) {
            Ok(v) => v,
            Err(code) => return code,
        };
        let form = unsafe { &mut *form };
        match form.inner.on_field_edit(field.into(), value) {
            Ok(()) => FfiErrorCode::Ok,
            Err(e) => FfiErrorCode::from(&e),
        }
    })
    .unwrap_or(FfiErrorCode::Panic)
}

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

/// Current validity flags. All false for a null form.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_validation(form: *const FfiRequestForm) -> FfiValidation {
    let invalid = FfiValidation {
        url_valid: false,
        headers_valid: false,
        submittable: false,
    };
    catch_unwind(|| {
        if form.is_null() {
            return invalid;
        }
        let form = unsafe { &*form };
        form.inner.validation().into()
    })
    .unwrap_or(invalid)
}

/// Whether the submit control should be enabled. False for a null form.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_is_submittable(form: *const FfiRequestForm) -> bool {
    request_form_validation(form).submittable
}

/// Currently selected method. `Get` for a null form.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_method(form: *const FfiRequestForm) -> FfiHttpMethod {
    catch_unwind(|| {
        if form.is_null() {
            return FfiHttpMethod::Get;
        }
        let form = unsafe { &*form };
        form.inner.draft().method().into()
    })
    .unwrap_or(FfiHttpMethod::Get)
}

/// The URL as it will be submitted.
///
/// Returns null if `form` is null. Free with `request_form_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_normalized_url(form: *const FfiRequestForm) -> *mut c_char {
    catch_unwind(|| {
        if form.is_null() {
            return std::ptr::null_mut();
        }
        let form = unsafe { &*form };
        into_c_string(form.inner.draft().normalized_url().to_string())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// The whole form state as a JSON object, for hosts that prefer one poll
/// per render.
///
/// Returns null if `form` is null. Free with `request_form_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_snapshot_json(form: *const FfiRequestForm) -> *mut c_char {
    catch_unwind(|| {
        if form.is_null() {
            return std::ptr::null_mut();
        }
        let form = unsafe { &*form };
        match serde_json::to_string(&form.inner.snapshot()) {
            Ok(json) => into_c_string(json),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Snapshot the form into a finalized request.
///
/// Fails with `InvalidState` if the form is not submittable. The form is
/// not modified either way. Free with `request_form_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_submit(form: *const FfiRequestForm) -> *mut FfiSubmitResult {
    catch_unwind(|| {
        if form.is_null() {
            return FfiSubmitResult::null_arg("form");
        }
        let form = unsafe { &*form };
        match form.inner.submit() {
            Ok(req) => FfiSubmitResult::ok(req),
            Err(e) => FfiSubmitResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiSubmitResult::panic("panic in request_form_submit"))
}

// ---------------------------------------------------------------------------
// Stateless helpers
// ---------------------------------------------------------------------------

/// Number of selectable methods.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_method_count() -> usize {
    request_form_core::HttpMethod::ALL.len()
}

/// Static name of the method at `index` in picker order, or null when out
/// of range. The returned string must not be freed.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_method_name(index: usize) -> *const c_char {
    match request_form_core::HttpMethod::ALL.get(index) {
        Some(method) => method.as_c_str().as_ptr(),
        None => std::ptr::null(),
    }
}

/// Normalize a URL without a form.
///
/// Returns null if `raw` is null or not UTF-8. Free with
/// `request_form_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_normalize_url(raw: *const c_char) -> *mut c_char {
    catch_unwind(|| match read_str(raw) {
        Ok(raw) => into_c_string(request_form_core::normalize_url(raw)),
        Err(_) => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Validate a URL without a form. False for null or non-UTF-8 input.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_validate_url(url: *const c_char) -> bool {
    catch_unwind(|| read_str(url).is_ok_and(request_form_core::validate_url)).unwrap_or(false)
}

/// Validate header text (strict contract) without a form. False for null
/// or non-UTF-8 input.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_validate_headers(text: *const c_char) -> bool {
    catch_unwind(|| read_str(text).is_ok_and(request_form_core::validate_headers))
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiSubmitResult` returned by `request_form_submit`, including
/// the request it carries. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_free_result(result: *mut FfiSubmitResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { std::ffi::CString::from_raw(result.error_message) });
        }
        if !result.request.is_null() {
            let req = unsafe { Box::from_raw(result.request) };
            free_finalized_request_fields(&req);
        }
    });
}

/// Free the heap fields of an `FfiFinalizedRequest` (but not the struct
/// itself).
fn free_finalized_request_fields(req: &FfiFinalizedRequest) {
    for s in [req.url, req.headers_text, req.body] {
        if !s.is_null() {
            drop(unsafe { std::ffi::CString::from_raw(s) });
        }
    }
    if !req.headers.is_null() && req.headers_len > 0 {
        let headers = unsafe {
            Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                req.headers,
                req.headers_len,
            ))
        };
        for h in headers.iter() {
            if !h.key.is_null() {
                drop(unsafe { std::ffi::CString::from_raw(h.key) });
            }
            if !h.value.is_null() {
                drop(unsafe { std::ffi::CString::from_raw(h.value) });
            }
        }
    }
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn request_form_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { std::ffi::CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
