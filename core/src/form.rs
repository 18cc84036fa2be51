//! Request form state and its derived validity.
//!
//! # Design
//! `RequestForm` owns one `RequestDraft` and the `ValidationState` derived
//! from it. Every edit goes through a setter that recomputes the affected
//! flag before returning, so observers never see a stale flag. The
//! normalized URL has no setter of its own; it is rewritten only when the
//! raw URL changes. Submission reads the draft and copies it into a
//! `FinalizedRequest` without mutating anything.

use tracing::{debug, info, warn};

use crate::config::FormConfig;
use crate::error::FormError;
use crate::http::HttpMethod;
use crate::types::{FinalizedRequest, FormSnapshot};
use crate::validate::{normalize_url, validate_url};

/// Identifies the field an edit event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Method,
    Url,
    Headers,
    Body,
}

/// The in-progress request as the user has typed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDraft {
    method: HttpMethod,
    raw_url: String,
    normalized_url: String,
    headers: String,
    body: String,
}

impl RequestDraft {
    fn new(method: HttpMethod) -> Self {
        Self {
            method,
            raw_url: String::new(),
            normalized_url: normalize_url(""),
            headers: String::new(),
            body: String::new(),
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn raw_url(&self) -> &str {
        &self.raw_url
    }

    pub fn normalized_url(&self) -> &str {
        &self.normalized_url
    }

    pub fn headers(&self) -> &str {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl Default for RequestDraft {
    fn default() -> Self {
        Self::new(HttpMethod::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationState {
    pub url_valid: bool,
    pub headers_valid: bool,
}

/// Whether a form in `validation` may be submitted. The body is never
/// validated, so only the URL and header flags matter.
pub fn is_submittable(validation: &ValidationState) -> bool {
    validation.url_valid && validation.headers_valid
}

/// A single open request form.
///
/// Not thread-safe; the host serializes edits through its event loop.
#[derive(Debug, Clone)]
pub struct RequestForm {
    config: FormConfig,
    draft: RequestDraft,
    validation: ValidationState,
}

impl RequestForm {
    pub fn new(config: FormConfig) -> Self {
        let draft = RequestDraft::new(config.default_method);
        let validation = ValidationState {
            url_valid: validate_url(&draft.normalized_url),
            headers_valid: config.header_validation.check(&draft.headers),
        };
        Self {
            config,
            draft,
            validation,
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn draft(&self) -> &RequestDraft {
        &self.draft
    }

    pub fn validation(&self) -> ValidationState {
        self.validation
    }

    pub fn is_submittable(&self) -> bool {
        is_submittable(&self.validation)
    }

    /// Apply an edit event from the host UI.
    ///
    /// Method edits are parsed case-insensitively; an unknown verb leaves
    /// the draft untouched.
    pub fn on_field_edit(&mut self, field: Field, value: &str) -> Result<(), FormError> {
        match field {
            Field::Method => {
                let method = value.parse::<HttpMethod>().inspect_err(|_| {
                    warn!(value, "ignoring edit to unknown method");
                })?;
                self.set_method(method);
            }
            Field::Url => self.set_url(value),
            Field::Headers => self.set_headers(value),
            Field::Body => self.set_body(value),
        }
        Ok(())
    }

    pub fn set_method(&mut self, method: HttpMethod) {
        debug!(%method, "method edited");
        self.draft.method = method;
    }

    pub fn set_url(&mut self, raw: &str) {
        self.draft.raw_url = raw.to_string();
        self.draft.normalized_url = normalize_url(raw);
        let url_valid = validate_url(&self.draft.normalized_url);
        if url_valid != self.validation.url_valid {
            debug!(url = %self.draft.normalized_url, url_valid, "url validity changed");
        }
        self.validation.url_valid = url_valid;
    }

    pub fn set_headers(&mut self, text: &str) {
        self.draft.headers = text.to_string();
        let headers_valid = self.config.header_validation.check(text);
        if headers_valid != self.validation.headers_valid {
            debug!(headers_valid, "header validity changed");
        }
        self.validation.headers_valid = headers_valid;
    }

    pub fn set_body(&mut self, text: &str) {
        debug!(len = text.len(), "body edited");
        self.draft.body = text.to_string();
    }

    /// Restore an empty draft with the configured default method.
    pub fn reset(&mut self) {
        debug!("form reset");
        *self = RequestForm::new(self.config.clone());
    }

    /// Copy the draft into a `FinalizedRequest`.
    ///
    /// Fails with `FormError::InvalidState` if the form is not submittable.
    /// The draft stays editable afterwards and may be submitted again.
    pub fn submit(&self) -> Result<FinalizedRequest, FormError> {
        if !self.is_submittable() {
            warn!(
                url_valid = self.validation.url_valid,
                headers_valid = self.validation.headers_valid,
                "submit called on a form that is not submittable"
            );
            return Err(FormError::InvalidState {
                url_valid: self.validation.url_valid,
                headers_valid: self.validation.headers_valid,
            });
        }
        let request = FinalizedRequest {
            method: self.draft.method,
            url: self.draft.normalized_url.clone(),
            headers: self.draft.headers.clone(),
            body: self.draft.body.clone(),
        };
        info!(method = %request.method, url = %request.url, "request submitted");
        Ok(request)
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            method: self.draft.method,
            raw_url: self.draft.raw_url.clone(),
            normalized_url: self.draft.normalized_url.clone(),
            headers: self.draft.headers.clone(),
            body: self.draft.body.clone(),
            url_valid: self.validation.url_valid,
            headers_valid: self.validation.headers_valid,
            submittable: self.is_submittable(),
        }
    }
}

impl Default for RequestForm {
    fn default() -> Self {
        Self::new(FormConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeaderValidation;

    fn filled_form() -> RequestForm {
        let mut form = RequestForm::default();
        form.on_field_edit(Field::Method, "POST").unwrap();
        form.on_field_edit(Field::Url, "api.example.com/x").unwrap();
        form.on_field_edit(Field::Headers, "Content-Type: text/plain").unwrap();
        form.on_field_edit(Field::Body, "hi").unwrap();
        form
    }

    #[test]
    fn new_form_has_empty_defaults() {
        let form = RequestForm::default();
        let draft = form.draft();
        assert_eq!(draft.method(), HttpMethod::Get);
        assert_eq!(draft.raw_url(), "");
        assert_eq!(draft.normalized_url(), "https://");
        assert_eq!(draft.headers(), "");
        assert_eq!(draft.body(), "");
        assert_eq!(
            form.validation(),
            ValidationState {
                url_valid: false,
                headers_valid: true,
            }
        );
        assert!(!form.is_submittable());
    }

    #[test]
    fn submittable_truth_table() {
        for url_valid in [false, true] {
            for headers_valid in [false, true] {
                let state = ValidationState {
                    url_valid,
                    headers_valid,
                };
                assert_eq!(is_submittable(&state), url_valid && headers_valid);
            }
        }
    }

    #[test]
    fn url_edit_recomputes_normalized_url_and_validity() {
        let mut form = RequestForm::default();
        form.set_url("example.com");
        assert_eq!(form.draft().normalized_url(), "https://example.com");
        assert!(form.validation().url_valid);

        form.set_url("ftp://example.com");
        assert_eq!(form.draft().normalized_url(), "https://ftp://example.com");
        assert!(!form.validation().url_valid);
    }

    #[test]
    fn header_edit_recomputes_validity() {
        let mut form = RequestForm::default();
        form.set_headers("garbage-no-colon");
        assert!(!form.validation().headers_valid);
        form.set_headers("Accept: */*");
        assert!(form.validation().headers_valid);
    }

    #[test]
    fn body_is_never_validated() {
        let mut form = RequestForm::default();
        form.set_url("example.com");
        form.set_body("\u{0}not: [valid json");
        assert!(form.is_submittable());
    }

    #[test]
    fn submit_snapshots_the_draft() {
        let form = filled_form();
        let request = form.submit().unwrap();
        assert_eq!(
            request,
            FinalizedRequest {
                method: HttpMethod::Post,
                url: "https://api.example.com/x".to_string(),
                headers: "Content-Type: text/plain".to_string(),
                body: "hi".to_string(),
            }
        );
    }

    #[test]
    fn later_edits_do_not_change_a_submitted_request() {
        let mut form = filled_form();
        let request = form.submit().unwrap();
        form.set_body("changed");
        assert_eq!(request.body, "hi");
        assert_eq!(form.submit().unwrap().body, "changed");
    }

    #[test]
    fn submit_fails_when_not_submittable() {
        let mut form = filled_form();
        form.set_headers("broken");
        let err = form.submit().unwrap_err();
        assert_eq!(
            err,
            FormError::InvalidState {
                url_valid: true,
                headers_valid: false,
            }
        );
    }

    #[test]
    fn unknown_method_leaves_draft_untouched() {
        let mut form = filled_form();
        let err = form.on_field_edit(Field::Method, "BREW").unwrap_err();
        assert_eq!(err, FormError::UnknownMethod("BREW".to_string()));
        assert_eq!(form.draft().method(), HttpMethod::Post);
    }

    #[test]
    fn reset_restores_configured_defaults() {
        let config = FormConfig {
            default_method: HttpMethod::Put,
            ..FormConfig::default()
        };
        let mut form = RequestForm::new(config);
        form.set_method(HttpMethod::Delete);
        form.set_url("example.com");
        form.set_headers("nope");
        form.reset();
        assert_eq!(form.draft().method(), HttpMethod::Put);
        assert_eq!(form.draft().raw_url(), "");
        assert!(form.validation().headers_valid);
        assert!(!form.validation().url_valid);
    }

    #[test]
    fn permissive_config_accepts_any_header_text() {
        let config = FormConfig {
            header_validation: HeaderValidation::Permissive,
            ..FormConfig::default()
        };
        let mut form = RequestForm::new(config);
        form.set_url("example.com");
        form.set_headers("garbage-no-colon");
        assert!(form.is_submittable());
        assert_eq!(form.submit().unwrap().headers, "garbage-no-colon");
    }

    #[test]
    fn snapshot_reflects_current_state() {
        let snapshot = filled_form().snapshot();
        assert_eq!(snapshot.method, HttpMethod::Post);
        assert_eq!(snapshot.raw_url, "api.example.com/x");
        assert_eq!(snapshot.normalized_url, "https://api.example.com/x");
        assert!(snapshot.url_valid);
        assert!(snapshot.headers_valid);
        assert!(snapshot.submittable);
    }
}
