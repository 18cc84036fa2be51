//! URL normalization and URL/header validation.
//!
//! # Design
//! Everything here is a pure function of its input so the form can recompute
//! validity synchronously on every edit. URL syntax is delegated to the `url`
//! crate (WHATWG parsing); this module adds the scheme policy, the
//! requirement that the scheme is spelled out with `://`, and rejects any
//! input the parser would have to repair (stripped tabs, backslashes,
//! extra slashes) since the text is submitted exactly as typed.

use std::cell::Cell;
use std::sync::LazyLock;

use regex::Regex;
use url::{SyntaxViolation, Url};

use crate::error::FormError;
use crate::http::Header;

/// Scheme prefix prepended to URLs typed without one.
pub const DEFAULT_SCHEME_PREFIX: &str = "https://";

static HTTP_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("scheme pattern compiles"));

/// Prefix `raw` with `https://` unless it already starts with `http://` or
/// `https://` (any case). No other rewriting takes place.
pub fn normalize_url(raw: &str) -> String {
    if HTTP_SCHEME.is_match(raw) {
        raw.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{raw}")
    }
}

/// True iff `url` is an absolute `http`/`https` URL with a non-empty host
/// that parses without any syntax violation.
pub fn validate_url(url: &str) -> bool {
    let Some(scheme_end) = HTTP_SCHEME.find(url).map(|m| m.end()) else {
        return false;
    };
    if url.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return false;
    }
    // `https:///host` has an empty authority.
    if url[scheme_end..].starts_with(['/', '\\']) {
        return false;
    }

    let violated = Cell::new(false);
    let on_violation = |_: SyntaxViolation| violated.set(true);
    let parsed = Url::options()
        .syntax_violation_callback(Some(&on_violation))
        .parse(url);
    match parsed {
        Ok(parsed) => {
            !violated.get()
                && matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// True iff every non-blank line of `text` is a `Name: Value` header.
/// Empty text is valid.
pub fn validate_headers(text: &str) -> bool {
    parse_headers(text).is_ok()
}

/// Parse header text into `(name, value)` pairs in input order.
///
/// Each non-blank line is split at its first colon. The trimmed name must
/// be non-empty visible ASCII without colons; the trimmed value may be
/// anything. Fails with the first offending line (1-based).
pub fn parse_headers(text: &str) -> Result<Vec<Header>, FormError> {
    let mut headers = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let header = parse_header_line(line).ok_or_else(|| FormError::InvalidHeaderLine {
            line: idx + 1,
            content: line.to_string(),
        })?;
        headers.push(header);
    }
    Ok(headers)
}

fn parse_header_line(line: &str) -> Option<Header> {
    let (name, value) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() || !name.chars().all(is_header_name_char) {
        return None;
    }
    Some(Header {
        name: name.to_string(),
        value: value.trim().to_string(),
    })
}

fn is_header_name_char(c: char) -> bool {
    c.is_ascii_graphic() && c != ':'
}
