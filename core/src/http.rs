//! HTTP vocabulary shared by the form and its downstream executor.
//!
//! # Design
//! The set of methods a user may pick is owned here rather than by the UI,
//! so every host renders the same ordered list. Methods travel as the
//! upper-case verb on every boundary (JSON, FFI, display).

use std::ffi::CStr;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// HTTP method selectable in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// Every method in the order a method picker should list them.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    pub fn as_str(self) -> &'static str {
        // Every name is an ASCII literal, so the conversion cannot fail.
        self.as_c_str().to_str().unwrap_or_default()
    }

    /// The verb as a NUL-terminated string with static lifetime, for C
    /// callers.
    pub fn as_c_str(self) -> &'static CStr {
        match self {
            HttpMethod::Get => c"GET",
            HttpMethod::Post => c"POST",
            HttpMethod::Put => c"PUT",
            HttpMethod::Delete => c"DELETE",
            HttpMethod::Patch => c"PATCH",
            HttpMethod::Head => c"HEAD",
            HttpMethod::Options => c"OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = FormError;

    /// ASCII case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| FormError::UnknownMethod(s.to_string()))
    }
}

/// A single parsed header, in the order it appeared in the header text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}
