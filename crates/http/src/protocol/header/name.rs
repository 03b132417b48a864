//! Header names and single header values.
//!
//! Header names are matched case-insensitively and stored in their canonical
//! Title-Case-With-Dashes form, so `content_type`, `CONTENT-TYPE` and
//! `Content-Type` all address the same entry of a [`HeaderContainer`](super::HeaderContainer).

use std::fmt;

use crate::ensure;
use crate::protocol::HttpFormatError;

pub const ACCEPT: &str = "Accept";
pub const ACCEPT_CHARSET: &str = "Accept-Charset";
pub const ACCEPT_ENCODING: &str = "Accept-Encoding";
pub const ACCEPT_LANGUAGE: &str = "Accept-Language";
pub const ALLOW: &str = "Allow";
pub const CACHE_CONTROL: &str = "Cache-Control";
pub const CONTENT_ENCODING: &str = "Content-Encoding";
pub const CONTENT_LANGUAGE: &str = "Content-Language";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const CONTENT_MD5: &str = "Content-Md5";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const COOKIE: &str = "Cookie";
pub const DATE: &str = "Date";
pub const ETAG: &str = "Etag";
pub const EXPIRES: &str = "Expires";
pub const HOST: &str = "Host";
pub const IF_MODIFIED_SINCE: &str = "If-Modified-Since";
pub const IF_NONE_MATCH: &str = "If-None-Match";
pub const LAST_MODIFIED: &str = "Last-Modified";
pub const LOCATION: &str = "Location";
pub const SET_COOKIE: &str = "Set-Cookie";
pub const USER_AGENT: &str = "User-Agent";
pub const X_REQUESTED_WITH: &str = "X-Requested-With";

/// Converts a raw header name into its canonical form.
///
/// The name is lower-cased, `_` becomes `-` and every dash separated segment gets an
/// upper-case first letter: `CONTENT_LENGTH` and `content-length` both give `Content-Length`.
///
/// # Errors
///
/// Returns [`HttpFormatError::InvalidHeaderName`] when the name is empty, only whitespace, or
/// holds a character that is not allowed in an HTTP token.
pub fn normalize_name(raw: &str) -> Result<String, HttpFormatError> {
    let raw = raw.trim();
    ensure!(!raw.is_empty(), HttpFormatError::invalid_header_name("header name is empty"));
    ensure!(
        raw.chars().all(is_token_char),
        HttpFormatError::invalid_header_name(format!("{raw:?} is not a valid token"))
    );

    let lower = raw.to_ascii_lowercase().replace('_', "-");
    let mut canonical = String::with_capacity(lower.len());
    let mut segment_start = true;
    for ch in lower.chars() {
        if segment_start {
            canonical.push(ch.to_ascii_uppercase());
        } else {
            canonical.push(ch);
        }
        segment_start = ch == '-';
    }

    Ok(canonical)
}

/// `tchar` of RFC 9110.
fn is_token_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(ch)
}

/// A single header: a canonical name and its value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Header {
    name: String,
    value: String,
}

impl Header {
    /// Creates a header, canonicalizing the provided name.
    ///
    /// # Errors
    ///
    /// Fails when the name cannot be normalized, see [`normalize_name`].
    pub fn new(name: &str, value: impl Into<String>) -> Result<Self, HttpFormatError> {
        Ok(Self { name: normalize_name(name)?, value: value.into() })
    }

    /// Creates a header from a name already in canonical form, such as the constants of this module.
    pub(crate) fn from_canonical(name: &str, value: impl Into<String>) -> Self {
        Self { name: name.to_string(), value: value.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}
