//! Cookies as sent by a server in `Set-Cookie` headers.

use std::fmt;

use chrono::Utc;
use tracing::trace;

use crate::ensure;
use crate::protocol::HttpFormatError;
use crate::protocol::header::{format_cookie_date, parse_cookie_date};
use crate::utils::{form_decode, form_encode};

/// How far in the past a deletion marker expires, in seconds.
const DELETION_AGE: i64 = 7_777_777;

/// A cookie with the attributes of a `Set-Cookie` header.
///
/// A cookie built without a value and without an expiry is a deletion marker: its value is
/// rendered as `DELETED` and it expires in the past, so a client drops any cookie of that name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    name: String,
    value: Option<String>,
    expires: i64,
    expires_date: Option<String>,
    domain: Option<String>,
    path: Option<String>,
    is_secure: bool,
    is_http_only: bool,
}

impl Cookie {
    pub fn builder(name: impl Into<String>) -> CookieBuilder {
        CookieBuilder {
            name: name.into(),
            value: None,
            expires: 0,
            domain: None,
            path: None,
            is_secure: false,
            is_http_only: true,
        }
    }

    /// Parses the value of a `Set-Cookie` header.
    ///
    /// The first `name=value` token is the cookie, the tokens after it are attributes matched
    /// case-insensitively. Unknown attributes are ignored, an expiry that is not a date leaves
    /// the cookie a session cookie. `HttpOnly` is only set when the attribute is present.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidCookie`] when an attribute comes before the
    /// `name=value` pair, when there is no such pair, or when an attribute value is empty.
    pub fn parse(set_cookie: &str, default_domain: Option<&str>) -> Result<Self, HttpFormatError> {
        let mut pair: Option<(&str, &str)> = None;
        let mut expires = 0;
        let mut domain = default_domain;
        let mut path = None;
        let mut is_secure = false;
        let mut is_http_only = false;

        for token in set_cookie.split(';') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }

            match token.split_once('=') {
                Some((name, value)) if pair.is_none() => pair = Some((name, value)),
                Some((key, value)) => match key.trim().to_ascii_lowercase().as_str() {
                    "expires" => {
                        expires = parse_cookie_date(value).unwrap_or_else(|e| {
                            trace!(cause = %e, "ignoring cookie expiry");
                            0
                        });
                    }
                    "domain" => domain = Some(value),
                    "path" => path = Some(value),
                    _ => trace!(attribute = key, "ignoring unknown cookie attribute"),
                },
                None => {
                    ensure!(pair.is_some(), HttpFormatError::invalid_cookie(format!("{token:?} is not a valid attribute")));

                    match token.to_ascii_lowercase().as_str() {
                        "secure" => is_secure = true,
                        "httponly" => is_http_only = true,
                        _ => trace!(attribute = token, "ignoring unknown cookie flag"),
                    }
                }
            }
        }

        let Some((name, value)) = pair else {
            return Err(HttpFormatError::invalid_cookie("no name=value pair found"));
        };

        let mut builder = Self::builder(name).value(form_decode(value)).expires(expires);
        builder.domain = domain.map(ToString::to_string);
        builder.path = path.map(ToString::to_string);
        builder.secure(is_secure).http_only(is_http_only).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value, `None` for a deletion marker.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Unix timestamp the cookie expires at, `0` for a session cookie.
    pub fn expires(&self) -> i64 {
        self.expires
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn is_secure(&self) -> bool {
        self.is_secure
    }

    pub fn is_http_only(&self) -> bool {
        self.is_http_only
    }
}

/// Renders the cookie as the value of a `Set-Cookie` header.
///
/// `Path` defaults to `/` when a `Domain` is set.
impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.name, form_encode(value))?,
            None => write!(f, "{}=DELETED", self.name)?,
        }

        let path = self.path.as_deref().or(self.domain.as_ref().map(|_| "/"));
        if let Some(domain) = &self.domain {
            write!(f, "; Domain={domain}")?;
        }
        if let Some(path) = path {
            write!(f, "; Path={path}")?;
        }

        if let Some(date) = &self.expires_date {
            write!(f, "; Expires={date}")?;
        }

        if self.is_secure {
            f.write_str("; Secure")?;
        }
        if self.is_http_only {
            f.write_str("; HttpOnly")?;
        }

        Ok(())
    }
}

/// Builds a validated [`Cookie`], see [`Cookie::builder`].
#[derive(Debug, Clone)]
pub struct CookieBuilder {
    name: String,
    value: Option<String>,
    expires: i64,
    domain: Option<String>,
    path: Option<String>,
    is_secure: bool,
    is_http_only: bool,
}

impl CookieBuilder {
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn expires(mut self, expires: i64) -> Self {
        self.expires = expires;
        self
    }

    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn secure(mut self, is_secure: bool) -> Self {
        self.is_secure = is_secure;
        self
    }

    #[must_use]
    pub fn http_only(mut self, is_http_only: bool) -> Self {
        self.is_http_only = is_http_only;
        self
    }

    /// Validates the attributes and builds the cookie.
    ///
    /// Without a value and an expiry the cookie becomes a deletion marker.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidCookie`] when the name is empty, the expiry is outside the
    /// range of representable dates, or the domain or path is set but empty.
    pub fn build(self) -> Result<Cookie, HttpFormatError> {
        ensure!(!self.name.is_empty(), HttpFormatError::invalid_cookie("cookie name is empty"));
        ensure!(
            self.domain.as_deref().is_none_or(|domain| !domain.is_empty()),
            HttpFormatError::invalid_cookie("cookie domain is empty")
        );
        ensure!(
            self.path.as_deref().is_none_or(|path| !path.is_empty()),
            HttpFormatError::invalid_cookie("cookie path is empty")
        );

        let expires = if self.value.is_none() && self.expires == 0 {
            Utc::now().timestamp() - DELETION_AGE
        } else {
            self.expires
        };
        // pre-epoch expiries are valid, only 0 marks a session cookie
        let expires_date = (expires != 0)
            .then(|| format_cookie_date(expires))
            .transpose()
            .map_err(|e| HttpFormatError::invalid_cookie(format!("invalid expiry {expires}: {e}")))?;

        Ok(Cookie {
            name: self.name,
            value: self.value,
            expires,
            expires_date,
            domain: self.domain,
            path: self.path,
            is_secure: self.is_secure,
            is_http_only: self.is_http_only,
        })
    }
}
