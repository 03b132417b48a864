//! Construction of HTTP values from host input.
//!
//! An [`HttpFactory`] is the single place a host creates requests, responses, cookies and data
//! uris. Hosts needing their own request or response setup inject a builder instead of
//! subclassing the values:
//!
//! ```
//! use micro_http_model::factory::HttpFactory;
//! use micro_http_model::protocol::{Request, RequestParts};
//!
//! let factory = HttpFactory::default().with_request_builder(|parts: RequestParts| {
//!     Request::from_parts(RequestParts { is_secure: true, ..parts })
//! });
//!
//! let request = factory.create_request(RequestParts { path: "/login".to_string(), ..RequestParts::default() }).unwrap();
//! assert_eq!(request.url(), "https://localhost/login");
//! ```

use std::fmt;

use bytes::Bytes;
use serde::Deserialize;
use tracing::debug;

use crate::codec::request_codec::parse_raw_parts;
use crate::codec::response_codec::parse_raw_into;
use crate::protocol::{Cookie, CookieBuilder, DataUri, HttpFormatError, Request, RequestParts, Response};

type RequestBuilder = Box<dyn Fn(RequestParts) -> Result<Request, HttpFormatError> + Send + Sync>;
type ResponseBuilder = Box<dyn Fn() -> Response + Send + Sync>;

/// Defaults applied by an [`HttpFactory`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Protocol of requests created without one.
    pub default_protocol: String,

    /// Method of requests created without one.
    pub default_method: String,

    /// Line separator of raw responses.
    pub line_break: String,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self { default_protocol: "HTTP/1.0".to_string(), default_method: "GET".to_string(), line_break: "\r\n".to_string() }
    }
}

/// Creates the values of the HTTP model.
pub struct HttpFactory {
    config: FactoryConfig,
    request_builder: RequestBuilder,
    response_builder: ResponseBuilder,
}

impl fmt::Debug for HttpFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFactory").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Default for HttpFactory {
    fn default() -> Self {
        Self::new(FactoryConfig::default())
    }
}

impl HttpFactory {
    pub fn new(config: FactoryConfig) -> Self {
        Self { config, request_builder: Box::new(Request::from_parts), response_builder: Box::new(Response::new) }
    }

    /// Replaces how requests are built from their parts.
    #[must_use]
    pub fn with_request_builder<F>(mut self, builder: F) -> Self
    where
        F: Fn(RequestParts) -> Result<Request, HttpFormatError> + Send + Sync + 'static,
    {
        self.request_builder = Box::new(builder);
        self
    }

    /// Replaces how fresh responses are built.
    #[must_use]
    pub fn with_response_builder<F>(mut self, builder: F) -> Self
    where
        F: Fn() -> Response + Send + Sync + 'static,
    {
        self.response_builder = Box::new(builder);
        self
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Creates a request, an empty method or protocol is replaced by the configured default.
    ///
    /// # Errors
    ///
    /// Returns the error of the request builder, see [`Request::from_parts`].
    pub fn create_request(&self, mut parts: RequestParts) -> Result<Request, HttpFormatError> {
        if parts.method.is_empty() {
            parts.method.clone_from(&self.config.default_method);
        }
        if parts.protocol.is_empty() {
            parts.protocol.clone_from(&self.config.default_protocol);
        }

        (self.request_builder)(parts)
    }

    /// Creates a request from its raw text, see [`Request::parse_raw`].
    ///
    /// # Errors
    ///
    /// Fails when the text is not a valid request or when the request builder fails.
    pub fn create_request_from_str(&self, text: &str) -> Result<Request, HttpFormatError> {
        let parts = parse_raw_parts(text)?;
        self.create_request(parts)
    }

    pub fn create_response(&self) -> Response {
        (self.response_builder)()
    }

    /// Creates a response from its raw text, lines separated by the configured line break.
    ///
    /// # Errors
    ///
    /// Fails when the text is not a valid response, see [`Response::parse_raw`].
    pub fn create_response_from_str(&self, text: &str) -> Result<Response, HttpFormatError> {
        parse_raw_into(self.create_response(), text, &self.config.line_break).inspect_err(|e| {
            debug!(cause = %e, "failed to parse raw response");
        })
    }
}

#[allow(clippy::unused_self, reason = "cookies and data uris are created through the factory like every other value")]
impl HttpFactory {
    /// Builds a cookie, see [`CookieBuilder::build`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidCookie`] when an attribute is invalid.
    pub fn create_cookie(&self, builder: CookieBuilder) -> Result<Cookie, HttpFormatError> {
        builder.build()
    }

    /// Reads a cookie from a `Set-Cookie` value, see [`Cookie::parse`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidCookie`] when the value holds no cookie.
    pub fn create_cookie_from_str(&self, text: &str, default_domain: Option<&str>) -> Result<Cookie, HttpFormatError> {
        Cookie::parse(text, default_domain)
    }

    pub fn create_data_uri(
        &self,
        data: impl Into<Bytes>,
        mime: Option<String>,
        encoding: Option<String>,
        is_base64: bool,
    ) -> DataUri {
        DataUri::new(data, mime, encoding, is_base64)
    }

    /// Decodes a data uri, see [`DataUri::decode`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidDataUri`] when the text is not a data uri.
    pub fn create_data_uri_from_str(&self, text: &str) -> Result<DataUri, HttpFormatError> {
        DataUri::decode(text)
    }
}
