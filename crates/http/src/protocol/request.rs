//! HTTP request model.
//!
//! A [`Request`] is assembled from [`RequestParts`], either filled in by a host from its own
//! environment or produced by [`Request::parse_raw`]. Everything derived from the parts
//! (query parameters, the other shape of the body) is computed lazily and cached.

use std::sync::Arc;

use http::Method;
use indexmap::IndexMap;
use once_cell::unsync::OnceCell;
use tracing::trace;

use crate::codec::query_string::{self, ParamValue, Parameters};
use crate::ensure;
use crate::protocol::HttpFormatError;
use crate::protocol::body::{Body, BodyFormat};
use crate::protocol::header::cache_control::NO_CACHE;
use crate::protocol::header::name::{
    ACCEPT, ACCEPT_CHARSET, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, HOST, IF_MODIFIED_SINCE,
    IF_NONE_MATCH, USER_AGENT, X_REQUESTED_WITH,
};
use crate::protocol::header::{HeaderContainer, parse_entity_tag_list, parse_http_date, parse_weighted_list};
use crate::protocol::session::SessionHandle;
use crate::utils::form_decode;

const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

/// The inputs a request is built from.
///
/// Defaults to `GET / HTTP/1.1` without headers or body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParts {
    pub method: String,
    pub path: String,
    pub protocol: String,
    pub headers: HeaderContainer,
    pub body: Body,
    pub is_secure: bool,
}

impl Default for RequestParts {
    fn default() -> Self {
        Self {
            method: Method::GET.to_string(),
            path: "/".to_string(),
            protocol: "HTTP/1.1".to_string(),
            headers: HeaderContainer::new(),
            body: Body::None,
            is_secure: false,
        }
    }
}

/// An HTTP request.
///
/// The cookies are read once from the `Cookie` headers when the request is built; later
/// header changes do not update them.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    protocol: String,
    path: String,
    query: Option<String>,
    query_parameters: OnceCell<Parameters>,
    headers: HeaderContainer,
    body: Body,
    derived_body: OnceCell<Option<String>>,
    derived_parameters: OnceCell<Parameters>,
    cookies: IndexMap<String, String>,
    is_secure: bool,
    session: Option<SessionHandle>,
}

impl Request {
    /// Creates a `GET` request for a path.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidRequest`] when the path is empty.
    pub fn new(path: impl Into<String>) -> Result<Self, HttpFormatError> {
        Self::from_parts(RequestParts { path: path.into(), ..RequestParts::default() })
    }

    /// Builds a request, upper-casing the method.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidRequest`] when the method, path or protocol is empty,
    /// or when the method is not a valid token.
    pub fn from_parts(parts: RequestParts) -> Result<Self, HttpFormatError> {
        let RequestParts { method, path, protocol, headers, body, is_secure } = parts;

        ensure!(!method.is_empty(), HttpFormatError::invalid_request("method is empty"));
        ensure!(!path.is_empty(), HttpFormatError::invalid_request("path is empty"));
        ensure!(!protocol.is_empty(), HttpFormatError::invalid_request("protocol is empty"));

        let method = Method::from_bytes(method.to_uppercase().as_bytes())
            .map_err(|e| HttpFormatError::invalid_request(format!("invalid method {method:?}: {e}")))?;
        let query = path.find('?').map(|position| path[position..].to_string());
        let cookies = parse_request_cookies(&headers);

        Ok(Self {
            method,
            protocol,
            path,
            query,
            query_parameters: OnceCell::new(),
            headers,
            body,
            derived_body: OnceCell::new(),
            derived_parameters: OnceCell::new(),
            cookies,
            is_secure,
            session: None,
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn is_head(&self) -> bool {
        self.method == Method::HEAD
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::GET
    }

    pub fn is_post(&self) -> bool {
        self.method == Method::POST
    }

    pub fn is_put(&self) -> bool {
        self.method == Method::PUT
    }

    pub fn is_delete(&self) -> bool {
        self.method == Method::DELETE
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// The requested path, query included.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query of the path, leading `?` included.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn is_secure(&self) -> bool {
        self.is_secure
    }

    pub fn set_is_secure(&mut self, is_secure: bool) {
        self.is_secure = is_secure;
    }

    /// The scheme and host of the server, the host taken from the `Host` header.
    pub fn server_url(&self) -> String {
        let host = self.headers.value(HOST).unwrap_or("localhost");
        let scheme = if self.is_secure { "https" } else { "http" };
        format!("{scheme}://{host}")
    }

    /// The full requested url.
    pub fn url(&self) -> String {
        format!("{}{}", self.server_url(), self.path)
    }

    pub fn query_parameters(&self) -> &Parameters {
        self.query_parameters.get_or_init(|| self.query.as_deref().map(query_string::parse).unwrap_or_default())
    }

    pub fn query_parameter(&self, name: &str) -> Option<&ParamValue> {
        self.query_parameters().get(name)
    }

    /// The query parameters built back into a query string, without the leading `?`.
    pub fn query_parameters_as_string(&self) -> Option<String> {
        let parameters = self.query_parameters();
        (!parameters.is_empty()).then(|| query_string::build(parameters))
    }

    pub fn headers(&self) -> &HeaderContainer {
        &self.headers
    }

    /// Mutable access to the headers.
    ///
    /// Drops what was derived from the body since the `Content-Type` may change.
    pub fn headers_mut(&mut self) -> &mut HeaderContainer {
        self.derived_body.take();
        self.derived_parameters.take();
        &mut self.headers
    }

    /// The first value of a header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.value(name)
    }

    /// Replaces the body, raw text and parameters are mutually exclusive.
    pub fn set_body(&mut self, body: impl Into<Body>) {
        self.body = body.into();
        self.derived_body.take();
        self.derived_parameters.take();
    }

    /// The body as text.
    ///
    /// Parameters are rendered according to the `Content-Type`, JSON or form encoded. Without
    /// one of those content types a parameter body has no text.
    pub fn body(&self) -> Option<&str> {
        match &self.body {
            Body::None => None,
            Body::Raw(raw) => Some(raw),
            Body::Parameters(parameters) => self
                .derived_body
                .get_or_init(|| self.body_format().and_then(|format| format.encode(parameters)))
                .as_deref(),
        }
    }

    /// The body as parameters.
    ///
    /// Raw text is decoded according to the `Content-Type`, JSON or form encoded. Other content
    /// types give no parameters.
    pub fn body_parameters(&self) -> &Parameters {
        match &self.body {
            Body::Parameters(parameters) => parameters,
            Body::Raw(raw) => self
                .derived_parameters
                .get_or_init(|| self.body_format().map(|format| format.decode(raw)).unwrap_or_default()),
            Body::None => self.derived_parameters.get_or_init(Parameters::new),
        }
    }

    pub fn body_parameter(&self, name: &str) -> Option<&ParamValue> {
        self.body_parameters().get(name)
    }

    /// The body parameters form encoded, whatever the content type.
    pub fn body_parameters_as_string(&self) -> Option<String> {
        let parameters = self.body_parameters();
        (!parameters.is_empty()).then(|| query_string::build(parameters))
    }

    fn body_format(&self) -> Option<BodyFormat> {
        BodyFormat::from_content_type(self.headers.value(CONTENT_TYPE))
    }

    pub fn cookies(&self) -> &IndexMap<String, String> {
        &self.cookies
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Media types the client accepts, by descending preference.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidHeaderValue`] when the header is malformed.
    pub fn accept(&self) -> Result<IndexMap<String, f32>, HttpFormatError> {
        self.weighted_header(ACCEPT)
    }

    /// Charsets the client accepts, by descending preference.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidHeaderValue`] when the header is malformed.
    pub fn accept_charset(&self) -> Result<IndexMap<String, f32>, HttpFormatError> {
        self.weighted_header(ACCEPT_CHARSET)
    }

    /// Content codings the client accepts, by descending preference.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidHeaderValue`] when the header is malformed.
    pub fn accept_encoding(&self) -> Result<IndexMap<String, f32>, HttpFormatError> {
        self.weighted_header(ACCEPT_ENCODING)
    }

    /// Languages the client accepts, by descending preference.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidHeaderValue`] when the header is malformed.
    pub fn accept_language(&self) -> Result<IndexMap<String, f32>, HttpFormatError> {
        self.weighted_header(ACCEPT_LANGUAGE)
    }

    fn weighted_header(&self, name: &str) -> Result<IndexMap<String, f32>, HttpFormatError> {
        match self.headers.value(name) {
            Some(value) if !value.trim().is_empty() => parse_weighted_list(value),
            _ => Ok(IndexMap::new()),
        }
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.headers.value(USER_AGENT)
    }

    /// The entity tags of `If-None-Match`, tag → is weak. Empty without the header.
    pub fn if_none_match(&self) -> IndexMap<String, bool> {
        self.headers
            .value(IF_NONE_MATCH)
            .filter(|value| !value.trim().is_empty())
            .and_then(|value| parse_entity_tag_list(value).ok())
            .unwrap_or_default()
    }

    /// The timestamp of `If-Modified-Since`.
    ///
    /// An invalid date is ignored, the header then has no effect.
    pub fn if_modified_since(&self) -> Option<i64> {
        let value = self.headers.value(IF_MODIFIED_SINCE)?;
        match parse_http_date(value) {
            Ok(timestamp) => Some(timestamp),
            Err(e) => {
                trace!(cause = %e, "ignoring invalid If-Modified-Since header");
                None
            }
        }
    }

    /// Whether the client asks to bypass caches with `Cache-Control: no-cache`.
    pub fn is_no_cache(&self) -> bool {
        self.headers.directive(NO_CACHE).is_some()
    }

    pub fn is_xml_http_request(&self) -> bool {
        self.headers.value(X_REQUESTED_WITH) == Some(XML_HTTP_REQUEST)
    }

    pub fn set_session(&mut self, session: Option<SessionHandle>) {
        self.session = session;
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&SessionHandle> {
        self.session.as_ref()
    }
}

/// Requests are equal when their parts are; sessions are compared by identity.
impl PartialEq for Request {
    fn eq(&self, other: &Self) -> bool {
        let same_session = match (&self.session, &other.session) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };

        self.method == other.method
            && self.protocol == other.protocol
            && self.path == other.path
            && self.headers == other.headers
            && self.body == other.body
            && self.cookies == other.cookies
            && self.is_secure == other.is_secure
            && same_session
    }
}

/// Reads `name=value` pairs of every `Cookie` header, values form decoded.
fn parse_request_cookies(headers: &HeaderContainer) -> IndexMap<String, String> {
    let mut cookies = IndexMap::new();
    for header in headers.values(COOKIE) {
        for pair in header.split(';') {
            let pair = pair.trim();
            match pair.split_once('=') {
                Some((name, value)) if !name.is_empty() => {
                    cookies.insert(name.to_string(), form_decode(value));
                }
                _ if pair.is_empty() => {}
                _ => trace!(pair, "skipping malformed cookie pair"),
            }
        }
    }

    cookies
}
