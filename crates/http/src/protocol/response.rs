//! HTTP response model.
//!
//! A [`Response`] starts as `200 OK` with a `Date` header. Besides the status, headers and body
//! it keeps the cookies to send, rendered as `Set-Cookie` headers when serialized, and the
//! last modification time, which follows the `Last-Modified` header.

use http::StatusCode;
use indexmap::IndexMap;
use tracing::trace;

use crate::ensure;
use crate::protocol::header::cache_control::{MAX_AGE, NO_CACHE, NO_STORE, PRIVATE, PUBLIC, SHARED_MAX_AGE};
use crate::protocol::header::grammar::{http_date_now, split_entity_tag};
use crate::protocol::header::name::{
    ALLOW, CONTENT_ENCODING, CONTENT_LANGUAGE, CONTENT_LENGTH, CONTENT_MD5, CONTENT_TYPE, DATE, ETAG, EXPIRES,
    LAST_MODIFIED, LOCATION,
};
use crate::protocol::header::{DirectiveValue, Header, HeaderContainer, HeaderSlot, format_http_date, parse_http_date};
use crate::protocol::{Cookie, HttpFormatError, Request};

/// Headers a `304 Not Modified` response must not carry.
const NOT_MODIFIED_EXCLUDED_HEADERS: [&str; 7] =
    [ALLOW, CONTENT_ENCODING, CONTENT_LANGUAGE, CONTENT_LENGTH, CONTENT_MD5, CONTENT_TYPE, LAST_MODIFIED];

/// An HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status_code: u16,
    headers: HeaderContainer,
    cookies: IndexMap<String, Cookie>,
    last_modified: Option<i64>,
    body: Option<String>,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    pub fn new() -> Self {
        let mut headers = HeaderContainer::new();
        headers.set_header(Header::from_canonical(DATE, http_date_now()), false);

        Self { status_code: StatusCode::OK.as_u16(), headers, cookies: IndexMap::new(), last_modified: None, body: None }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Sets the status code.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidStatusCode`] when the code is outside `100..=599`.
    pub fn set_status_code(&mut self, status_code: u16) -> Result<(), HttpFormatError> {
        ensure!((100..=599).contains(&status_code), HttpFormatError::InvalidStatusCode(status_code));
        self.status_code = status_code;
        Ok(())
    }

    /// The reason phrase of the status code, `None` for codes without a registered phrase.
    pub fn status_phrase(&self) -> Option<&'static str> {
        StatusCode::from_u16(self.status_code).ok().and_then(|status| status.canonical_reason())
    }

    pub fn set_ok(&mut self) {
        self.status_code = StatusCode::OK.as_u16();
    }

    pub fn is_ok(&self) -> bool {
        self.status_code == StatusCode::OK
    }

    pub fn set_bad_request(&mut self) {
        self.status_code = StatusCode::BAD_REQUEST.as_u16();
    }

    pub fn is_bad_request(&self) -> bool {
        self.status_code == StatusCode::BAD_REQUEST
    }

    pub fn set_forbidden(&mut self) {
        self.status_code = StatusCode::FORBIDDEN.as_u16();
    }

    pub fn is_forbidden(&self) -> bool {
        self.status_code == StatusCode::FORBIDDEN
    }

    pub fn set_not_found(&mut self) {
        self.status_code = StatusCode::NOT_FOUND.as_u16();
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == StatusCode::NOT_FOUND
    }

    pub fn set_method_not_allowed(&mut self) {
        self.status_code = StatusCode::METHOD_NOT_ALLOWED.as_u16();
    }

    pub fn is_method_not_allowed(&self) -> bool {
        self.status_code == StatusCode::METHOD_NOT_ALLOWED
    }

    /// Adds a header next to the existing values of its name.
    ///
    /// `Date` and `Location` only hold a single value and are replaced instead. Adding a valid
    /// `Last-Modified` date also updates [`last_modified`](Self::last_modified).
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidHeaderName`] when the name is empty.
    pub fn add_header(&mut self, name: &str, value: impl Into<String>) -> Result<(), HttpFormatError> {
        let header = Header::new(name, value)?;
        self.track_last_modified(&header);

        if header.name() == DATE || header.name() == LOCATION {
            self.headers.set_header(header, false);
        } else {
            self.headers.add_header(header, false);
        }
        Ok(())
    }

    /// Replaces all values of a header, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidHeaderName`] when the name is empty.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) -> Result<(), HttpFormatError> {
        let header = Header::new(name, value)?;
        self.track_last_modified(&header);
        self.headers.set_header(header, false);
        Ok(())
    }

    fn track_last_modified(&mut self, header: &Header) {
        if header.name() == LAST_MODIFIED {
            self.last_modified = parse_http_date(header.value()).ok();
        }
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.has(name)
    }

    /// The first value of a header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.value(name)
    }

    pub fn headers(&self) -> &HeaderContainer {
        &self.headers
    }

    pub fn remove_header(&mut self, name: &str) -> Option<HeaderSlot> {
        let removed = self.headers.remove(name)?;
        if removed.first().is_some_and(|header| header.name() == LAST_MODIFIED) {
            self.last_modified = None;
        }
        Some(removed)
    }

    /// Sets a cookie, replacing a cookie with the same name.
    pub fn set_cookie(&mut self, cookie: Cookie) {
        self.cookies.insert(cookie.name().to_string(), cookie);
    }

    pub fn cookie(&self, name: &str) -> Option<&Cookie> {
        self.cookies.get(name)
    }

    pub fn cookies(&self) -> &IndexMap<String, Cookie> {
        &self.cookies
    }

    /// Redirects to a url with `302 Found`.
    pub fn set_redirect(&mut self, url: impl Into<String>) {
        self.status_code = StatusCode::FOUND.as_u16();
        self.headers.set_header(Header::from_canonical(LOCATION, url), false);
    }

    /// Redirects to a url with a redirection status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidRedirectStatusCode`] when the code is outside `300..400`.
    pub fn set_redirect_with_status(&mut self, url: impl Into<String>, status_code: u16) -> Result<(), HttpFormatError> {
        ensure!((300..400).contains(&status_code), HttpFormatError::InvalidRedirectStatusCode(status_code));
        self.status_code = status_code;
        self.headers.set_header(Header::from_canonical(LOCATION, url), false);
        Ok(())
    }

    pub fn will_redirect(&self) -> bool {
        (300..400).contains(&self.status_code)
    }

    /// Drops a pending redirect, back to `200 OK` without `Location`.
    pub fn clear_redirect(&mut self) {
        if !self.will_redirect() {
            return;
        }

        self.headers.remove(LOCATION);
        self.status_code = StatusCode::OK.as_u16();
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.value(LOCATION)
    }

    /// Sets the time the content becomes stale, `None` removes the `Expires` header.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidHeaderValue`] for a negative timestamp.
    pub fn set_expires(&mut self, timestamp: Option<i64>) -> Result<(), HttpFormatError> {
        match timestamp {
            Some(timestamp) => {
                let date = format_http_date(timestamp)?;
                self.headers.set_header(Header::from_canonical(EXPIRES, date), false);
            }
            None => {
                self.headers.remove(EXPIRES);
            }
        }
        Ok(())
    }

    pub fn expires(&self) -> Option<i64> {
        let value = self.headers.value(EXPIRES)?;
        match parse_http_date(value) {
            Ok(timestamp) => Some(timestamp),
            Err(e) => {
                trace!(cause = %e, "ignoring invalid Expires header");
                None
            }
        }
    }

    /// Allows every cache to store the response, dropping `private`.
    pub fn set_is_public(&mut self, is_public: bool) {
        self.headers.remove_directive(PRIVATE);
        if is_public {
            self.headers.put_directive(PUBLIC, DirectiveValue::Flag);
        } else {
            self.headers.remove_directive(PUBLIC);
        }
    }

    pub fn is_public(&self) -> bool {
        self.headers.directive(PUBLIC).is_some()
    }

    /// Keeps shared caches from storing the response, dropping `public`.
    pub fn set_is_private(&mut self, is_private: bool) {
        self.headers.remove_directive(PUBLIC);
        if is_private {
            self.headers.put_directive(PRIVATE, DirectiveValue::Flag);
        } else {
            self.headers.remove_directive(PRIVATE);
        }
    }

    pub fn is_private(&self) -> bool {
        self.headers.directive(PRIVATE).is_some()
    }

    /// Forces caches to revalidate, setting it drops `public` and `private`.
    pub fn set_is_no_cache(&mut self, is_no_cache: bool) {
        if is_no_cache {
            self.headers.remove_directive(PUBLIC);
            self.headers.remove_directive(PRIVATE);
            self.headers.put_directive(NO_CACHE, DirectiveValue::Flag);
        } else {
            self.headers.remove_directive(NO_CACHE);
        }
    }

    pub fn is_no_cache(&self) -> bool {
        self.headers.directive(NO_CACHE).is_some()
    }

    /// Keeps every cache from storing the response, setting it drops `public` and `private`.
    pub fn set_is_no_store(&mut self, is_no_store: bool) {
        if is_no_store {
            self.headers.remove_directive(PUBLIC);
            self.headers.remove_directive(PRIVATE);
            self.headers.put_directive(NO_STORE, DirectiveValue::Flag);
        } else {
            self.headers.remove_directive(NO_STORE);
        }
    }

    pub fn is_no_store(&self) -> bool {
        self.headers.directive(NO_STORE).is_some()
    }

    /// Sets the `max-age` directive in seconds, `None` removes it.
    pub fn set_max_age(&mut self, seconds: Option<u64>) {
        self.set_age_directive(MAX_AGE, seconds);
    }

    pub fn max_age(&self) -> Option<u64> {
        self.age_directive(MAX_AGE)
    }

    /// Sets the `s-maxage` directive in seconds, `None` removes it.
    pub fn set_shared_max_age(&mut self, seconds: Option<u64>) {
        self.set_age_directive(SHARED_MAX_AGE, seconds);
    }

    pub fn shared_max_age(&self) -> Option<u64> {
        self.age_directive(SHARED_MAX_AGE)
    }

    fn set_age_directive(&mut self, name: &str, seconds: Option<u64>) {
        match seconds {
            Some(seconds) => self.headers.put_directive(name, DirectiveValue::from(seconds)),
            None => {
                self.headers.remove_directive(name);
            }
        }
    }

    fn age_directive(&self, name: &str) -> Option<u64> {
        self.headers.directive(name)?.as_str()?.parse().ok()
    }

    /// Sets the time the content was last modified, `None` removes `Last-Modified`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidHeaderValue`] when the timestamp is not positive.
    pub fn set_last_modified(&mut self, timestamp: Option<i64>) -> Result<(), HttpFormatError> {
        let Some(timestamp) = timestamp else {
            self.headers.remove(LAST_MODIFIED);
            self.last_modified = None;
            return Ok(());
        };

        ensure!(
            timestamp > 0,
            HttpFormatError::invalid_header_value(format!("invalid last modified timestamp {timestamp}"))
        );
        let date = format_http_date(timestamp)?;
        self.headers.set_header(Header::from_canonical(LAST_MODIFIED, date), false);
        self.last_modified = Some(timestamp);
        Ok(())
    }

    pub fn last_modified(&self) -> Option<i64> {
        self.last_modified
    }

    /// Sets the entity tag of the content, `None` removes the `ETag` header.
    pub fn set_etag(&mut self, etag: Option<&str>) {
        match etag {
            Some(etag) => self.headers.set_header(Header::from_canonical(ETAG, etag), false),
            None => {
                self.headers.remove(ETAG);
            }
        }
    }

    pub fn etag(&self) -> Option<&str> {
        self.headers.value(ETAG)
    }

    /// Evaluates the conditional headers of a request against this response.
    ///
    /// `If-None-Match` holds when it lists `*` or the entity tag of the response,
    /// `If-Modified-Since` when it equals the last modification time. With both headers both
    /// must hold; without either the content counts as modified.
    pub fn is_not_modified(&self, request: &Request) -> bool {
        let none_match = request.if_none_match();
        let modified_since = request.if_modified_since();

        let is_none_match = || {
            none_match.contains_key("*")
                || self.etag().is_some_and(|etag| none_match.contains_key(split_entity_tag(etag).0))
        };
        let is_modified_since = || modified_since == self.last_modified;

        match (none_match.is_empty(), modified_since.is_some()) {
            (false, true) => is_none_match() && is_modified_since(),
            (false, false) => is_none_match(),
            (true, true) => is_modified_since(),
            (true, false) => false,
        }
    }

    /// Turns the response into a `304 Not Modified`: the body is cleared and the headers a
    /// 304 must not carry are removed.
    pub fn set_not_modified(&mut self) {
        self.status_code = StatusCode::NOT_MODIFIED.as_u16();
        self.body = None;
        self.headers.remove_all(NOT_MODIFIED_EXCLUDED_HEADERS);
        self.last_modified = None;
    }

    pub fn set_body(&mut self, body: Option<String>) {
        self.body = body;
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::protocol::RequestParts;

    fn request_with(headers: &[(&str, &str)]) -> Request {
        let mut container = HeaderContainer::new();
        for (name, value) in headers {
            container.set(name, *value, false).unwrap();
        }
        Request::from_parts(RequestParts { headers: container, ..RequestParts::default() }).unwrap()
    }

    #[test]
    fn test_new() {
        let response = Response::new();

        assert_eq!(response.status_code(), 200);
        assert!(response.is_ok());
        assert_eq!(response.status_phrase(), Some("OK"));
        assert!(response.header(DATE).is_some_and(|date| parse_http_date(date).is_ok()));
        assert_eq!(response.body(), None);
        assert!(response.cookies().is_empty());
    }

    #[test]
    fn test_status_code() {
        let mut response = Response::new();

        for code in [50, 99, 600] {
            assert_eq!(response.set_status_code(code), Err(HttpFormatError::InvalidStatusCode(code)));
        }
        assert_eq!(response.status_code(), 200);

        response.set_status_code(100).unwrap();
        assert_eq!(response.status_code(), 100);
        response.set_status_code(599).unwrap();
        assert_eq!(response.status_phrase(), None);
    }

    #[test]
    fn test_status_shortcuts() {
        let mut response = Response::new();

        response.set_bad_request();
        assert!(response.is_bad_request());
        response.set_forbidden();
        assert!(response.is_forbidden());
        response.set_not_found();
        assert!(response.is_not_found());
        assert_eq!(response.status_phrase(), Some("Not Found"));
        response.set_method_not_allowed();
        assert!(response.is_method_not_allowed());
        assert!(!response.is_ok());
        response.set_ok();
        assert!(response.is_ok());
    }

    #[test]
    fn test_headers() {
        let mut response = Response::new();
        assert!(!response.has_header("name"));

        response.add_header("name", "value").unwrap();
        assert!(response.has_header("name"));
        assert_eq!(response.header("name"), Some("value"));
        assert_eq!(response.header("notset"), None);

        response.add_header("name", "value2").unwrap();
        assert_eq!(response.headers().values("name"), vec!["value", "value2"]);

        response.set_header("name", "value3").unwrap();
        assert_eq!(response.headers().values("name"), vec!["value3"]);

        assert!(response.remove_header("name").is_some());
        assert!(!response.has_header("name"));
        assert!(response.remove_header("name").is_none());

        assert!(matches!(response.add_header("", "value"), Err(HttpFormatError::InvalidHeaderName { .. })));
    }

    #[test]
    fn test_single_valued_headers_are_replaced() {
        let mut response = Response::new();

        response.add_header("date", "Wed, 01 Dec 2010 16:00:00 GMT").unwrap();
        assert_eq!(response.headers().values(DATE), vec!["Wed, 01 Dec 2010 16:00:00 GMT"]);

        response.add_header("location", "/a").unwrap();
        response.add_header("location", "/b").unwrap();
        assert_eq!(response.headers().values(LOCATION), vec!["/b"]);
    }

    #[test]
    fn test_last_modified_follows_header() {
        let mut response = Response::new();

        response.set_header("Last-Modified", "Wed, 01 Dec 2010 16:00:00 GMT").unwrap();
        assert_eq!(response.last_modified(), Some(1_291_219_200));

        response.set_header("Last-Modified", "value").unwrap();
        assert_eq!(response.last_modified(), None);
        assert_eq!(response.header(LAST_MODIFIED), Some("value"));

        response.set_last_modified(Some(1_291_219_200)).unwrap();
        response.remove_header("last-modified");
        assert_eq!(response.last_modified(), None);
    }

    #[test]
    fn test_cookies() {
        let mut response = Response::new();
        let cookie = Cookie::builder("var").value("value").build().unwrap();

        response.set_cookie(cookie.clone());
        assert_eq!(response.cookie("test"), None);
        assert_eq!(response.cookie("var"), Some(&cookie));

        let replacement = Cookie::builder("var").value("other").build().unwrap();
        response.set_cookie(replacement.clone());
        assert_eq!(response.cookies().len(), 1);
        assert_eq!(response.cookie("var"), Some(&replacement));
    }

    #[test]
    fn test_redirect() {
        let mut response = Response::new();
        assert!(!response.will_redirect());

        response.clear_redirect();
        assert!(response.is_ok());

        response.set_redirect("http://server");
        assert_eq!(response.status_code(), 302);
        assert!(response.will_redirect());
        assert_eq!(response.location(), Some("http://server"));

        response.clear_redirect();
        assert!(response.is_ok());
        assert!(!response.has_header("location"));
        assert!(!response.will_redirect());

        response.set_redirect_with_status("http://server", 301).unwrap();
        assert_eq!(response.status_code(), 301);
        assert_eq!(response.header("location"), Some("http://server"));
        assert!(response.will_redirect());
    }

    #[test]
    fn test_redirect_invalid_status() {
        let mut response = Response::new();

        for code in [200, 404, 400] {
            assert_eq!(
                response.set_redirect_with_status("value", code),
                Err(HttpFormatError::InvalidRedirectStatusCode(code))
            );
        }
        assert!(!response.will_redirect());
    }

    #[test]
    fn test_expires() {
        let mut response = Response::new();
        assert_eq!(response.expires(), None);

        let now = Utc::now().timestamp();
        response.set_expires(Some(now)).unwrap();
        assert_eq!(response.expires(), Some(now));
        assert_eq!(response.header(EXPIRES), Some(format_http_date(now).unwrap().as_str()));

        response.set_expires(None).unwrap();
        assert_eq!(response.expires(), None);
        assert!(!response.has_header(EXPIRES));

        assert!(matches!(response.set_expires(Some(-500)), Err(HttpFormatError::InvalidHeaderValue { .. })));
    }

    #[test]
    fn test_public_private() {
        let mut response = Response::new();
        assert!(!response.is_public());
        assert!(!response.is_private());

        response.set_is_public(true);
        assert!(response.is_public());
        assert!(!response.is_private());
        assert_eq!(response.header("cache-control"), Some("public"));

        response.set_is_public(false);
        assert!(!response.is_public());
        assert!(!response.has_header("cache-control"));

        response.set_is_private(true);
        assert!(!response.is_public());
        assert!(response.is_private());

        response.set_is_public(true);
        assert!(response.is_public());
        assert!(!response.is_private());

        response.set_is_private(false);
        assert!(!response.is_public());
        assert!(!response.is_private());
    }

    #[test]
    fn test_no_cache_no_store() {
        let mut response = Response::new();
        response.set_is_public(true);

        response.set_is_no_cache(true);
        assert!(response.is_no_cache());
        assert!(!response.is_public());

        response.set_is_no_store(true);
        assert!(response.is_no_store());
        assert_eq!(response.header("cache-control"), Some("no-cache, no-store"));

        response.set_is_no_cache(false);
        response.set_is_no_store(false);
        assert!(!response.is_no_cache());
        assert!(!response.is_no_store());
    }

    #[test]
    fn test_age() {
        let mut response = Response::new();
        assert_eq!(response.max_age(), None);
        assert_eq!(response.shared_max_age(), None);

        response.set_is_private(true);
        response.set_max_age(Some(60));
        response.set_shared_max_age(Some(120));
        assert_eq!(response.max_age(), Some(60));
        assert_eq!(response.shared_max_age(), Some(120));
        assert_eq!(response.header("cache-control"), Some("private, max-age=60, s-maxage=120"));

        response.set_max_age(None);
        response.set_shared_max_age(None);
        assert_eq!(response.max_age(), None);
        assert_eq!(response.shared_max_age(), None);
        assert_eq!(response.header("cache-control"), Some("private"));
    }

    #[test]
    fn test_last_modified() {
        let mut response = Response::new();
        assert_eq!(response.last_modified(), None);

        let now = Utc::now().timestamp();
        response.set_last_modified(Some(now)).unwrap();
        assert_eq!(response.last_modified(), Some(now));
        assert_eq!(response.header(LAST_MODIFIED), Some(format_http_date(now).unwrap().as_str()));

        response.set_last_modified(None).unwrap();
        assert_eq!(response.last_modified(), None);
        assert!(!response.has_header(LAST_MODIFIED));

        for timestamp in [0, -1500] {
            assert!(matches!(
                response.set_last_modified(Some(timestamp)),
                Err(HttpFormatError::InvalidHeaderValue { .. })
            ));
        }
    }

    #[test]
    fn test_etag() {
        let mut response = Response::new();
        assert_eq!(response.etag(), None);
        assert!(!response.has_header(ETAG));

        response.set_etag(Some("abc"));
        assert_eq!(response.etag(), Some("abc"));
        assert_eq!(response.header("etag"), Some("abc"));

        response.set_etag(None);
        assert_eq!(response.etag(), None);
        assert!(!response.has_header(ETAG));
    }

    #[test]
    fn test_is_not_modified() {
        let mut response = Response::new();
        let time = Utc::now().timestamp() - 60_000;
        let date = format_http_date(time).unwrap();

        assert!(!response.is_not_modified(&request_with(&[])));

        response.set_etag(Some("abc"));
        assert!(response.is_not_modified(&request_with(&[("If-None-Match", "*")])));
        assert!(!response.is_not_modified(&request_with(&[("If-None-Match", "def")])));
        assert!(response.is_not_modified(&request_with(&[("If-None-Match", "abc")])));
        assert!(response.is_not_modified(&request_with(&[("If-None-Match", "W/\"abc\"")])));

        response.set_last_modified(Some(time)).unwrap();
        assert!(response.is_not_modified(&request_with(&[("If-None-Match", "*"), ("If-Modified-Since", date.as_str())])));
        assert!(!response.is_not_modified(&request_with(&[("If-None-Match", "def"), ("If-Modified-Since", date.as_str())])));
        assert!(response.is_not_modified(&request_with(&[("If-None-Match", "abc"), ("If-Modified-Since", date.as_str())])));

        response.set_etag(None);
        assert!(response.is_not_modified(&request_with(&[("If-Modified-Since", date.as_str())])));
        assert!(!response.is_not_modified(&request_with(&[("If-None-Match", "abc"), ("If-Modified-Since", date.as_str())])));

        let earlier = format_http_date(time - 1).unwrap();
        assert!(!response.is_not_modified(&request_with(&[("If-Modified-Since", earlier.as_str())])));
    }

    #[test]
    fn test_quoted_etag_matches() {
        let mut response = Response::new();
        response.set_etag(Some("\"abc\""));

        assert!(response.is_not_modified(&request_with(&[("If-None-Match", "\"abc\"")])));
        assert!(!response.is_not_modified(&request_with(&[("If-None-Match", "\"def\"")])));
    }

    #[test]
    fn test_set_not_modified() {
        let mut response = Response::new();
        for name in NOT_MODIFIED_EXCLUDED_HEADERS {
            response.set_header(name, "value").unwrap();
        }
        response.set_body(Some("body".to_string()));

        for name in NOT_MODIFIED_EXCLUDED_HEADERS {
            assert!(response.has_header(name), "{name}");
        }

        response.set_not_modified();

        assert_eq!(response.status_code(), 304);
        for name in NOT_MODIFIED_EXCLUDED_HEADERS {
            assert!(!response.has_header(name), "{name}");
        }
        assert!(response.has_header(DATE));
        assert_eq!(response.body(), None);
        assert_eq!(response.last_modified(), None);
    }
}
