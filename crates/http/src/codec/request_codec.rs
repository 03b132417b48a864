//! Raw text codec of [`Request`].
//!
//! The layout is the one of an HTTP/1.x request:
//!
//! ```text
//! METHOD PATH PROTOCOL
//! Name: value
//! Name: value
//!
//! body
//! ```
//!
//! Lines are split on `\n`, a trailing `\r` is dropped from every line.

use std::fmt;

use tracing::trace;

use crate::protocol::header::HeaderContainer;
use crate::protocol::{Body, HttpFormatError, Request, RequestParts};

impl Request {
    /// Parses a raw request.
    ///
    /// The headers end at the first blank line; everything after it, joined with `\n`, is the
    /// body. A request without body text gets no body at all.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidRequestLine`] when the first line does not hold exactly
    /// a method, a path and a protocol, [`HttpFormatError::InvalidHeaderLine`] when a header line
    /// has no `": "` separator, and the errors of [`Request::from_parts`].
    pub fn parse_raw(text: &str) -> Result<Self, HttpFormatError> {
        Self::from_parts(parse_raw_parts(text)?)
    }

    /// Renders the request as raw text, lines ended by `\r\n`.
    ///
    /// The body, when there is body text, follows a blank line and ends with `\r\n`.
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

/// Reads the parts of a raw request, see [`Request::parse_raw`].
pub(crate) fn parse_raw_parts(text: &str) -> Result<RequestParts, HttpFormatError> {
    let mut lines = text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));

    let request_line = lines.next().unwrap_or_default();
    let tokens: Vec<&str> = request_line.split(' ').collect();
    let [method, path, protocol] = tokens[..] else {
        return Err(HttpFormatError::invalid_request_line(request_line));
    };
    let protocol = protocol.trim();
    trace!(method, path, protocol, "parsed request line");

    let mut headers = HeaderContainer::new();
    for line in lines.by_ref() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        let (name, value) = line.split_once(": ").ok_or_else(|| HttpFormatError::invalid_header_line(line))?;
        headers.add(name, value, false)?;
    }

    let body = lines.collect::<Vec<_>>().join("\n");
    let body = if body.is_empty() { Body::None } else { Body::Raw(body) };

    Ok(RequestParts {
        method: method.to_string(),
        path: path.to_string(),
        protocol: protocol.to_string(),
        headers,
        body,
        is_secure: false,
    })
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}\r\n", self.method(), self.path(), self.protocol())?;
        write!(f, "{}", self.headers())?;

        if let Some(body) = self.body().filter(|body| !body.is_empty()) {
            write!(f, "\r\n{body}\r\n")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use http::Method;
    use indoc::indoc;

    use super::*;
    use crate::codec::query_string::ParamValue;

    #[test]
    fn test_parse_raw() {
        let str = indoc! {r"
        GET /path/to?var1=value HTTP/1.1
        Cache-Control: max-age=0
        Connection: keep-alive
        Host: localhost
        "};

        let mut headers = HeaderContainer::new();
        headers.add("Cache-Control", "max-age=0", false).unwrap();
        headers.add("Connection", "keep-alive", false).unwrap();
        headers.add("Host", "localhost", false).unwrap();
        let expected = Request::from_parts(RequestParts {
            path: "/path/to?var1=value".to_string(),
            headers,
            ..RequestParts::default()
        })
        .unwrap();

        let request = Request::parse_raw(str).unwrap();

        assert_eq!(request, expected);
        assert_eq!(request.query_parameter("var1").and_then(ParamValue::as_str), Some("value"));
        assert_eq!(request.body(), None);
    }

    #[test]
    fn test_parse_raw_with_body() {
        let str = "post /form HTTP/1.0\r\n\
                   Content-Type: application/x-www-form-urlencoded\r\n\
                   Cookie: session=abc\r\n\
                   \r\n\
                   name=micro+http&tags[]=rust\r\n\
                   second line";

        let request = Request::parse_raw(str).unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.protocol(), "HTTP/1.0");
        assert_eq!(request.cookie("session"), Some("abc"));
        assert_eq!(request.body(), Some("name=micro+http&tags[]=rust\nsecond line"));
        assert_eq!(request.body_parameter("name").and_then(ParamValue::as_str), Some("micro http"));
    }

    #[test]
    fn test_parse_raw_invalid() {
        for str in ["", "GET /path", "GET /path HTTP/1.1 extra", "GET  /path HTTP/1.1"] {
            assert!(
                matches!(Request::parse_raw(str), Err(HttpFormatError::InvalidRequestLine { .. })),
                "{str:?}"
            );
        }

        let str = indoc! {"
        GET / HTTP/1.1
        Host localhost
        "};
        assert_eq!(Request::parse_raw(str), Err(HttpFormatError::invalid_header_line("Host localhost")));
    }

    #[test]
    fn test_serialize() {
        let mut request = Request::parse_raw("GET /path?a=1 HTTP/1.1\nHost: localhost\nAccept: */*\n").unwrap();
        assert_eq!(request.serialize(), "GET /path?a=1 HTTP/1.1\r\nHost: localhost\r\nAccept: */*\r\n");

        request.set_body("payload");
        assert_eq!(request.to_string(), "GET /path?a=1 HTTP/1.1\r\nHost: localhost\r\nAccept: */*\r\n\r\npayload\r\n");
    }

    #[test]
    fn test_serialize_then_parse() {
        let request = Request::parse_raw(indoc! {r#"
        PUT /items/1 HTTP/1.1
        Content-Type: application/json

        {"name":"item"}"#})
        .unwrap();

        let parsed = Request::parse_raw(&request.serialize()).unwrap();
        assert_eq!(parsed.method(), Method::PUT);
        assert_eq!(parsed.headers(), request.headers());
        assert_eq!(parsed.body_parameter("name").and_then(ParamValue::as_str), Some("item"));
    }
}
