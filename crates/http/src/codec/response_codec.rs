//! Raw text codec of [`Response`].
//!
//! A response is serialized as its status line, the headers, one `Set-Cookie` header per
//! cookie and the body after a blank line. The status line is `<code> <phrase>`; parsing also
//! accepts the `HTTP/<version> <code> <phrase>` form sent by servers.

use std::fmt;

use tracing::trace;

use crate::protocol::header::name::{DATE, SET_COOKIE};
use crate::protocol::{HttpFormatError, Response};

impl Response {
    /// Parses a raw response whose lines are separated by `line_break`.
    ///
    /// Header names and values are trimmed, the headers end at the first blank line and the
    /// remaining lines, joined with `line_break`, form the body. Text ending with that blank
    /// line has an empty body, text without it has none. `Set-Cookie` headers are kept as
    /// headers. The `Date` of a new response is dropped, only a `Date` in the text is kept.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidResponseStatusLine`] when the first line holds no
    /// status code, [`HttpFormatError::InvalidStatusCode`] when the code is out of range and
    /// [`HttpFormatError::InvalidHeaderLine`] when a header line has no `:`.
    pub fn parse_raw(text: &str, line_break: &str) -> Result<Self, HttpFormatError> {
        parse_raw_into(Self::new(), text, line_break)
    }

    /// Renders the response as raw text, lines ended by `\r\n`.
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

/// Fills a response from raw text, see [`Response::parse_raw`].
pub(crate) fn parse_raw_into(mut response: Response, text: &str, line_break: &str) -> Result<Response, HttpFormatError> {
    let mut lines = text.split(line_break).peekable();

    let status_line = lines.next().unwrap_or_default();
    let status_code = parse_status_line(status_line)?;
    trace!(status_code, "parsed response status line");
    response.set_status_code(status_code)?;
    response.remove_header(DATE);

    for line in lines.by_ref() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        let (name, value) = line
            .split_once(':')
            .filter(|(name, _)| !name.trim().is_empty())
            .ok_or_else(|| HttpFormatError::invalid_header_line(line))?;
        response.add_header(name.trim(), value.trim())?;
    }

    let body = lines.peek().is_some().then(|| lines.collect::<Vec<_>>().join(line_break));
    response.set_body(body);

    Ok(response)
}

/// Reads the status code of `HTTP/<version> <ddd>[ <reason>]` or `<ddd>[ <reason>]`.
fn parse_status_line(line: &str) -> Result<u16, HttpFormatError> {
    let status = match line.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("HTTP/") => line.split_once(' ').map(|(_, status)| status),
        _ => Some(line),
    };

    status
        .and_then(|status| {
            let (code, rest) = status.split_at_checked(3)?;
            if !code.bytes().all(|b| b.is_ascii_digit()) || !(rest.is_empty() || rest.starts_with(' ')) {
                return None;
            }
            code.parse().ok()
        })
        .ok_or_else(|| HttpFormatError::invalid_response_status_line(line))
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status_code())?;
        if let Some(phrase) = self.status_phrase() {
            write!(f, " {phrase}")?;
        }
        f.write_str("\r\n")?;

        write!(f, "{}", self.headers())?;
        for cookie in self.cookies().values() {
            write!(f, "{SET_COOKIE}: {cookie}\r\n")?;
        }

        if let Some(body) = self.body() {
            write!(f, "\r\n{body}")?;
        }

        Ok(())
    }
}
