//! Grammars of structured header values.
//!
//! - HTTP dates (`Date`, `Expires`, `Last-Modified`, `If-Modified-Since`) in the RFC 1123 layout
//! - Cookie dates, the dashed Netscape layout used by the `Expires` attribute of `Set-Cookie`
//! - Weighted lists (`Accept`, `Accept-Charset`, `Accept-Encoding`, `Accept-Language`)
//! - Entity tag lists (`If-None-Match`)

use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;
use tracing::trace;

use crate::ensure;
use crate::protocol::HttpFormatError;

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";
const COOKIE_DATE_FORMAT: &str = "%a, %d-%b-%Y %H:%M:%S GMT";

/// Formats a unix timestamp as an HTTP date, e.g. `Wed, 01 Dec 2010 16:00:00 GMT`.
///
/// # Errors
///
/// Returns [`HttpFormatError::InvalidHeaderValue`] for negative or out of range timestamps.
pub fn format_http_date(timestamp: i64) -> Result<String, HttpFormatError> {
    format_timestamp(timestamp, HTTP_DATE_FORMAT)
}

/// Parses an HTTP date into a unix timestamp.
///
/// Only the exact RFC 1123 layout is accepted, always in GMT.
///
/// # Errors
///
/// Returns [`HttpFormatError::InvalidHeaderValue`] when the value does not follow the layout.
pub fn parse_http_date(value: &str) -> Result<i64, HttpFormatError> {
    parse_timestamp(value, HTTP_DATE_FORMAT)
}

/// Formats a unix timestamp the way `Set-Cookie` expects it, e.g. `Sat, 02-May-2009 23:38:25 GMT`.
///
/// Timestamps before the epoch are formatted too.
///
/// # Errors
///
/// Returns [`HttpFormatError::InvalidHeaderValue`] for timestamps outside the range of dates.
pub fn format_cookie_date(timestamp: i64) -> Result<String, HttpFormatError> {
    render_timestamp(timestamp, COOKIE_DATE_FORMAT)
}

/// Parses the `Expires` attribute of a `Set-Cookie` header.
///
/// The dashed cookie layout is tried first, the RFC 1123 layout second.
///
/// # Errors
///
/// Returns [`HttpFormatError::InvalidHeaderValue`] when neither layout matches.
pub fn parse_cookie_date(value: &str) -> Result<i64, HttpFormatError> {
    parse_timestamp(value, COOKIE_DATE_FORMAT).or_else(|_| parse_http_date(value))
}

/// The current time as an HTTP date.
pub(crate) fn http_date_now() -> String {
    Utc::now().format(HTTP_DATE_FORMAT).to_string()
}

fn format_timestamp(timestamp: i64, layout: &str) -> Result<String, HttpFormatError> {
    ensure!(timestamp >= 0, HttpFormatError::invalid_header_value(format!("negative timestamp {timestamp}")));
    render_timestamp(timestamp, layout)
}

fn render_timestamp(timestamp: i64, layout: &str) -> Result<String, HttpFormatError> {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|date| date.format(layout).to_string())
        .ok_or_else(|| HttpFormatError::invalid_header_value(format!("timestamp {timestamp} is out of range")))
}

fn parse_timestamp(value: &str, layout: &str) -> Result<i64, HttpFormatError> {
    NaiveDateTime::parse_from_str(value.trim(), layout)
        .map(|date| date.and_utc().timestamp())
        .map_err(|e| HttpFormatError::invalid_header_value(format!("{value:?} is not a valid date: {e}")))
}

/// Parses a weighted list such as `text/html, application/xml;q=0.9, */*;q=0.8`.
///
/// Tokens without a `q` parameter weigh `1`, tokens weighing `0` are dropped. The result is
/// ordered by descending quality, tokens of equal quality keep the order they were listed in.
///
/// # Errors
///
/// Returns [`HttpFormatError::InvalidHeaderValue`] when the value is empty or a quality is not
/// a number in `0..=1`.
pub fn parse_weighted_list(value: &str) -> Result<IndexMap<String, f32>, HttpFormatError> {
    ensure!(!value.trim().is_empty(), HttpFormatError::invalid_header_value("weighted list is empty"));

    let mut entries: Vec<(String, f32)> = Vec::new();
    for item in value.split(',') {
        let mut params = item.split(';');
        let token = params.next().map(str::trim).unwrap_or_default();
        if token.is_empty() {
            continue;
        }

        let mut quality = 1.0_f32;
        for param in params {
            let Some((key, weight)) = param.split_once('=') else {
                continue;
            };
            if !key.trim().eq_ignore_ascii_case("q") {
                continue;
            }

            quality = weight
                .trim()
                .parse()
                .map_err(|e| HttpFormatError::invalid_header_value(format!("invalid quality in {item:?}: {e}")))?;
            ensure!(
                (0.0..=1.0).contains(&quality),
                HttpFormatError::invalid_header_value(format!("quality out of range in {item:?}"))
            );
        }

        if quality <= 0.0 {
            trace!(token, "dropping token with zero quality");
            continue;
        }
        entries.push((token.to_string(), quality));
    }

    // sort_by is stable, equal weights keep their listed order
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(entries.into_iter().collect())
}

/// Parses an entity tag list such as `W/"abc", "def"` into tag → is weak.
///
/// Quotes are optional, `*` is kept as a tag of its own.
///
/// # Errors
///
/// Returns [`HttpFormatError::InvalidHeaderValue`] when the value is empty.
pub fn parse_entity_tag_list(value: &str) -> Result<IndexMap<String, bool>, HttpFormatError> {
    ensure!(!value.trim().is_empty(), HttpFormatError::invalid_header_value("entity tag list is empty"));

    let mut tags = IndexMap::new();
    for item in value.split(',') {
        let (tag, is_weak) = split_entity_tag(item);
        if tag.is_empty() {
            continue;
        }
        tags.insert(tag.to_string(), is_weak);
    }

    Ok(tags)
}

/// Strips the weak marker and the quotes of a single entity tag.
pub(crate) fn split_entity_tag(value: &str) -> (&str, bool) {
    let value = value.trim();
    let (tag, is_weak) = match value.strip_prefix("W/") {
        Some(rest) => (rest, true),
        None => (value, false),
    };

    (tag.trim().trim_matches('"'), is_weak)
}
