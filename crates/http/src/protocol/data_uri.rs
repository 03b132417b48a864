//! Data URIs (RFC 2397): `data:[<mime>][;charset=<encoding>][;base64],<payload>`.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use percent_encoding::{percent_decode_str, percent_encode};

use crate::protocol::HttpFormatError;
use crate::utils::RFC3986;

pub const DEFAULT_MIME_TYPE: &str = "text/plain";
pub const DEFAULT_ENCODING: &str = "US-ASCII";

const SCHEME: &str = "data:";

/// Inline data with its media type.
///
/// The mime type falls back to `text/plain`. The encoding falls back to `US-ASCII`, but only
/// while no mime type is set: an explicit mime type without charset has no encoding at all.
/// Equality compares these effective values, so `DataUri::decode(&uri.encode())` equals `uri`.
#[derive(Debug, Clone)]
pub struct DataUri {
    data: Bytes,
    mime: Option<String>,
    encoding: Option<String>,
    is_base64: bool,
}

impl DataUri {
    pub fn new(data: impl Into<Bytes>, mime: Option<String>, encoding: Option<String>, is_base64: bool) -> Self {
        Self { data: data.into(), mime, encoding, is_base64 }
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// The data as text, `None` when it is not valid UTF-8.
    pub fn data_as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }

    pub fn mime_type(&self) -> &str {
        self.mime.as_deref().unwrap_or(DEFAULT_MIME_TYPE)
    }

    pub fn encoding(&self) -> Option<&str> {
        match (&self.mime, &self.encoding) {
            (None, None) => Some(DEFAULT_ENCODING),
            (_, encoding) => encoding.as_deref(),
        }
    }

    pub fn is_base64(&self) -> bool {
        self.is_base64
    }

    /// Encodes the data uri, leaving the media type out when it only holds the defaults.
    pub fn encode(&self) -> String {
        let mut uri = String::from(SCHEME);

        let mime = self.mime_type();
        let encoding = self.encoding();
        if mime != DEFAULT_MIME_TYPE || encoding != Some(DEFAULT_ENCODING) {
            uri.push_str(mime);
            if let Some(encoding) = encoding {
                uri.push_str(";charset=");
                uri.push_str(encoding);
            }
        }

        if self.is_base64 {
            uri.push_str(";base64,");
            let encoded = STANDARD.encode(&self.data);
            uri.extend(percent_encode(encoded.as_bytes(), RFC3986));
        } else {
            uri.push(',');
            uri.extend(percent_encode(&self.data, RFC3986));
        }

        uri
    }

    /// Decodes a data uri.
    ///
    /// The media type is split on `;`: `base64` marks a base64 payload, `charset=` sets the
    /// encoding and any other token is the mime type. Without a media type both defaults are
    /// set explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidDataUri`] when the `data:` scheme or the `,` separator
    /// is missing, or when a base64 payload does not decode.
    pub fn decode(uri: &str) -> Result<Self, HttpFormatError> {
        let rest = uri
            .strip_prefix(SCHEME)
            .ok_or_else(|| HttpFormatError::invalid_data_uri("data uri should start with 'data:'"))?;
        let (media_type, payload) = rest
            .split_once(',')
            .ok_or_else(|| HttpFormatError::invalid_data_uri("no comma between media type and data"))?;

        let mut mime = None;
        let mut encoding = None;
        let mut is_base64 = false;

        if media_type.is_empty() {
            mime = Some(DEFAULT_MIME_TYPE.to_string());
            encoding = Some(DEFAULT_ENCODING.to_string());
        }

        for token in media_type.split(';').filter(|token| !token.is_empty()) {
            if token == "base64" {
                is_base64 = true;
            } else if let Some((key, value)) = token.split_once('=') {
                if key == "charset" {
                    encoding = Some(value.to_string());
                }
            } else {
                mime = Some(token.to_string());
            }
        }

        let decoded: Vec<u8> = percent_decode_str(payload).collect();
        let data = if is_base64 {
            STANDARD.decode(&decoded).map_err(|e| HttpFormatError::invalid_data_uri(format!("invalid base64 data: {e}")))?
        } else {
            decoded
        };

        Ok(Self::new(data, mime, encoding, is_base64))
    }
}

impl PartialEq for DataUri {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
            && self.mime_type() == other.mime_type()
            && self.encoding() == other.encoding()
            && self.is_base64 == other.is_base64
    }
}

impl Eq for DataUri {}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for DataUri {
    type Err = HttpFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectors() -> Vec<(DataUri, &'static str)> {
        vec![
            (
                DataUri::new("Hello, World!", Some(DEFAULT_MIME_TYPE.to_string()), Some(DEFAULT_ENCODING.to_string()), false),
                "data:,Hello%2C%20World%21",
            ),
            (
                DataUri::new("Hello, World!", Some("text/plain".to_string()), None, true),
                "data:text/plain;base64,SGVsbG8sIFdvcmxkIQ%3D%3D",
            ),
            (
                DataUri::new("<h1>Hello, World!</h1>", Some("text/html".to_string()), None, false),
                "data:text/html,%3Ch1%3EHello%2C%20World%21%3C%2Fh1%3E",
            ),
        ]
    }

    #[test]
    fn test_accessors() {
        let uri = DataUri::new("data", Some("mime".to_string()), Some("charset".to_string()), true);
        assert_eq!(uri.data().as_ref(), b"data");
        assert_eq!(uri.data_as_str(), Some("data"));
        assert_eq!(uri.mime_type(), "mime");
        assert_eq!(uri.encoding(), Some("charset"));
        assert!(uri.is_base64());
    }

    #[test]
    fn test_defaults() {
        let uri = DataUri::new("data", None, None, false);
        assert_eq!(uri.mime_type(), DEFAULT_MIME_TYPE);
        assert_eq!(uri.encoding(), Some(DEFAULT_ENCODING));

        let uri = DataUri::new("data", Some("image/png".to_string()), None, false);
        assert_eq!(uri.encoding(), None);
    }

    #[test]
    fn test_encode() {
        for (uri, expected) in vectors() {
            assert_eq!(uri.encode(), expected);
            assert_eq!(uri.to_string(), expected);
        }

        let uri = DataUri::new("a b", None, Some("UTF-8".to_string()), false);
        assert_eq!(uri.encode(), "data:text/plain;charset=UTF-8,a%20b");
    }

    #[test]
    fn test_decode() {
        for (expected, uri) in vectors() {
            assert_eq!(DataUri::decode(uri).unwrap(), expected);
        }

        let uri: DataUri = "data:text/html;charset=UTF-8;base64,PGI%2BaGk8L2I%2B".parse().unwrap();
        assert_eq!(uri.mime_type(), "text/html");
        assert_eq!(uri.encoding(), Some("UTF-8"));
        assert_eq!(uri.data_as_str(), Some("<b>hi</b>"));
    }

    #[test]
    fn test_decode_invalid() {
        for uri in ["text/plain,hello", "data:text/plain", "data:;base64,!!!", ""] {
            assert!(matches!(DataUri::decode(uri), Err(HttpFormatError::InvalidDataUri { .. })), "{uri}");
        }
    }

    #[test]
    fn test_decode_encoded() {
        let uris = [
            DataUri::new(vec![0_u8, 159, 146, 150], Some("application/octet-stream".to_string()), None, true),
            DataUri::new("plain", None, None, false),
            DataUri::new("utf8 ✓", None, Some("UTF-8".to_string()), false),
        ];

        for uri in uris {
            assert_eq!(DataUri::decode(&uri.encode()).unwrap(), uri);
        }
    }
}
