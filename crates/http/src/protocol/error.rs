use thiserror::Error;

/// Validation failures raised while reading or building HTTP messages.
///
/// Every variant is a local, deterministic failure on malformed input; nothing here is
/// transient, so callers usually answer with a 400-class response instead of retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HttpFormatError {
    #[error("invalid header name: {reason}")]
    InvalidHeaderName { reason: String },

    #[error("invalid header value: {reason}")]
    InvalidHeaderValue { reason: String },

    #[error("invalid cookie: {reason}")]
    InvalidCookie { reason: String },

    #[error("invalid data uri: {reason}")]
    InvalidDataUri { reason: String },

    #[error("invalid request line: {line:?}")]
    InvalidRequestLine { line: String },

    #[error("invalid response status line: {line:?}")]
    InvalidResponseStatusLine { line: String },

    #[error("invalid header line: {line:?}")]
    InvalidHeaderLine { line: String },

    #[error("invalid status code {0}, expected a code in 100..=599")]
    InvalidStatusCode(u16),

    #[error("invalid redirect status code {0}, expected a code in 300..400")]
    InvalidRedirectStatusCode(u16),

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
}

impl HttpFormatError {
    pub fn invalid_header_name<S: ToString>(str: S) -> Self {
        Self::InvalidHeaderName { reason: str.to_string() }
    }

    pub fn invalid_header_value<S: ToString>(str: S) -> Self {
        Self::InvalidHeaderValue { reason: str.to_string() }
    }

    pub fn invalid_cookie<S: ToString>(str: S) -> Self {
        Self::InvalidCookie { reason: str.to_string() }
    }

    pub fn invalid_data_uri<S: ToString>(str: S) -> Self {
        Self::InvalidDataUri { reason: str.to_string() }
    }

    pub fn invalid_request_line<S: ToString>(line: S) -> Self {
        Self::InvalidRequestLine { line: line.to_string() }
    }

    pub fn invalid_response_status_line<S: ToString>(line: S) -> Self {
        Self::InvalidResponseStatusLine { line: line.to_string() }
    }

    pub fn invalid_header_line<S: ToString>(line: S) -> Self {
        Self::InvalidHeaderLine { line: line.to_string() }
    }

    pub fn invalid_request<S: ToString>(str: S) -> Self {
        Self::InvalidRequest { reason: str.to_string() }
    }
}

/// Failures of the session container or of the storage behind it.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session has no id, read or assign one before writing")]
    MissingId,

    #[error("session storage error: {reason}")]
    Backend { reason: String },

    #[error("session data error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

impl SessionError {
    pub fn backend<S: ToString>(str: S) -> Self {
        Self::Backend { reason: str.to_string() }
    }
}
