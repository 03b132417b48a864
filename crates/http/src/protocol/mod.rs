//! The HTTP message model.
//!
//! This module holds the values a web application reads from and writes to HTTP messages.
//! Nothing here performs I/O: messages are built in memory, and the [`codec`](crate::codec)
//! module converts them from and to their raw text.
//!
//! # Architecture
//!
//! - **Headers** ([`header`]): canonical names, the ordered [`HeaderContainer`] with its
//!   `Cache-Control` directive map, and the grammars of structured header values
//!
//! - **Messages**
//!   - [`Request`]: method, path and query, headers, a body readable as text or parameters,
//!     cookies and an optional session
//!   - [`Response`]: status, headers, cookies to set, caching and redirect helpers
//!   - [`Body`]: the raw or structured body of a request
//!
//! - **Values**
//!   - [`Cookie`]: `Set-Cookie` formatting and parsing
//!   - [`DataUri`]: RFC 2397 data uris
//!   - [`Session`]: session data with the [`SessionIo`] storage contract
//!
//! - **Errors** ([`HttpFormatError`], [`SessionError`])
//!
//! [`HeaderContainer`]: header::HeaderContainer

pub mod header;

mod body;
pub use body::Body;

mod cookie;
pub use cookie::Cookie;
pub use cookie::CookieBuilder;

pub mod data_uri;
pub use data_uri::DataUri;

mod request;
pub use request::Request;
pub use request::RequestParts;

mod response;
pub use response::Response;

mod session;
pub use session::Session;
pub use session::SessionData;
pub use session::SessionHandle;
pub use session::SessionIo;

mod error;
pub use error::HttpFormatError;
pub use error::SessionError;
