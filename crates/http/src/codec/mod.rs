//! Text codecs of the HTTP message model
//!
//! This module converts the values of [`protocol`](crate::protocol) from and to their wire
//! text. Every codec works on complete, in-memory text; nothing is streamed.
//!
//! # Architecture
//!
//! - [`query_string`]: nested `application/x-www-form-urlencoded` parameters
//!   (`a[b][]=c`), used for url queries and form bodies
//!
//! - Request handling:
//!   - [`Request::parse_raw`](crate::protocol::Request::parse_raw): raw request text into a request
//!   - [`Request::serialize`](crate::protocol::Request::serialize): a request back into raw text
//!
//! - Response handling:
//!   - [`Response::parse_raw`](crate::protocol::Response::parse_raw): raw response text into a response
//!   - [`Response::serialize`](crate::protocol::Response::serialize): status line, headers,
//!     `Set-Cookie` headers and body
//!
//! # Example
//!
//! ```
//! use micro_http_model::protocol::Request;
//!
//! let request = Request::parse_raw("GET /search?q=rust HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();
//!
//! assert_eq!(request.query(), Some("?q=rust"));
//! assert_eq!(request.url(), "http://localhost/search?q=rust");
//! assert_eq!(request.serialize(), "GET /search?q=rust HTTP/1.1\r\nHost: localhost\r\n");
//! ```

pub mod query_string;

pub(crate) mod request_codec;
pub(crate) mod response_codec;
