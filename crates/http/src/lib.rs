//! An HTTP message model
//!
//! This crate provides in-memory representations of HTTP requests, responses, headers, cookies
//! and data uris, together with the codecs that convert them from and to their wire text. It is
//! meant to sit below a web framework's dispatch layer: it does not listen on sockets, manage
//! connections or route requests.
//!
//! # Features
//!
//! - Ordered, case-insensitive header container with multi-valued headers
//! - `Cache-Control` directives kept in sync with the header
//! - Structured header grammars: HTTP dates, weighted `Accept` lists, entity tags
//! - Nested query strings (`a[b][]=c`) for queries and form bodies
//! - Request bodies readable as text or as parameters, through JSON or form encoding
//! - `Set-Cookie` formatting and parsing
//! - RFC 2397 data uris
//! - Conditional GET evaluation and redirect helpers on responses
//! - A session container with a pluggable storage contract
//!
//! # Example
//!
//! ```
//! use micro_http_model::protocol::{Cookie, Request, Response};
//!
//! let request = Request::parse_raw(
//!     "GET /articles?page=2 HTTP/1.1\r\nHost: example.com\r\nIf-None-Match: \"v7\"\r\n\r\n",
//! )
//! .unwrap();
//!
//! let mut response = Response::new();
//! response.set_etag(Some("\"v7\""));
//! if response.is_not_modified(&request) {
//!     response.set_not_modified();
//! }
//! response.set_cookie(Cookie::builder("visited").value("yes").path("/").build().unwrap());
//!
//! assert_eq!(response.status_code(), 304);
//! assert!(response.serialize().starts_with("304 Not Modified\r\n"));
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`protocol`]: the message model, headers and the values carried by messages
//! - [`codec`]: query strings and the raw text codecs of requests and responses
//! - [`factory`]: creation of all values with configurable defaults and builders
//!
//! # Error Handling
//!
//! Every malformed input is reported as a [`protocol::HttpFormatError`]; session storage
//! failures are reported as a [`protocol::SessionError`]. No operation panics on bad input.
//!
//! # Logging
//!
//! The codecs emit `tracing` events at `trace` and `debug` level, for instance for skipped
//! malformed tokens. Installing a subscriber is left to the host.

pub mod codec;
pub mod factory;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
