//! Headers and the grammars of their values.
//!
//! - [`name`]: canonical header names and the [`Header`] value
//! - [`grammar`]: HTTP dates, weighted lists and entity tags
//! - [`cache_control`]: the `Cache-Control` directive map
//! - [`HeaderContainer`]: the ordered multi-map every message carries

pub mod cache_control;
mod container;
pub mod grammar;
pub mod name;

pub use cache_control::DirectiveValue;
pub use container::{HeaderContainer, HeaderSlot};
pub use grammar::{
    format_cookie_date, format_http_date, parse_cookie_date, parse_entity_tag_list, parse_http_date,
    parse_weighted_list,
};
pub use name::{Header, normalize_name};
