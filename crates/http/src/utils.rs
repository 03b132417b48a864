//! Utility macros and helpers shared by the header, cookie and message codecs.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// A macro for early returns with an error if a condition is not met.
///
/// This is similar to the `assert!` macro, but returns an error instead of panicking.
/// It's useful for validation checks where you want to return early with an error
/// if some condition is not satisfied.
///
/// # Arguments
///
/// * `$predicate` - A boolean expression that should evaluate to true
/// * `$error` - The error value to return if the predicate is false
///
/// # Example
///
/// ```ignore
/// ensure!(!name.is_empty(), HttpFormatError::invalid_cookie("cookie name is empty"));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;

/// Everything but `A-Z a-z 0-9 - _ .` is escaped, space included.
///
/// Matches `application/x-www-form-urlencoded` serialization once spaces are turned into `+`.
const FORM: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// RFC 3986 unreserved characters are kept, everything else is escaped.
pub(crate) const RFC3986: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Encodes a value the way html forms do: `+` for spaces, `%XX` for the rest.
pub(crate) fn form_encode(input: &str) -> String {
    utf8_percent_encode(input, FORM).to_string().replace("%20", "+")
}

/// Decodes a form encoded value, `+` is read as a space before percent-decoding.
pub(crate) fn form_decode(input: &str) -> String {
    let plus_as_space = input.replace('+', " ");
    percent_decode_str(&plus_as_space).decode_utf8_lossy().into_owned()
}
