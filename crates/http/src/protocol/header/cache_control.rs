//! The `Cache-Control` directive grammar.
//!
//! Directives are read with a lenient scanner: a directive name starts with a letter and
//! continues with letters, `_` or `-`, and may be followed by `=` and either a quoted string
//! or a token. Anything between directives (commas, stray characters) is skipped.

use std::fmt;

use indexmap::IndexMap;

pub const NO_CACHE: &str = "no-cache";
pub const NO_STORE: &str = "no-store";
pub const PRIVATE: &str = "private";
pub const PUBLIC: &str = "public";
pub const MAX_AGE: &str = "max-age";
pub const SHARED_MAX_AGE: &str = "s-maxage";

/// The value of a single cache-control directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DirectiveValue {
    /// A directive without a value, such as `no-store`.
    Flag,
    Value(String),
}

impl DirectiveValue {
    /// The directive value, `None` for a flag.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Flag => None,
            Self::Value(value) => Some(value),
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Flag)
    }
}

impl From<&str> for DirectiveValue {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for DirectiveValue {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<u64> for DirectiveValue {
    fn from(value: u64) -> Self {
        Self::Value(value.to_string())
    }
}

impl fmt::Display for DirectiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => Ok(()),
            Self::Value(value) => f.write_str(value),
        }
    }
}

/// Parses a `Cache-Control` header value into its directives, names lower-cased.
///
/// A directive with an empty value is read as a flag. When a directive is repeated the last
/// occurrence wins but keeps the position of the first.
pub fn parse_directives(value: &str) -> IndexMap<String, DirectiveValue> {
    let mut directives = IndexMap::new();
    let mut rest = value;

    while let Some(start) = rest.find(|c: char| c.is_ascii_alphabetic()) {
        rest = &rest[start..];
        let name_end = rest.find(|c: char| !is_directive_name_char(c)).unwrap_or(rest.len());
        let name = rest[..name_end].to_ascii_lowercase();
        rest = &rest[name_end..];

        let mut directive = DirectiveValue::Flag;
        if let Some(after_eq) = rest.trim_start().strip_prefix('=') {
            let (value, remaining) = match after_eq.strip_prefix('"') {
                Some(quoted) => match quoted.find('"') {
                    Some(end) => (&quoted[..end], &quoted[end + 1..]),
                    None => (quoted, ""),
                },
                None => {
                    let end = after_eq.find([' ', '\t', '"', ',', ';']).unwrap_or(after_eq.len());
                    (&after_eq[..end], &after_eq[end..])
                }
            };

            if !value.is_empty() {
                directive = DirectiveValue::Value(value.to_string());
            }
            rest = remaining;
        }

        directives.insert(name, directive);
    }

    directives
}

/// Renders directives as a `Cache-Control` header value.
///
/// Flags are emitted bare, values containing characters outside `[A-Za-z0-9._-]` are quoted.
pub fn render_directives(directives: &IndexMap<String, DirectiveValue>) -> String {
    let rendered: Vec<String> = directives
        .iter()
        .map(|(name, value)| match value {
            DirectiveValue::Flag => name.clone(),
            DirectiveValue::Value(value) if needs_quotes(value) => format!("{name}=\"{value}\""),
            DirectiveValue::Value(value) => format!("{name}={value}"),
        })
        .collect();

    rendered.join(", ")
}

fn is_directive_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-'
}

fn needs_quotes(value: &str) -> bool {
    value.chars().any(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
}
