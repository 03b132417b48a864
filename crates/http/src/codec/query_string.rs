//! Nested query strings, as html forms and PHP-style frameworks produce them.
//!
//! Keys of the form `base[sub1][sub2]` build nested maps, an empty segment (`base[]`) appends
//! to its level using the current size of that level as key:
//!
//! ```
//! use micro_http_model::codec::query_string;
//!
//! let parameters = query_string::parse("?tags[]=a&tags[]=b&page=2");
//! assert_eq!(query_string::build(&parameters), "tags%5B0%5D=a&tags%5B1%5D=b&page=2");
//! ```
//!
//! Keys and values go through a single `application/x-www-form-urlencoded` decode: `+` is read
//! as a space, then `%XX` escapes are resolved.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use tracing::trace;

use crate::utils::{form_decode, form_encode};

/// Parameters of a query string or a structured body, in the order they were first seen.
pub type Parameters = IndexMap<String, ParamValue>;

/// A parameter value: a plain string or a nested level of parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(String),
    Nested(Parameters),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&Parameters> {
        match self {
            Self::Scalar(_) => None,
            Self::Nested(parameters) => Some(parameters),
        }
    }

    /// Looks up a value of a nested level.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.as_nested().and_then(|parameters| parameters.get(key))
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Parameters> for ParamValue {
    fn from(value: Parameters) -> Self {
        Self::Nested(value)
    }
}

/// Levels keyed `0..n` in order serialize as sequences, other levels as maps.
impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(value) => serializer.serialize_str(value),
            Self::Nested(parameters) if is_list(parameters) => serializer.collect_seq(parameters.values()),
            Self::Nested(parameters) => serializer.collect_map(parameters),
        }
    }
}

/// Whether the keys of a level are exactly `0, 1, .., n-1` in that order.
pub(crate) fn is_list(parameters: &Parameters) -> bool {
    !parameters.is_empty() && parameters.keys().enumerate().all(|(index, key)| key.parse::<usize>() == Ok(index))
}

/// Parses a query string, with or without its leading `?`.
///
/// A token without `=` gets an empty value, empty tokens are skipped.
pub fn parse(query: &str) -> Parameters {
    let mut parameters = Parameters::new();

    for token in query.trim_start_matches('?').split('&') {
        if token.is_empty() {
            trace!(query, "skipping empty query token");
            continue;
        }

        let (raw_key, raw_value) = token.split_once('=').unwrap_or((token, ""));
        let key = form_decode(raw_key);
        let value = form_decode(raw_value);

        insert(&mut parameters, &key_path(&key), value);
    }

    parameters
}

/// Splits `base[sub1][sub2]` into `[base, sub1, sub2]`.
///
/// A key is only nested when it has an opening bracket and ends with a closing one.
fn key_path(key: &str) -> Vec<&str> {
    match key.find('[') {
        Some(open) if key.ends_with(']') && open + 1 < key.len() => {
            let mut path = vec![&key[..open]];
            path.extend(key[open + 1..key.len() - 1].split("]["));
            path
        }
        _ => vec![key],
    }
}

fn insert(level: &mut Parameters, path: &[&str], value: String) {
    let Some((segment, rest)) = path.split_first() else {
        return;
    };

    let key = if segment.is_empty() { level.len().to_string() } else { (*segment).to_string() };
    if rest.is_empty() {
        level.insert(key, ParamValue::Scalar(value));
        return;
    }

    let entry = level.entry(key).or_insert_with(|| ParamValue::Nested(Parameters::new()));
    if let ParamValue::Scalar(_) = entry {
        *entry = ParamValue::Nested(Parameters::new());
    }
    if let ParamValue::Nested(nested) = entry {
        insert(nested, rest, value);
    }
}

/// Builds a query string without the leading `?`.
///
/// Nested levels are flattened into bracketed keys, brackets encoded as `%5B` and `%5D`.
pub fn build(parameters: &Parameters) -> String {
    let mut pairs = Vec::new();
    for (key, value) in parameters {
        flatten(form_encode(key), value, &mut pairs);
    }

    pairs.join("&")
}

fn flatten(prefix: String, value: &ParamValue, pairs: &mut Vec<String>) {
    match value {
        ParamValue::Scalar(value) => pairs.push(format!("{prefix}={}", form_encode(value))),
        ParamValue::Nested(parameters) => {
            for (key, value) in parameters {
                flatten(format!("{prefix}%5B{}%5D", form_encode(key)), value, pairs);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use indexmap::indexmap;

    use super::*;

    fn nested(parameters: Parameters) -> ParamValue {
        ParamValue::Nested(parameters)
    }

    #[test]
    fn test_parse_flat() {
        let parameters = parse("?var1=value1&var2=value2");
        assert_eq!(
            parameters,
            indexmap! {
                "var1".to_string() => ParamValue::from("value1"),
                "var2".to_string() => ParamValue::from("value2"),
            }
        );
        assert_eq!(build(&parameters), "var1=value1&var2=value2");
    }

    #[test]
    fn test_parse_nested() {
        let parameters = parse("var1[subvar1]=value1&var1[subvar2]=value2&var2&var3[1][]=value3&var3[1][foo]=bar");

        let expected = indexmap! {
            "var1".to_string() => nested(indexmap! {
                "subvar1".to_string() => ParamValue::from("value1"),
                "subvar2".to_string() => ParamValue::from("value2"),
            }),
            "var2".to_string() => ParamValue::from(""),
            "var3".to_string() => nested(indexmap! {
                "1".to_string() => nested(indexmap! {
                    "0".to_string() => ParamValue::from("value3"),
                    "foo".to_string() => ParamValue::from("bar"),
                }),
            }),
        };
        assert_eq!(parameters, expected);
        assert_eq!(parameters["var3"].get("1").and_then(|level| level.get("foo")), Some(&ParamValue::from("bar")));
    }

    #[test]
    fn test_parse_appends() {
        let parameters = parse("list[]=a&list[]=b&list[]=c");
        let list = parameters["list"].as_nested().unwrap();
        let keys: Vec<&str> = list.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["0", "1", "2"]);
        assert_eq!(list["2"].as_str(), Some("c"));
    }

    #[test]
    fn test_parse_decodes_once() {
        let parameters = parse("name=John+Doe&math=1%2B1&percent=100%2525&encoded%5Bkey%5D=x");
        assert_eq!(parameters["name"].as_str(), Some("John Doe"));
        assert_eq!(parameters["math"].as_str(), Some("1+1"));
        assert_eq!(parameters["percent"].as_str(), Some("100%25"));
        assert_eq!(parameters["encoded"].get("key").and_then(ParamValue::as_str), Some("x"));
    }

    #[test]
    fn test_parse_edge_cases() {
        assert!(parse("").is_empty());
        assert!(parse("?").is_empty());
        assert_eq!(parse("a=1&&b=2").len(), 2);
        assert_eq!(parse("a=b=c")["a"].as_str(), Some("b=c"));
        // not a nested key without the closing bracket
        assert_eq!(parse("a[b=1")["a[b"].as_str(), Some("1"));
        // a scalar is replaced when the key is used as a level later on
        assert_eq!(parse("a=1&a[b]=2")["a"].get("b").and_then(ParamValue::as_str), Some("2"));
    }

    #[test]
    fn test_build_nested() {
        let parameters = indexmap! {
            "var1".to_string() => nested(indexmap! {
                "sub var".to_string() => ParamValue::from("a b"),
            }),
            "var2".to_string() => ParamValue::from(""),
            "var3".to_string() => ParamValue::from("x&y"),
        };
        assert_eq!(build(&parameters), "var1%5Bsub+var%5D=a+b&var2=&var3=x%26y");
        assert_eq!(parse(&build(&parameters)), parameters);
    }

    #[test]
    fn test_serialize_lists_as_sequences() {
        let parameters = parse("list[]=a&list[]=b&map[x]=1&map[y]=2");
        let json = serde_json::to_string(&parameters).unwrap();
        assert_eq!(json, r#"{"list":["a","b"],"map":{"x":"1","y":"2"}}"#);
    }
}
