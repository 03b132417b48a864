//! Request bodies: raw text or structured parameters.
//!
//! A body is set in one of both shapes and read in either. The other shape is derived through
//! the `Content-Type` of the message:
//!
//! | content type                        | parameters → text         | text → parameters          |
//! |-------------------------------------|---------------------------|----------------------------|
//! | `application/json`                  | JSON encoding             | JSON decoding              |
//! | `application/x-www-form-urlencoded` | [`query_string::build`]   | [`query_string::parse`]    |
//! | anything else                       | no text                   | no parameters              |

use mime::Mime;
use serde_json::Value;
use tracing::debug;

use crate::codec::query_string::{self, ParamValue, Parameters, is_list};

/// The body as it was set on a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    #[default]
    None,
    Raw(String),
    Parameters(Parameters),
}

impl Body {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}

impl From<&str> for Body {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_string())
    }
}

impl From<Parameters> for Body {
    fn from(value: Parameters) -> Self {
        Self::Parameters(value)
    }
}

impl From<Option<String>> for Body {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::None, Self::Raw)
    }
}

/// The structured formats a body converts between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyFormat {
    Json,
    Form,
}

impl BodyFormat {
    /// Picks the format from a `Content-Type` value, comparing its essence only.
    pub(crate) fn from_content_type(content_type: Option<&str>) -> Option<Self> {
        let mime: Mime = content_type?.parse().ok()?;
        match mime.essence_str() {
            "application/json" => Some(Self::Json),
            "application/x-www-form-urlencoded" => Some(Self::Form),
            _ => None,
        }
    }

    /// Renders parameters as text, `None` for empty parameters.
    pub(crate) fn encode(self, parameters: &Parameters) -> Option<String> {
        if parameters.is_empty() {
            return None;
        }

        match self {
            Self::Form => Some(query_string::build(parameters)),
            Self::Json => {
                let encoded = if is_list(parameters) {
                    serde_json::to_string(&parameters.values().collect::<Vec<_>>())
                } else {
                    serde_json::to_string(parameters)
                };

                match encoded {
                    Ok(encoded) => Some(encoded),
                    Err(e) => {
                        debug!(cause = %e, "failed to encode json body");
                        None
                    }
                }
            }
        }
    }

    /// Reads parameters from text, empty parameters when the text does not decode.
    pub(crate) fn decode(self, raw: &str) -> Parameters {
        match self {
            Self::Form => query_string::parse(raw),
            Self::Json => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(object)) => object.into_iter().map(|(key, value)| (key, from_json(value))).collect(),
                Ok(Value::Array(items)) => from_json_array(items),
                Ok(_) => {
                    debug!("json body is not an object or an array, no parameters");
                    Parameters::new()
                }
                Err(e) => {
                    debug!(cause = %e, "failed to decode json body");
                    Parameters::new()
                }
            },
        }
    }
}

fn from_json(value: Value) -> ParamValue {
    match value {
        Value::Null => ParamValue::Scalar(String::new()),
        Value::String(value) => ParamValue::Scalar(value),
        Value::Bool(_) | Value::Number(_) => ParamValue::Scalar(value.to_string()),
        Value::Array(items) => ParamValue::Nested(from_json_array(items)),
        Value::Object(object) => {
            ParamValue::Nested(object.into_iter().map(|(key, value)| (key, from_json(value))).collect())
        }
    }
}

fn from_json_array(items: Vec<Value>) -> Parameters {
    items.into_iter().enumerate().map(|(index, value)| (index.to_string(), from_json(value))).collect()
}

#[cfg(test)]
mod tests {
    use indexmap::indexmap;

    use super::*;

    #[test]
    fn test_format_from_content_type() {
        assert_eq!(BodyFormat::from_content_type(Some("application/json")), Some(BodyFormat::Json));
        assert_eq!(BodyFormat::from_content_type(Some("application/json; charset=utf-8")), Some(BodyFormat::Json));
        assert_eq!(BodyFormat::from_content_type(Some("APPLICATION/JSON")), Some(BodyFormat::Json));
        assert_eq!(
            BodyFormat::from_content_type(Some("application/x-www-form-urlencoded")),
            Some(BodyFormat::Form)
        );
        assert_eq!(BodyFormat::from_content_type(Some("text/plain")), None);
        assert_eq!(BodyFormat::from_content_type(Some("not a mime")), None);
        assert_eq!(BodyFormat::from_content_type(None), None);
    }

    #[test]
    fn test_json() {
        let parameters = indexmap! { "variable".to_string() => ParamValue::from("value") };
        assert_eq!(BodyFormat::Json.encode(&parameters).as_deref(), Some(r#"{"variable":"value"}"#));
        assert_eq!(BodyFormat::Json.decode(r#"{"variable":"value"}"#), parameters);
        assert_eq!(BodyFormat::Json.encode(&Parameters::new()), None);
    }

    #[test]
    fn test_json_conversions() {
        let parameters = BodyFormat::Json.decode(r#"{"n":1.5,"ok":true,"none":null,"list":["a",{"b":2}]}"#);

        assert_eq!(parameters["n"].as_str(), Some("1.5"));
        assert_eq!(parameters["ok"].as_str(), Some("true"));
        assert_eq!(parameters["none"].as_str(), Some(""));
        assert_eq!(parameters["list"].get("0").and_then(ParamValue::as_str), Some("a"));
        assert_eq!(parameters["list"].get("1").and_then(|item| item.get("b")).and_then(ParamValue::as_str), Some("2"));

        let list = BodyFormat::Json.decode(r#"["x","y"]"#);
        assert_eq!(BodyFormat::Json.encode(&list).as_deref(), Some(r#"["x","y"]"#));
    }

    #[test]
    fn test_json_invalid() {
        assert!(BodyFormat::Json.decode("{not json").is_empty());
        assert!(BodyFormat::Json.decode("42").is_empty());
    }

    #[test]
    fn test_form() {
        let parameters = BodyFormat::Form.decode("var1=value1&var2[a]=value+2");
        assert_eq!(parameters["var2"].get("a").and_then(ParamValue::as_str), Some("value 2"));
        assert_eq!(BodyFormat::Form.encode(&parameters).as_deref(), Some("var1=value1&var2%5Ba%5D=value+2"));
    }

    #[test]
    fn test_body_from() {
        assert_eq!(Body::from("raw"), Body::Raw("raw".to_string()));
        assert_eq!(Body::from(None), Body::None);
        assert!(Body::default().is_none());
        assert_eq!(Body::from(Parameters::new()), Body::Parameters(Parameters::new()));
    }
}
