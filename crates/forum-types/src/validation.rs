//! Request-body schemas.
//!
//! Bodies are checked field by field against the raw JSON value so that every
//! problem is reported at once, each as a [`FieldError`] with the location of
//! the offending input.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// One segment of an error location, e.g. `["body", "title"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocItem {
    Key(String),
    Index(usize),
}

impl From<&str> for LocItem {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<LocItem>,
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctx: Option<Value>,
}

impl FieldError {
    fn new(kind: &str, loc: Vec<LocItem>, msg: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            loc,
            msg: msg.into(),
            input: None,
            ctx: None,
        }
    }

    fn with_input(mut self, input: &Value) -> Self {
        self.input = Some(input.clone());
        self
    }

    pub fn missing_body() -> Self {
        Self::new("missing", vec!["body".into()], "Field required")
    }

    pub fn invalid_json(error: impl std::fmt::Display) -> Self {
        let mut err = Self::new("json_invalid", vec!["body".into()], "JSON decode error");
        err.ctx = Some(json!({ "error": error.to_string() }));
        err
    }

    pub fn not_an_object(input: &Value) -> Self {
        Self::new(
            "model_attributes_type",
            vec!["body".into()],
            "Input should be a valid dictionary or object to extract fields from",
        )
        .with_input(input)
    }

    pub fn missing_field(field: &str, body: &Value) -> Self {
        Self::new("missing", vec!["body".into(), field.into()], "Field required").with_input(body)
    }

    pub fn not_a_string(field: &str, input: &Value) -> Self {
        Self::new(
            "string_type",
            vec!["body".into(), field.into()],
            "Input should be a valid string",
        )
        .with_input(input)
    }

    pub fn too_long(field: &str, input: &Value, max_length: usize) -> Self {
        let mut err = Self::new(
            "string_too_long",
            vec!["body".into(), field.into()],
            format!("String should have at most {max_length} characters"),
        )
        .with_input(input);
        err.ctx = Some(json!({ "max_length": max_length }));
        err
    }

    pub fn not_an_integer(param: &str, input: &str) -> Self {
        Self::new(
            "int_parsing",
            vec!["path".into(), param.into()],
            "Input should be a valid integer, unable to parse string as an integer",
        )
        .with_input(&Value::String(input.to_string()))
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::new("value_error", vec!["path".into()], msg)
    }
}

/// A request body that can be built from untrusted JSON.
pub trait RequestBody: Sized {
    fn from_json(body: &Value) -> Result<Self, Vec<FieldError>>;
}

/// Pulls typed fields out of a JSON object, collecting errors as it goes.
pub struct FieldReader<'a> {
    body: &'a Value,
    fields: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    pub fn new(body: &'a Value) -> Result<Self, Vec<FieldError>> {
        let fields = body
            .as_object()
            .ok_or_else(|| vec![FieldError::not_an_object(body)])?;
        Ok(Self {
            body,
            fields,
            errors: Vec::new(),
        })
    }

    /// Required string field of at most `max_chars` characters.
    pub fn string(&mut self, field: &str, max_chars: usize) -> Option<String> {
        let Some(value) = self.fields.get(field) else {
            self.errors.push(FieldError::missing_field(field, self.body));
            return None;
        };
        let Some(s) = value.as_str() else {
            self.errors.push(FieldError::not_a_string(field, value));
            return None;
        };
        if s.chars().count() > max_chars {
            self.errors.push(FieldError::too_long(field, value, max_chars));
            return None;
        }
        Some(s.to_string())
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}
