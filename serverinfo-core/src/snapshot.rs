//! Metrics snapshot: one parsed JSON document from the endpoint
//!
//! The snapshot is loosely structured. Screens read the fields they need
//! through [`JsonObjectExt`], which reproduces the leniency of a classic JSON
//! object API (numbers and booleans read fine as strings, `"true"` reads fine
//! as a boolean) and reports anything else as a [`ShapeError`].

use crate::error::ShapeError;
use serde_json::{Map, Value};

/// Top-level JSON object of one fetch
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    root: Map<String, Value>,
}

impl Snapshot {
    /// Wrap a parsed document. Returns `None` unless the document is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(root) => Some(Self { root }),
            _ => None,
        }
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Shortcut for a top-level section such as `cpu` or `ram`
    pub fn section(&self, key: &str) -> Result<&Map<String, Value>, ShapeError> {
        self.root.get_object(key)
    }

    /// Shortcut for a top-level array such as `storage`
    pub fn list(&self, key: &str) -> Result<&Vec<Value>, ShapeError> {
        self.root.get_array(key)
    }
}

/// Typed getters over a JSON object
pub trait JsonObjectExt {
    fn get_object(&self, key: &str) -> Result<&Map<String, Value>, ShapeError>;
    fn get_array(&self, key: &str) -> Result<&Vec<Value>, ShapeError>;
    fn get_string(&self, key: &str) -> Result<String, ShapeError>;
    fn get_bool(&self, key: &str) -> Result<bool, ShapeError>;
}

impl JsonObjectExt for Map<String, Value> {
    fn get_object(&self, key: &str) -> Result<&Map<String, Value>, ShapeError> {
        match self.get(key) {
            Some(Value::Object(map)) => Ok(map),
            Some(Value::Null) | None => Err(ShapeError::Missing(key.to_string())),
            Some(_) => Err(ShapeError::wrong_type(key, "an object")),
        }
    }

    fn get_array(&self, key: &str) -> Result<&Vec<Value>, ShapeError> {
        match self.get(key) {
            Some(Value::Array(items)) => Ok(items),
            Some(Value::Null) | None => Err(ShapeError::Missing(key.to_string())),
            Some(_) => Err(ShapeError::wrong_type(key, "an array")),
        }
    }

    fn get_string(&self, key: &str) -> Result<String, ShapeError> {
        match self.get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(Value::Null) | None => Err(ShapeError::Missing(key.to_string())),
            // containers read as their compact JSON text
            Some(other) => Ok(other.to_string()),
        }
    }

    fn get_bool(&self, key: &str) -> Result<bool, ShapeError> {
        match self.get(key) {
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => Ok(true),
            Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => Ok(false),
            Some(Value::Null) | None => Err(ShapeError::Missing(key.to_string())),
            Some(_) => Err(ShapeError::wrong_type(key, "a boolean")),
        }
    }
}

/// Element `index` of a JSON array as an object
pub fn object_at<'a>(
    items: &'a [Value],
    key: &str,
    index: usize,
) -> Result<&'a Map<String, Value>, ShapeError> {
    match items.get(index) {
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(ShapeError::wrong_type(&format!("{key}[{index}]"), "an object")),
        None => Err(ShapeError::Missing(format!("{key}[{index}]"))),
    }
}
