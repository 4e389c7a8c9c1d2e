//! Fallible navigation over the provisioning tool's output structure.
//!
//! Outputs come back as one nested JSON document per root key. Every
//! accessor returns a typed value or a shape error naming the full dotted
//! path, so a failed assertion message identifies the exact field.

use serde_json::Value;
use thiserror::Error;

/// Result type alias for output navigation.
pub type OutputResult<T> = Result<T, OutputError>;

/// Shape errors produced while navigating the output structure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutputError {
    #[error("output field '{path}' is missing")]
    Missing { path: String },

    #[error("output field '{path}' has kind {found}, expected {expected}")]
    Kind {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// A named output group, read back after apply and held for assertions.
#[derive(Debug, Clone)]
pub struct OutputMap {
    root_key: String,
    value: Value,
}

impl OutputMap {
    pub fn new(root_key: impl Into<String>, value: Value) -> Self {
        Self {
            root_key: root_key.into(),
            value,
        }
    }

    /// The top-level output key this map was fetched for.
    pub fn root_key(&self) -> &str {
        &self.root_key
    }

    /// Navigate from the root of the output group.
    pub fn root(&self) -> OutputValue<'_> {
        OutputValue {
            path: self.root_key.clone(),
            value: &self.value,
        }
    }

    /// Shorthand for `root().field(key)`.
    pub fn field(&self, key: &str) -> OutputResult<OutputValue<'_>> {
        self.root().field(key)
    }
}

/// A value at a known path inside an output group.
#[derive(Debug, Clone)]
pub struct OutputValue<'a> {
    path: String,
    value: &'a Value,
}

impl<'a> OutputValue<'a> {
    /// Dotted path from the output root, used in error messages.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn raw(&self) -> &'a Value {
        self.value
    }

    /// Descend into a mapping by key.
    pub fn field(&self, key: &str) -> OutputResult<OutputValue<'a>> {
        let path = format!("{}.{}", self.path, key);
        let object = self.as_object()?;
        let value = object.get(key).ok_or(OutputError::Missing { path: path.clone() })?;
        Ok(OutputValue { path, value })
    }

    /// Descend into a sequence by index.
    pub fn index(&self, i: usize) -> OutputResult<OutputValue<'a>> {
        let path = format!("{}[{}]", self.path, i);
        let array = self.as_array()?;
        let value = array.get(i).ok_or(OutputError::Missing { path: path.clone() })?;
        Ok(OutputValue { path, value })
    }

    pub fn as_str(&self) -> OutputResult<&'a str> {
        self.value.as_str().ok_or(OutputError::Kind {
            path: self.path.clone(),
            expected: "string",
            found: kind_of(self.value),
        })
    }

    pub fn as_bool(&self) -> OutputResult<bool> {
        self.value.as_bool().ok_or(OutputError::Kind {
            path: self.path.clone(),
            expected: "bool",
            found: kind_of(self.value),
        })
    }

    pub fn as_object(&self) -> OutputResult<&'a serde_json::Map<String, Value>> {
        self.value.as_object().ok_or(OutputError::Kind {
            path: self.path.clone(),
            expected: "mapping",
            found: kind_of(self.value),
        })
    }

    pub fn as_array(&self) -> OutputResult<&'a Vec<Value>> {
        self.value.as_array().ok_or(OutputError::Kind {
            path: self.path.clone(),
            expected: "sequence",
            found: kind_of(self.value),
        })
    }

    /// String field of a mapping.
    pub fn string(&self, key: &str) -> OutputResult<&'a str> {
        self.field(key)?.as_str()
    }

    /// Bool field of a mapping.
    pub fn boolean(&self, key: &str) -> OutputResult<bool> {
        self.field(key)?.as_bool()
    }

    /// Whether a mapping carries the given key.
    pub fn contains_key(&self, key: &str) -> OutputResult<bool> {
        Ok(self.as_object()?.contains_key(key))
    }

    /// Keys of a mapping.
    pub fn keys(&self) -> OutputResult<Vec<&'a str>> {
        Ok(self.as_object()?.keys().map(String::as_str).collect())
    }

    /// Element or character count of a sequence, mapping, or string.
    pub fn len(&self) -> OutputResult<usize> {
        match self.value {
            Value::Array(a) => Ok(a.len()),
            Value::Object(o) => Ok(o.len()),
            Value::String(s) => Ok(s.chars().count()),
            other => Err(OutputError::Kind {
                path: self.path.clone(),
                expected: "sequence, mapping, or string",
                found: kind_of(other),
            }),
        }
    }

    pub fn is_empty(&self) -> OutputResult<bool> {
        Ok(self.len()? == 0)
    }
}
