//! Dynamically typed map values.
//!
//! A [`Value`] is either absent, a string leaf, or a map of further values.
//! Every traversal step has to check which variant it holds, which is exactly
//! the cost the dynamic accessors measure.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Separator used by [`Value::value_for_key_path`].
pub const KEY_PATH_SEPARATOR: char = '.';

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    String(String),
    Map(HashMap<String, Value>),
}

/// Raised when converting JSON that has no `Value` representation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("unsupported JSON {kind} at '{path}'")]
    Unsupported { kind: &'static str, path: String },
}

impl Value {
    /// Build a map value from `(key, value)` pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// View this value as a map, or `None` for any other variant.
    #[inline]
    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// View this value as a string leaf, or `None` for any other variant.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up `key` if this value is a map.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Copy the top level of a map value into a freshly allocated typed view.
    ///
    /// Borrowed keys and values only, but the table itself is rebuilt on every
    /// call.
    pub fn to_typed_map(&self) -> Option<HashMap<&str, &Value>> {
        self.as_map()
            .map(|map| map.iter().map(|(k, v)| (k.as_str(), v)).collect())
    }

    /// Walk a dot-delimited path such as `"MediaTypes.Movies.Die Hard 2.TagLine"`.
    ///
    /// Returns `None` for an empty path, a missing segment, or a segment that
    /// lands on a non-map value before the path is exhausted.
    pub fn value_for_key_path(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return None;
        }
        path.split(KEY_PATH_SEPARATOR)
            .try_fold(self, |current, segment| current.get(segment))
    }

    /// Number of leaf strings reachable from this value.
    pub fn leaf_count(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::String(_) => 1,
            Value::Map(map) => map.values().map(Value::leaf_count).sum(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(map: HashMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = ValueError;

    fn try_from(json: &serde_json::Value) -> Result<Self, Self::Error> {
        json_to_value(json, "$")
    }
}

fn json_to_value(json: &serde_json::Value, path: &str) -> Result<Value, ValueError> {
    let unsupported = |kind| ValueError::Unsupported {
        kind,
        path: path.to_string(),
    };
    match json {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::String(s) => Ok(Value::String(s.clone())),
        serde_json::Value::Object(obj) => obj
            .iter()
            .map(|(k, v)| {
                let child = format!("{}{}{}", path, KEY_PATH_SEPARATOR, k);
                json_to_value(v, &child).map(|v| (k.clone(), v))
            })
            .collect::<Result<HashMap<_, _>, _>>()
            .map(Value::Map),
        serde_json::Value::Bool(_) => Err(unsupported("bool")),
        serde_json::Value::Number(_) => Err(unsupported("number")),
        serde_json::Value::Array(_) => Err(unsupported("array")),
    }
}
