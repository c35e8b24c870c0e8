//! Conversion to and from `serde_json` values.

use crate::value::{Array, JsonString, Number, Object, Value};

/// Convert a `serde_json::Value` into a value tree
pub fn from_serde(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Value::Number(Number::Integer(i)),
            (None, Some(f)) => Value::Number(Number::Float(f)),
            (None, None) => Value::Null,
        },
        serde_json::Value::String(s) => Value::String(JsonString::new(s)),
        serde_json::Value::Array(arr) => {
            Value::Array(arr.into_iter().map(from_serde).collect::<Array>())
        }
        serde_json::Value::Object(obj) => Value::Object(
            obj.into_iter()
                .map(|(k, v)| (k, from_serde(v)))
                .collect::<Object>(),
        ),
    }
}

/// Convert a value tree into a `serde_json::Value`. Non-finite floats become null.
pub fn to_serde(v: Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(b),
        Value::Number(Number::Integer(i)) => serde_json::Value::Number(i.into()),
        Value::Number(Number::Float(f)) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.into_string()),
        Value::Array(arr) => serde_json::Value::Array(arr.into_iter().map(to_serde).collect()),
        Value::Object(obj) => serde_json::Value::Object(
            obj.into_iter()
                .map(|(k, v)| (k, to_serde(v)))
                .collect(),
        ),
    }
}
