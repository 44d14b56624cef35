//! Conversions between [`Value`] and `serde_json::Value`.

use serde_json::{Map, Number};

use crate::value::Value;

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::Number(Number::from(*n)),
            Value::Double(d) => Number::from_f64(*d)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(arr) => serde_json::Value::Array(arr.iter().map(Into::into).collect()),
            Value::Object(obj) => {
                let mut map = Map::new();
                for (key, val) in obj {
                    map.insert(key.clone(), val.into());
                }
                serde_json::Value::Object(map)
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        (&value).into()
    }
}

/// Integers that fit `i32` become [`Value::Int`]; every other number
/// becomes a [`Value::Double`].
impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => number(n),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(arr) => Value::Array(arr.iter().map(Into::into).collect()),
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(key, val)| (key.clone(), Value::from(val)))
                .collect(),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        (&value).into()
    }
}

fn number(n: &Number) -> Value {
    if let Some(i) = n.as_i64().and_then(|i| i32::try_from(i).ok()) {
        return Value::Int(i);
    }
    n.as_f64().map_or(Value::Null, Value::Double)
}
