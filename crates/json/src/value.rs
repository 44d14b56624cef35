//! The tagged JSON value model.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

use crate::object::Object;

/// An ordered sequence of values.
pub type Array = Vec<Value>;

pub(crate) static NULL: Value = Value::Null;
static EMPTY_OBJECT: Object = Object::new();

/// Any JSON-shaped datum.
///
/// Clones are deep: a cloned array or object shares no storage with the
/// original. Accessors never fail; asking for the wrong kind yields that
/// kind's empty default.
///
/// ```
/// use adlib_json::{Object, Value};
///
/// let mut obj = Object::new();
/// obj.insert("n", 3);
/// let value = Value::from(obj);
/// assert_eq!(value["n"].get_number_int(), 3);
/// assert_eq!(value["n"].get_string(), "");
/// assert!(value["missing"].is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    String(String),
    Int(i32),
    Double(f64),
    Bool(bool),
    Array(Array),
    Object(Object),
}

/// The kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    String,
    NumberInt,
    NumberDouble,
    Bool,
    Array,
    Object,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "null",
            ValueType::String => "string",
            ValueType::NumberInt => "int",
            ValueType::NumberDouble => "double",
            ValueType::Bool => "bool",
            ValueType::Array => "array",
            ValueType::Object => "object",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn new() -> Self {
        Value::Null
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::String(_) => ValueType::String,
            Value::Int(_) => ValueType::NumberInt,
            Value::Double(_) => ValueType::NumberDouble,
            Value::Bool(_) => ValueType::Bool,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// True for both integer and double numbers.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Double(_))
    }

    pub fn is_number_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_number_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn get_string(&self) -> &str {
        match self {
            Value::String(s) => s,
            _ => "",
        }
    }

    /// Integer view. Doubles truncate toward zero, saturating at the `i32`
    /// bounds (NaN gives 0).
    pub fn get_number_int(&self) -> i32 {
        match self {
            Value::Int(n) => *n,
            Value::Double(d) => *d as i32,
            _ => 0,
        }
    }

    /// Double view. Integers are promoted exactly.
    pub fn get_number_double(&self) -> f64 {
        match self {
            Value::Double(d) => *d,
            Value::Int(n) => f64::from(*n),
            _ => 0.0,
        }
    }

    pub fn get_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            _ => false,
        }
    }

    pub fn get_array(&self) -> &[Value] {
        match self {
            Value::Array(arr) => arr,
            _ => &[],
        }
    }

    pub fn get_object(&self) -> &Object {
        match self {
            Value::Object(obj) => obj,
            _ => &EMPTY_OBJECT,
        }
    }

    /// Mutable array access; `None` on any other kind, unlike the defaulting `get_array`.
    pub fn get_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Mutable object access; `None` on any other kind, unlike the defaulting `get_object`.
    pub fn get_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Member lookup on an object value; `None` for other kinds.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(obj) => obj.get(key),
            _ => None,
        }
    }

    /// Replaces `self` with `Null` and returns the previous value.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.get_array().get(index).unwrap_or(&NULL)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Array> for Value {
    fn from(arr: Array) -> Self {
        Value::Array(arr)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Object(map.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().collect())
    }
}
