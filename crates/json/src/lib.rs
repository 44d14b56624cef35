//! JSON value model with a text parser, a serializer and a MessagePack
//! bridge.
//!
//! [`Value`] is a closed tagged union over the seven JSON kinds (with
//! separate 32-bit integer and double numbers). [`JsonParser`] turns text
//! into a `Value`; [`MsgpackParser`] does the same for MessagePack bytes.
//! Both keep a per-call [`Diagnostics`] log. [`Value::dump`] and
//! [`Value::dump_msgpack`] serialize back.
//!
//! ```
//! use adlib_json::{from_msgpack, from_str, to_msgpack, to_string};
//!
//! let value = from_str(r#"{"k":[true,null,1.5]}"#).unwrap();
//! assert_eq!(to_string(&value), r#"{"k":[true,null,1.5]}"#);
//! assert_eq!(from_msgpack(&to_msgpack(&value)).unwrap(), value);
//! ```

mod convert;
mod diagnostics;
mod dump;
mod error;
mod msgpack_parser;
mod object;
mod parser;
mod value;

pub use adlib_msgpack::{MsgPackEncoder, MsgPackError, WireKind, WireValue, DEFAULT_MAX_DEPTH};
pub use diagnostics::Diagnostics;
pub use error::{ErrorKind, ParseError, ParseWarning};
pub use msgpack_parser::MsgpackParser;
pub use object::Object;
pub use parser::JsonParser;
pub use value::{Array, Value, ValueType};

/// Parses JSON text, discarding warnings.
pub fn from_str(text: &str) -> Result<Value, ParseError> {
    JsonParser::new().try_parse(text)
}

/// Parses MessagePack bytes, discarding warnings.
pub fn from_msgpack(data: &[u8]) -> Result<Value, ParseError> {
    MsgpackParser::new().try_parse(data)
}

pub fn to_string(value: &Value) -> String {
    value.dump()
}

pub fn to_msgpack(value: &Value) -> Vec<u8> {
    value.dump_msgpack()
}
