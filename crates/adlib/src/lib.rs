//! adlib: a JSON value model with a text parser, a serializer and a
//! MessagePack codec, plus the helpers behind the `json-pack` and
//! `json-unpack` tools.
//!
//! ```
//! use adlib::{JsonParser, MsgpackParser};
//!
//! let mut text = JsonParser::new();
//! let value = text.parse(r#"{"name":"adlib","tags":["json","msgpack"]}"#);
//! let bytes = value.dump_msgpack();
//!
//! let mut binary = MsgpackParser::new();
//! assert_eq!(binary.parse(&bytes), value);
//! assert_eq!(value["tags"][1].get_string(), "msgpack");
//! ```

pub mod cli;

pub use adlib_buffers as buffers;
pub use adlib_msgpack as msgpack;

pub use adlib_json::{
    from_msgpack, from_str, to_msgpack, to_string, Array, Diagnostics, ErrorKind, JsonParser,
    MsgpackParser, Object, ParseError, ParseWarning, Value, ValueType, DEFAULT_MAX_DEPTH,
};
pub use adlib_util::{
    Command, CommandLineError, CommandLineParser, CommandLineSetting, EasyTimer, TimeUnit,
};
