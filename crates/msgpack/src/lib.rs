//! MessagePack wire codec for adlib.
//!
//! This crate is the generic MessagePack facility: it decodes any document
//! into a [`WireValue`] tree and encodes trees (or individual objects) back
//! to bytes. It knows nothing about JSON; `adlib-json` folds the tree into
//! its own value model.
//!
//! ```
//! use adlib_msgpack::{decode, encode, WireValue};
//!
//! let value = WireValue::Array(vec![WireValue::Nil, WireValue::Boolean(true)]);
//! let bytes = encode(&value);
//! assert_eq!(bytes, vec![0x92, 0xc0, 0xc3]);
//! assert_eq!(decode(&bytes).unwrap(), value);
//! ```

mod constants;
mod decoder;
mod encoder;
mod error;
mod wire;

pub use adlib_buffers::BufferError;
pub use decoder::{MsgPackDecoder, DEFAULT_MAX_DEPTH};
pub use encoder::MsgPackEncoder;
pub use error::MsgPackError;
pub use wire::{WireKind, WireValue};

/// Decodes one complete MessagePack document with default limits.
pub fn decode(data: &[u8]) -> Result<WireValue, MsgPackError> {
    MsgPackDecoder::new().decode(data)
}

/// Encodes a wire tree.
pub fn encode(value: &WireValue) -> Vec<u8> {
    MsgPackEncoder::new().encode(value)
}
