//! MessagePack wire codec error type.

use adlib_buffers::BufferError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MsgPackError {
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error("invalid MessagePack byte 0x{0:02x} at offset {1}")]
    InvalidByte(u8, usize),
    #[error("{0} extra byte(s) after the top-level value")]
    ExtraBytes(usize),
    #[error("nesting depth exceeds the limit of {0}")]
    DepthLimit(usize),
}
