//! Parse error and warning types shared by the text and binary parsers.

use std::fmt;

use adlib_msgpack::{MsgPackError, WireKind};
use thiserror::Error;

/// Broad class of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Structurally malformed input: missing delimiter, bad token,
    /// unterminated string, malformed binary.
    Syntax,
    /// A number outside the representable range, or nesting too deep.
    Range,
    /// Bad `\u` escape, surrogate code unit, or invalid UTF-8.
    Encoding,
}

/// The error that aborted a parse. Offsets are byte offsets into the input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("no value found at byte {0}")]
    NoValue(usize),
    #[error("unexpected character '{ch}' at byte {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    #[error("invalid literal \"{text}\" at byte {offset}")]
    InvalidLiteral { text: String, offset: usize },
    #[error("number at byte {0} has a leading '0' followed by a digit")]
    LeadingZero(usize),
    #[error("invalid character in number at byte {0}")]
    BadNumber(usize),
    #[error("no digit follows '.' in number at byte {0}")]
    MissingFractionDigit(usize),
    #[error("no digit follows the exponent in number at byte {0}")]
    MissingExponentDigit(usize),
    #[error("string starting at byte {0} is not terminated by '\"'")]
    UnterminatedString(usize),
    #[error("missing '}}' for object starting at byte {0}")]
    MissingObjectEnd(usize),
    #[error("missing ',' between object members at byte {0}")]
    MissingObjectComma(usize),
    #[error("object key at byte {0} is not a string")]
    NonStringKey(usize),
    #[error("missing ':' after object key \"{key}\" at byte {offset}")]
    MissingColon { key: String, offset: usize },
    #[error("missing ']' for array starting at byte {0}")]
    MissingArrayEnd(usize),
    #[error("missing ',' between array elements at byte {0}")]
    MissingArrayComma(usize),
    #[error("unexpected trailing characters at byte {0}")]
    TrailingCharacters(usize),
    #[error("map key of type {0} cannot be used as an object key")]
    NonStringMapKey(WireKind),
    #[error("\"{0}\" is out of 32-bit integer range")]
    IntOutOfRange(String),
    #[error("\"{0}\" is out of double range")]
    DoubleOutOfRange(String),
    #[error("nesting depth exceeds the limit of {0}")]
    DepthLimit(usize),
    #[error("invalid escape sequence \"{text}\" at byte {offset}")]
    InvalidEscape { text: String, offset: usize },
    #[error("\\u{unit:04X} at byte {offset} is in the surrogate range U+D800..U+DFFF")]
    SurrogateCodeUnit { unit: u16, offset: usize },
    #[error("string starting at byte {0} is not valid UTF-8")]
    InvalidUtf8(usize),
    #[error("malformed MessagePack: {0}")]
    Wire(#[from] MsgPackError),
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::IntOutOfRange(_)
            | ParseError::DoubleOutOfRange(_)
            | ParseError::DepthLimit(_)
            | ParseError::Wire(MsgPackError::DepthLimit(_)) => ErrorKind::Range,
            ParseError::InvalidEscape { .. }
            | ParseError::SurrogateCodeUnit { .. }
            | ParseError::InvalidUtf8(_)
            | ParseError::Wire(MsgPackError::Buffer(adlib_msgpack::BufferError::InvalidUtf8(_))) => {
                ErrorKind::Encoding
            }
            _ => ErrorKind::Syntax,
        }
    }
}

/// A non-fatal finding recorded during a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// An object repeated a key; the later value was kept.
    DuplicateKey(String),
    /// A MessagePack binary or extension object was replaced by `null`.
    UnsupportedType(WireKind),
    /// A MessagePack object of a kind this decoder does not know was
    /// replaced by `null`.
    UnknownType,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::DuplicateKey(key) => {
                write!(f, "name \"{key}\" is repeated; the later value takes priority")
            }
            ParseWarning::UnsupportedType(kind) => {
                write!(f, "{kind} type is not supported; null is given instead")
            }
            ParseWarning::UnknownType => {
                f.write_str("unknown type detected; null is given instead")
            }
        }
    }
}
