//! The generic decoded MessagePack tree.

use std::fmt;

/// One MessagePack object as it appeared on the wire.
///
/// Integers keep the wire's sign family: every non-negative integer is a
/// [`WireValue::PositiveInteger`], every negative one a
/// [`WireValue::NegativeInteger`], regardless of the format byte used.
///
/// The enum is `#[non_exhaustive]`; consumers must handle kinds added by
/// later versions of the codec.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum WireValue {
    Nil,
    Boolean(bool),
    PositiveInteger(u64),
    NegativeInteger(i64),
    Float32(f32),
    Float64(f64),
    Str(String),
    Binary(Vec<u8>),
    Array(Vec<WireValue>),
    Map(Vec<(WireValue, WireValue)>),
    Extension { ext_type: i8, data: Vec<u8> },
}

/// The family a [`WireValue`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum WireKind {
    Nil,
    Boolean,
    PositiveInteger,
    NegativeInteger,
    Float,
    Str,
    Binary,
    Array,
    Map,
    Extension,
}

impl WireValue {
    /// Builds an integer with the sign family MessagePack decoders report.
    pub fn integer(n: i64) -> Self {
        if n >= 0 {
            WireValue::PositiveInteger(n as u64)
        } else {
            WireValue::NegativeInteger(n)
        }
    }

    pub fn kind(&self) -> WireKind {
        match self {
            WireValue::Nil => WireKind::Nil,
            WireValue::Boolean(_) => WireKind::Boolean,
            WireValue::PositiveInteger(_) => WireKind::PositiveInteger,
            WireValue::NegativeInteger(_) => WireKind::NegativeInteger,
            WireValue::Float32(_) | WireValue::Float64(_) => WireKind::Float,
            WireValue::Str(_) => WireKind::Str,
            WireValue::Binary(_) => WireKind::Binary,
            WireValue::Array(_) => WireKind::Array,
            WireValue::Map(_) => WireKind::Map,
            WireValue::Extension { .. } => WireKind::Extension,
        }
    }
}

impl fmt::Display for WireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WireKind::Nil => "nil",
            WireKind::Boolean => "boolean",
            WireKind::PositiveInteger => "positive integer",
            WireKind::NegativeInteger => "negative integer",
            WireKind::Float => "float",
            WireKind::Str => "string",
            WireKind::Binary => "binary",
            WireKind::Array => "array",
            WireKind::Map => "map",
            WireKind::Extension => "extension",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_picks_sign_family() {
        assert_eq!(WireValue::integer(0), WireValue::PositiveInteger(0));
        assert_eq!(WireValue::integer(7), WireValue::PositiveInteger(7));
        assert_eq!(WireValue::integer(-7), WireValue::NegativeInteger(-7));
    }

    #[test]
    fn kind_names() {
        assert_eq!(WireValue::Binary(vec![1]).kind().to_string(), "binary");
        assert_eq!(
            WireValue::Extension {
                ext_type: 1,
                data: vec![]
            }
            .kind()
            .to_string(),
            "extension"
        );
        assert_eq!(WireValue::Float32(1.0).kind(), WireKind::Float);
    }
}
