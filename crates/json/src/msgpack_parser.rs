//! Folds a decoded MessagePack tree into a [`Value`].

use adlib_msgpack::{MsgPackDecoder, WireKind, WireValue, DEFAULT_MAX_DEPTH};
use tracing::{debug, trace};

use crate::diagnostics::Diagnostics;
use crate::error::{ParseError, ParseWarning};
use crate::object::Object;
use crate::value::{Array, Value};

/// MessagePack to [`Value`] decoder.
///
/// Integers must fit in `i32`; floats of either width become doubles.
/// Binary and extension objects have no JSON counterpart: they decode to
/// `Null` with a warning. Map keys must be strings (binary keys holding
/// valid UTF-8 are accepted). As with [`crate::JsonParser`], the first error
/// aborts and yields `Null`, and the log is reset per call.
#[derive(Debug, Clone)]
pub struct MsgpackParser {
    max_depth: usize,
    diagnostics: Diagnostics,
}

impl Default for MsgpackParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgpackParser {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn parse(&mut self, data: &[u8]) -> Value {
        self.try_parse(data).unwrap_or_default()
    }

    pub fn try_parse(&mut self, data: &[u8]) -> Result<Value, ParseError> {
        self.diagnostics.reset();
        let result = MsgPackDecoder::with_max_depth(self.max_depth)
            .decode(data)
            .map_err(ParseError::from)
            .and_then(|wire| self.fold(&wire));
        self.finish(result)
    }

    /// Folds an already decoded tree.
    pub fn parse_wire(&mut self, wire: &WireValue) -> Value {
        self.try_parse_wire(wire).unwrap_or_default()
    }

    pub fn try_parse_wire(&mut self, wire: &WireValue) -> Result<Value, ParseError> {
        self.diagnostics.reset();
        let result = self.fold(wire);
        self.finish(result)
    }

    pub fn errors(&self) -> &[ParseError] {
        self.diagnostics.errors()
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        self.diagnostics.warnings()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.diagnostics.error_messages()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.diagnostics.warning_messages()
    }

    pub fn is_name_repeated(&self) -> bool {
        self.diagnostics.is_name_repeated()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn fold(&mut self, wire: &WireValue) -> Result<Value, ParseError> {
        let mut folder = Folder {
            max_depth: self.max_depth,
            diagnostics: &mut self.diagnostics,
        };
        folder.value(wire, 0)
    }

    fn finish(&mut self, result: Result<Value, ParseError>) -> Result<Value, ParseError> {
        if let Err(err) = &result {
            debug!(error = %err, "msgpack input rejected");
            self.diagnostics.record_error(err.clone());
        }
        result
    }
}

struct Folder<'a> {
    max_depth: usize,
    diagnostics: &'a mut Diagnostics,
}

impl Folder<'_> {
    fn value(&mut self, wire: &WireValue, depth: usize) -> Result<Value, ParseError> {
        match wire {
            WireValue::Array(items) => {
                let depth = self.enter(depth)?;
                let mut arr = Array::with_capacity(items.len());
                for item in items {
                    arr.push(self.value(item, depth)?);
                }
                Ok(Value::Array(arr))
            }
            WireValue::Map(pairs) => {
                let depth = self.enter(depth)?;
                let mut obj = Object::new();
                for (key, val) in pairs {
                    let key = map_key(key)?;
                    if obj.contains_key(&key) {
                        self.diagnostics.duplicate_key(&key);
                    }
                    let val = self.value(val, depth)?;
                    obj.insert(key, val);
                }
                Ok(Value::Object(obj))
            }
            _ => self.scalar(wire),
        }
    }

    #[inline(never)]
    fn scalar(&mut self, wire: &WireValue) -> Result<Value, ParseError> {
        let value = match wire {
            WireValue::Nil => Value::Null,
            WireValue::Boolean(b) => Value::Bool(*b),
            WireValue::PositiveInteger(u) => Value::Int(
                i32::try_from(*u).map_err(|_| ParseError::IntOutOfRange(u.to_string()))?,
            ),
            WireValue::NegativeInteger(i) => Value::Int(
                i32::try_from(*i).map_err(|_| ParseError::IntOutOfRange(i.to_string()))?,
            ),
            WireValue::Float32(f) => Value::Double(f64::from(*f)),
            WireValue::Float64(f) => Value::Double(*f),
            WireValue::Str(s) => Value::String(s.clone()),
            WireValue::Binary(_) | WireValue::Extension { .. } => {
                let kind = wire.kind();
                trace!(%kind, "unsupported msgpack type replaced by null");
                self.diagnostics
                    .record_warning(ParseWarning::UnsupportedType(kind));
                Value::Null
            }
            _ => {
                trace!("unknown msgpack type replaced by null");
                self.diagnostics.record_warning(ParseWarning::UnknownType);
                Value::Null
            }
        };
        Ok(value)
    }

    fn enter(&self, depth: usize) -> Result<usize, ParseError> {
        if depth >= self.max_depth {
            return Err(ParseError::DepthLimit(self.max_depth));
        }
        Ok(depth + 1)
    }
}

fn map_key(key: &WireValue) -> Result<String, ParseError> {
    match key {
        WireValue::Str(s) => Ok(s.clone()),
        WireValue::Binary(bytes) => String::from_utf8(bytes.clone())
            .map_err(|_| ParseError::NonStringMapKey(WireKind::Binary)),
        other => Err(ParseError::NonStringMapKey(other.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use adlib_msgpack::{BufferError, MsgPackError};

    fn str_key(s: &str) -> WireValue {
        WireValue::Str(s.into())
    }

    #[test]
    fn scalars() {
        let mut parser = MsgpackParser::new();
        assert_eq!(parser.parse(&[0xc0]), Value::Null);
        assert_eq!(parser.parse(&[0xc3]), Value::Bool(true));
        assert_eq!(parser.parse(&[0x2a]), Value::Int(42));
        assert_eq!(parser.parse(&[0xd0, 0x80]), Value::Int(-128));
        assert_eq!(parser.parse(&[0xa1, b'x']), Value::from("x"));
        assert!(parser.errors().is_empty());
    }

    #[test]
    fn float32_widens() {
        let mut parser = MsgpackParser::new();
        assert_eq!(
            parser.parse_wire(&WireValue::Float32(0.25)),
            Value::Double(0.25)
        );
    }

    #[test]
    fn integers_outside_i32_are_range_errors() {
        let mut parser = MsgpackParser::new();
        assert!(parser
            .parse_wire(&WireValue::PositiveInteger(u64::from(u32::MAX)))
            .is_null());
        assert_eq!(
            parser.errors(),
            &[ParseError::IntOutOfRange("4294967295".into())]
        );
        assert_eq!(parser.errors()[0].kind(), ErrorKind::Range);
        assert_eq!(
            parser.try_parse_wire(&WireValue::NegativeInteger(i64::from(i32::MIN))),
            Ok(Value::Int(i32::MIN))
        );
        assert!(parser
            .try_parse_wire(&WireValue::NegativeInteger(i64::from(i32::MIN) - 1))
            .is_err());
    }

    #[test]
    fn binary_and_extension_become_null_with_warning() {
        let mut parser = MsgpackParser::new();
        let wire = WireValue::Array(vec![
            WireValue::Binary(vec![1, 2]),
            WireValue::Extension {
                ext_type: 3,
                data: vec![0],
            },
            WireValue::PositiveInteger(1),
        ]);
        let value = parser.parse_wire(&wire);
        assert_eq!(
            value,
            Value::from(vec![Value::Null, Value::Null, Value::Int(1)])
        );
        assert_eq!(
            parser.warnings(),
            &[
                ParseWarning::UnsupportedType(WireKind::Binary),
                ParseWarning::UnsupportedType(WireKind::Extension),
            ]
        );
        assert!(parser.errors().is_empty());
    }

    #[test]
    fn map_keys() {
        let mut parser = MsgpackParser::new();
        let wire = WireValue::Map(vec![
            (str_key("s"), WireValue::Nil),
            (WireValue::Binary(b"b".to_vec()), WireValue::Boolean(false)),
        ]);
        let value = parser.parse_wire(&wire);
        assert!(value["s"].is_null());
        assert_eq!(value["b"], Value::Bool(false));

        let wire = WireValue::Map(vec![(WireValue::PositiveInteger(1), WireValue::Nil)]);
        assert_eq!(
            parser.try_parse_wire(&wire),
            Err(ParseError::NonStringMapKey(WireKind::PositiveInteger))
        );
        let wire = WireValue::Map(vec![(WireValue::Binary(vec![0xff]), WireValue::Nil)]);
        assert_eq!(
            parser.try_parse_wire(&wire),
            Err(ParseError::NonStringMapKey(WireKind::Binary))
        );
    }

    #[test]
    fn duplicate_map_keys_keep_last() {
        let mut parser = MsgpackParser::new();
        let wire = WireValue::Map(vec![
            (str_key("k"), WireValue::PositiveInteger(1)),
            (str_key("k"), WireValue::PositiveInteger(2)),
        ]);
        let value = parser.parse_wire(&wire);
        assert_eq!(value["k"], Value::Int(2));
        assert!(parser.is_name_repeated());
        assert_eq!(parser.warnings(), &[ParseWarning::DuplicateKey("k".into())]);
    }

    #[test]
    fn malformed_bytes_are_one_error() {
        let mut parser = MsgpackParser::new();
        assert!(parser.parse(&[0x92, 0xc0]).is_null());
        assert_eq!(parser.errors().len(), 1);
        assert!(matches!(
            parser.errors()[0],
            ParseError::Wire(MsgPackError::Buffer(BufferError::EndOfBuffer { .. }))
        ));
        assert!(parser.parse(&[0xc1]).is_null());
        assert_eq!(
            parser.errors(),
            &[ParseError::Wire(MsgPackError::InvalidByte(0xc1, 0))]
        );
        parser.parse(&[0xc0, 0x00]);
        assert_eq!(
            parser.errors(),
            &[ParseError::Wire(MsgPackError::ExtraBytes(1))]
        );
        parser.parse(&[0xa1, 0xff]);
        assert_eq!(parser.errors()[0].kind(), ErrorKind::Encoding);
    }

    #[test]
    fn depth_limit_applies_to_bytes_and_trees() {
        let mut parser = MsgpackParser::with_max_depth(1);
        assert_eq!(parser.parse(&[0x91, 0xc0]), Value::from(vec![Value::Null]));
        assert!(parser.parse(&[0x91, 0x91, 0xc0]).is_null());
        assert_eq!(parser.errors()[0].kind(), ErrorKind::Range);
        let nested = WireValue::Array(vec![WireValue::Array(vec![])]);
        assert_eq!(
            parser.try_parse_wire(&nested),
            Err(ParseError::DepthLimit(1))
        );
    }

    #[test]
    fn log_resets_per_call() {
        let mut parser = MsgpackParser::new();
        parser.parse(&[0xc4, 0x00]);
        assert_eq!(parser.warnings().len(), 1);
        parser.parse(&[0xc0]);
        assert!(parser.warnings().is_empty());
        assert!(parser.errors().is_empty());
    }

    #[test]
    fn default_depth_fits_a_small_thread_stack() {
        let nested = |depth: usize| {
            let mut data = vec![0x91; depth];
            data.push(0xc0);
            data
        };
        let handle = std::thread::Builder::new()
            .stack_size(2 << 20)
            .spawn(move || {
                let mut parser = MsgpackParser::new();
                let accepted = parser.try_parse(&nested(DEFAULT_MAX_DEPTH)).is_ok();
                let rejected = parser.try_parse(&nested(DEFAULT_MAX_DEPTH + 1));
                (accepted, rejected)
            })
            .unwrap();
        let (accepted, rejected) = handle.join().unwrap();
        assert!(accepted);
        assert_eq!(
            rejected,
            Err(ParseError::Wire(MsgPackError::DepthLimit(DEFAULT_MAX_DEPTH)))
        );
    }
}
