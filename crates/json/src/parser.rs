//! Recursive-descent JSON text parser.

use tracing::debug;

use crate::diagnostics::Diagnostics;
use crate::error::{ParseError, ParseWarning};
use crate::object::Object;
use crate::value::{Array, Value};
use adlib_msgpack::DEFAULT_MAX_DEPTH;

const BOM: &[u8] = &[0xef, 0xbb, 0xbf];

/// JSON text parser.
///
/// Accepts RFC 8259 text with an optional UTF-8 BOM, plus duplicate object
/// keys (the later value wins and a warning is recorded). `\u` escapes in
/// the surrogate range are rejected rather than paired. The first error
/// aborts the parse and the result is `Null`; inspect [`JsonParser::errors`]
/// to tell a failed parse from a literal `null`.
///
/// ```
/// use adlib_json::{JsonParser, Value};
///
/// let mut parser = JsonParser::new();
/// let value = parser.parse(r#"{"a":1,"a":[true,null]}"#);
/// assert!(parser.errors().is_empty());
/// assert!(parser.is_name_repeated());
/// assert_eq!(value["a"][0], Value::Bool(true));
///
/// assert!(parser.parse("[1,2,]").is_null());
/// assert_eq!(parser.errors().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct JsonParser {
    max_depth: usize,
    diagnostics: Diagnostics,
}

impl Default for JsonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonParser {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Parser that rejects arrays and objects nested deeper than `max_depth`.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn parse(&mut self, text: &str) -> Value {
        self.parse_bytes(text.as_bytes())
    }

    /// Parses UTF-8 bytes. String contents that are not valid UTF-8 are an
    /// encoding error.
    pub fn parse_bytes(&mut self, data: &[u8]) -> Value {
        self.try_parse_bytes(data).unwrap_or_default()
    }

    /// Like [`JsonParser::parse`], returning the aborting error directly.
    /// The error is recorded in the log as well.
    pub fn try_parse(&mut self, text: &str) -> Result<Value, ParseError> {
        self.try_parse_bytes(text.as_bytes())
    }

    pub fn try_parse_bytes(&mut self, data: &[u8]) -> Result<Value, ParseError> {
        self.diagnostics.reset();
        let mut scanner = Scanner {
            data,
            x: 0,
            depth: 0,
            max_depth: self.max_depth,
            diagnostics: &mut self.diagnostics,
        };
        match scanner.document() {
            Ok(value) => Ok(value),
            Err(err) => {
                debug!(error = %err, len = data.len(), "json text rejected");
                self.diagnostics.record_error(err.clone());
                Err(err)
            }
        }
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
}

/// Scan state for one call; `x` is the cursor into `data`.
struct Scanner<'a> {
    data: &'a [u8],
    x: usize,
    depth: usize,
    max_depth: usize,
    diagnostics: &'a mut Diagnostics,
}

impl Scanner<'_> {
    fn document(&mut self) -> Result<Value, ParseError> {
        if self.data.starts_with(BOM) {
            self.x = BOM.len();
        }
        let value = self.value()?;
        if self.peek().is_some() {
            return Err(ParseError::TrailingCharacters(self.x));
        }
        Ok(value)
    }

    /// Skips whitespace and returns the next byte without consuming it.
    fn peek(&mut self) -> Option<u8> {
        while let Some(&b) = self.data.get(self.x) {
            if !matches!(b, b' ' | b'\r' | b'\n' | b'\t') {
                return Some(b);
            }
            self.x += 1;
        }
        None
    }

    fn value(&mut self) -> Result<Value, ParseError> {
        match self.peek() {
            None => Err(ParseError::NoValue(self.x)),
            Some(b'"') => self.string().map(Value::String),
            Some(b'-' | b'0'..=b'9') => self.number(),
            Some(b'{') => self.object(),
            Some(b'[') => self.array(),
            Some(b't') => self.literal("true", Value::Bool(true)),
            Some(b'f') => self.literal("false", Value::Bool(false)),
            Some(b'n') => self.literal("null", Value::Null),
            Some(_) => Err(ParseError::UnexpectedChar {
                ch: self.char_at(self.x),
                offset: self.x,
            }),
        }
    }

    fn literal(&mut self, word: &'static str, value: Value) -> Result<Value, ParseError> {
        let rest = &self.data[self.x..];
        if !rest.starts_with(word.as_bytes()) {
            let end = rest.len().min(word.len());
            return Err(ParseError::InvalidLiteral {
                text: String::from_utf8_lossy(&rest[..end]).into_owned(),
                offset: self.x,
            });
        }
        self.x += word.len();
        Ok(value)
    }

    fn string(&mut self) -> Result<String, ParseError> {
        let start = self.x;
        self.x += 1;
        let mut buf = Vec::new();
        loop {
            let rest = &self.data[self.x..];
            let Some(pos) = rest.iter().position(|&b| b == b'"' || b == b'\\') else {
                return Err(ParseError::UnterminatedString(start));
            };
            buf.extend_from_slice(&rest[..pos]);
            self.x += pos + 1;
            if rest[pos] == b'"' {
                break;
            }
            self.escape(&mut buf)?;
        }
        String::from_utf8(buf).map_err(|_| ParseError::InvalidUtf8(start))
    }

    /// Decodes the escape after a consumed backslash.
    fn escape(&mut self, buf: &mut Vec<u8>) -> Result<(), ParseError> {
        let offset = self.x - 1;
        let Some(&c) = self.data.get(self.x) else {
            return Err(self.invalid_escape(offset, self.x));
        };
        self.x += 1;
        let byte = match c {
            b'"' => b'"',
            b'\\' => b'\\',
            b'/' => b'/',
            b'b' => 0x08,
            b'f' => 0x0c,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'u' => {
                let unit = self.hex4(offset)?;
                // `None` only for the surrogate range.
                let ch = char::from_u32(u32::from(unit))
                    .ok_or(ParseError::SurrogateCodeUnit { unit, offset })?;
                buf.extend_from_slice(ch.encode_utf8(&mut [0; 4]).as_bytes());
                return Ok(());
            }
            _ => return Err(self.invalid_escape(offset, self.x)),
        };
        buf.push(byte);
        Ok(())
    }

    fn hex4(&mut self, offset: usize) -> Result<u16, ParseError> {
        let end = self.x + 4;
        let Some(digits) = self.data.get(self.x..end) else {
            return Err(self.invalid_escape(offset, self.data.len()));
        };
        let mut unit = 0u16;
        for &d in digits {
            let Some(nibble) = char::from(d).to_digit(16) else {
                return Err(self.invalid_escape(offset, end));
            };
            unit = (unit << 4) | nibble as u16;
        }
        self.x = end;
        Ok(unit)
    }

    fn invalid_escape(&self, start: usize, end: usize) -> ParseError {
        ParseError::InvalidEscape {
            text: String::from_utf8_lossy(&self.data[start..end]).into_owned(),
            offset: start,
        }
    }

    fn number(&mut self) -> Result<Value, ParseError> {
        let start = self.x;
        if self.byte() == Some(b'-') {
            self.x += 1;
        }
        match self.byte() {
            Some(b'0') => {
                self.x += 1;
                if self.byte().is_some_and(|b| b.is_ascii_digit()) {
                    return Err(ParseError::LeadingZero(start));
                }
            }
            Some(b'1'..=b'9') => self.digits(),
            _ => return Err(ParseError::BadNumber(self.x)),
        }
        let mut is_double = false;
        if self.byte() == Some(b'.') {
            self.x += 1;
            if !self.byte().is_some_and(|b| b.is_ascii_digit()) {
                return Err(ParseError::MissingFractionDigit(self.x));
            }
            self.digits();
            is_double = true;
        }
        if matches!(self.byte(), Some(b'e' | b'E')) {
            self.x += 1;
            if matches!(self.byte(), Some(b'+' | b'-')) {
                self.x += 1;
            }
            if !self.byte().is_some_and(|b| b.is_ascii_digit()) {
                return Err(ParseError::MissingExponentDigit(self.x));
            }
            self.digits();
            is_double = true;
        }
        // Only ASCII digits, signs, '.' and exponents were consumed.
        let text = std::str::from_utf8(&self.data[start..self.x])
            .map_err(|_| ParseError::BadNumber(start))?;
        if is_double {
            let d: f64 = text.parse().map_err(|_| ParseError::BadNumber(start))?;
            if d.is_infinite() || (d == 0.0 && has_nonzero_mantissa(text)) {
                return Err(ParseError::DoubleOutOfRange(text.to_owned()));
            }
            Ok(Value::Double(d))
        } else {
            text.parse::<i32>()
                .map(Value::Int)
                .map_err(|_| ParseError::IntOutOfRange(text.to_owned()))
        }
    }

    fn digits(&mut self) {
        while self.byte().is_some_and(|b| b.is_ascii_digit()) {
            self.x += 1;
        }
    }

    /// The byte under the cursor, without skipping whitespace.
    fn byte(&self) -> Option<u8> {
        self.data.get(self.x).copied()
    }

    fn object(&mut self) -> Result<Value, ParseError> {
        let start = self.x;
        self.x += 1;
        self.enter()?;
        let mut obj = Object::new();
        let mut first = true;
        loop {
            match self.peek() {
                None => return Err(ParseError::MissingObjectEnd(start)),
                Some(b'}') => {
                    self.x += 1;
                    break;
                }
                Some(b',') if !first => {
                    self.x += 1;
                    if self.peek().is_none() {
                        return Err(ParseError::MissingObjectEnd(start));
                    }
                }
                Some(_) if !first => return Err(ParseError::MissingObjectComma(self.x)),
                Some(_) => {}
            }
            if self.peek() != Some(b'"') {
                return Err(ParseError::NonStringKey(self.x));
            }
            let key = self.string()?;
            if self.peek() != Some(b':') {
                return Err(ParseError::MissingColon {
                    key,
                    offset: self.x,
                });
            }
            self.x += 1;
            if obj.contains_key(&key) {
                self.diagnostics.duplicate_key(&key);
            }
            let value = self.value()?;
            obj.insert(key, value);
            first = false;
        }
        self.depth -= 1;
        Ok(Value::Object(obj))
    }

    fn array(&mut self) -> Result<Value, ParseError> {
        let start = self.x;
        self.x += 1;
        self.enter()?;
        let mut arr = Array::new();
        loop {
            match self.peek() {
                None => return Err(ParseError::MissingArrayEnd(start)),
                Some(b']') => {
                    self.x += 1;
                    break;
                }
                Some(b',') if !arr.is_empty() => {
                    self.x += 1;
                    if self.peek().is_none() {
                        return Err(ParseError::MissingArrayEnd(start));
                    }
                }
                Some(_) if !arr.is_empty() => {
                    return Err(ParseError::MissingArrayComma(self.x))
                }
                Some(_) => {}
            }
            arr.push(self.value()?);
        }
        self.depth -= 1;
        Ok(Value::Array(arr))
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::DepthLimit(self.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    fn char_at(&self, offset: usize) -> char {
        let end = self.data.len().min(offset + 4);
        String::from_utf8_lossy(&self.data[offset..end])
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

/// True when the digits before any exponent are not all zero.
fn has_nonzero_mantissa(text: &str) -> bool {
    text.bytes()
        .take_while(|b| !matches!(b, b'e' | b'E'))
        .any(|b| matches!(b, b'1'..=b'9'))
}
