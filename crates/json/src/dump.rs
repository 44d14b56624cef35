//! Compact JSON text and MessagePack serialization of [`Value`].

use adlib_msgpack::MsgPackEncoder;

use crate::value::Value;

impl Value {
    /// Compact JSON text, no inserted whitespace. Object members appear in
    /// key order.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_to(&mut out);
        out
    }

    /// Appends the compact JSON text of `self` to `out`.
    pub fn dump_to(&self, out: &mut String) {
        match self {
            Value::Null => out.push_str("null"),
            Value::Bool(true) => out.push_str("true"),
            Value::Bool(false) => out.push_str("false"),
            Value::Int(n) => out.push_str(&n.to_string()),
            Value::Double(d) => write_double(*d, out),
            Value::String(s) => write_str(s, out),
            Value::Array(arr) => {
                out.push('[');
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.dump_to(out);
                }
                out.push(']');
            }
            Value::Object(obj) => {
                out.push('{');
                for (i, (key, val)) in obj.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write_str(key, out);
                    out.push(':');
                    val.dump_to(out);
                }
                out.push('}');
            }
        }
    }

    pub fn dump_msgpack(&self) -> Vec<u8> {
        let mut encoder = MsgPackEncoder::new();
        self.dump_msgpack_to(&mut encoder);
        encoder.flush()
    }

    /// Writes `self` through `encoder` without flushing it.
    pub fn dump_msgpack_to(&self, encoder: &mut MsgPackEncoder) {
        match self {
            Value::Null => encoder.write_nil(),
            Value::Bool(b) => encoder.write_boolean(*b),
            Value::Int(n) => encoder.write_integer(i64::from(*n)),
            Value::Double(d) => encoder.write_float(*d),
            Value::String(s) => encoder.write_str(s),
            Value::Array(arr) => {
                encoder.write_arr_hdr(arr.len());
                for item in arr {
                    item.dump_msgpack_to(encoder);
                }
            }
            Value::Object(obj) => {
                encoder.write_obj_hdr(obj.len());
                for (key, val) in obj {
                    encoder.write_str(key);
                    val.dump_msgpack_to(encoder);
                }
            }
        }
    }
}

/// `{:?}` is the shortest round-trip representation and always carries a
/// `.` or an exponent, so the text re-parses as a double. JSON has no
/// spelling for NaN or infinities.
fn write_double(d: f64, out: &mut String) {
    if d.is_finite() {
        out.push_str(&format!("{d:?}"));
    } else {
        out.push_str("null");
    }
}

fn write_str(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < ' ' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}
