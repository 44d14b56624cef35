//! Writes MessagePack using the most compact format.

use adlib_buffers::Writer;

use super::constants::*;
use super::wire::WireValue;

/// MessagePack encoder.
///
/// The `write_*` methods append one object (or a container header) to the
/// internal [`Writer`]; [`MsgPackEncoder::flush`] takes the bytes. Integers,
/// strings, binaries and container headers always use the smallest format
/// that fits. Lengths are written as MessagePack's 32-bit maximum, so
/// payloads longer than `u32::MAX` bytes cannot be represented.
pub struct MsgPackEncoder {
    pub writer: Writer,
}

impl Default for MsgPackEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    pub fn with_writer(writer: Writer) -> Self {
        Self { writer }
    }

    /// Encode a wire tree and return the bytes.
    pub fn encode(&mut self, value: &WireValue) -> Vec<u8> {
        self.writer.reset();
        self.write_any(value);
        self.writer.flush()
    }

    pub fn flush(&mut self) -> Vec<u8> {
        self.writer.flush()
    }

    pub fn write_any(&mut self, value: &WireValue) {
        match value {
            WireValue::Nil => self.write_nil(),
            WireValue::Boolean(b) => self.write_boolean(*b),
            WireValue::PositiveInteger(u) => self.write_u_integer(*u),
            WireValue::NegativeInteger(i) => self.write_integer(*i),
            WireValue::Float32(f) => self.write_float32(*f),
            WireValue::Float64(f) => self.write_float(*f),
            WireValue::Str(s) => self.write_str(s),
            WireValue::Binary(b) => self.write_bin(b),
            WireValue::Array(arr) => {
                self.write_arr_hdr(arr.len());
                for item in arr {
                    self.write_any(item);
                }
            }
            WireValue::Map(pairs) => {
                self.write_obj_hdr(pairs.len());
                for (key, val) in pairs {
                    self.write_any(key);
                    self.write_any(val);
                }
            }
            WireValue::Extension { ext_type, data } => self.write_ext(*ext_type, data),
        }
    }

    pub fn write_nil(&mut self) {
        self.writer.u8(NIL);
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.u8(if b { TRUE } else { FALSE });
    }

    pub fn write_integer(&mut self, int: i64) {
        if int >= 0 {
            self.write_u_integer(int as u64);
        } else if int >= -32 {
            // negative fixint
            self.writer.u8(int as i8 as u8);
        } else if int >= i8::MIN as i64 {
            self.writer.u8u8(INT8, int as i8 as u8);
        } else if int >= i16::MIN as i64 {
            self.writer.u8u16(INT16, int as i16 as u16);
        } else if int >= i32::MIN as i64 {
            self.writer.u8u32(INT32, int as i32 as u32);
        } else {
            self.writer.u8u64(INT64, int as u64);
        }
    }

    pub fn write_u_integer(&mut self, uint: u64) {
        if uint <= 0x7f {
            self.writer.u8(uint as u8);
        } else if uint <= 0xff {
            self.writer.u8u8(UINT8, uint as u8);
        } else if uint <= 0xffff {
            self.writer.u8u16(UINT16, uint as u16);
        } else if uint <= 0xffff_ffff {
            self.writer.u8u32(UINT32, uint as u32);
        } else {
            self.writer.u8u64(UINT64, uint);
        }
    }

    pub fn write_float(&mut self, float: f64) {
        self.writer.u8f64(FLOAT64, float);
    }

    pub fn write_float32(&mut self, float: f32) {
        self.writer.u8u32(FLOAT32, float.to_bits());
    }

    pub fn write_str(&mut self, s: &str) {
        let len = s.len();
        if len <= 31 {
            self.writer.u8(FIXSTR | len as u8);
        } else if len <= 0xff {
            self.writer.u8u8(STR8, len as u8);
        } else if len <= 0xffff {
            self.writer.u8u16(STR16, len as u16);
        } else {
            self.writer.u8u32(STR32, len as u32);
        }
        self.writer.utf8(s);
    }

    pub fn write_bin(&mut self, buf: &[u8]) {
        let len = buf.len();
        if len <= 0xff {
            self.writer.u8u8(BIN8, len as u8);
        } else if len <= 0xffff {
            self.writer.u8u16(BIN16, len as u16);
        } else {
            self.writer.u8u32(BIN32, len as u32);
        }
        self.writer.buf(buf);
    }

    pub fn write_ext(&mut self, ext_type: i8, data: &[u8]) {
        let len = data.len();
        match len {
            1 => self.writer.u8(FIXEXT1),
            2 => self.writer.u8(FIXEXT2),
            4 => self.writer.u8(FIXEXT4),
            8 => self.writer.u8(FIXEXT8),
            16 => self.writer.u8(FIXEXT16),
            _ if len <= 0xff => self.writer.u8u8(EXT8, len as u8),
            _ if len <= 0xffff => self.writer.u8u16(EXT16, len as u16),
            _ => self.writer.u8u32(EXT32, len as u32),
        }
        self.writer.u8(ext_type as u8);
        self.writer.buf(data);
    }

    pub fn write_arr_hdr(&mut self, length: usize) {
        if length <= 15 {
            self.writer.u8(FIXARRAY | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(ARRAY16, length as u16);
        } else {
            self.writer.u8u32(ARRAY32, length as u32);
        }
    }

    pub fn write_obj_hdr(&mut self, length: usize) {
        if length <= 15 {
            self.writer.u8(FIXMAP | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(MAP16, length as u16);
        } else {
            self.writer.u8u32(MAP32, length as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoder_primitives() {
        let mut enc = MsgPackEncoder::new();
        // null = 0xc0
        assert_eq!(enc.encode(&WireValue::Nil), vec![0xc0]);
        // true = 0xc3, false = 0xc2
        assert_eq!(enc.encode(&WireValue::Boolean(true)), vec![0xc3]);
        assert_eq!(enc.encode(&WireValue::Boolean(false)), vec![0xc2]);
        // positive fixint
        assert_eq!(enc.encode(&WireValue::PositiveInteger(0)), vec![0x00]);
        assert_eq!(enc.encode(&WireValue::PositiveInteger(127)), vec![0x7f]);
        // negative fixint
        assert_eq!(enc.encode(&WireValue::NegativeInteger(-1)), vec![0xff]);
        assert_eq!(enc.encode(&WireValue::NegativeInteger(-32)), vec![0xe0]);
    }

    #[test]
    fn encoder_integer_widths() {
        let mut enc = MsgPackEncoder::new();
        assert_eq!(enc.encode(&WireValue::PositiveInteger(128)), vec![0xcc, 0x80]);
        assert_eq!(
            enc.encode(&WireValue::PositiveInteger(1000)),
            vec![0xcd, 0x03, 0xe8]
        );
        assert_eq!(
            enc.encode(&WireValue::PositiveInteger(70_000)),
            vec![0xce, 0x00, 0x01, 0x11, 0x70]
        );
        assert_eq!(enc.encode(&WireValue::NegativeInteger(-33)), vec![0xd0, 0xdf]);
        assert_eq!(
            enc.encode(&WireValue::NegativeInteger(-1000)),
            vec![0xd1, 0xfc, 0x18]
        );
        assert_eq!(
            enc.encode(&WireValue::NegativeInteger(i32::MIN as i64)),
            vec![0xd2, 0x80, 0x00, 0x00, 0x00]
        );
        assert_eq!(enc.encode(&WireValue::NegativeInteger(i64::MIN))[0], 0xd3);
    }

    #[test]
    fn encoder_string_headers() {
        let mut enc = MsgPackEncoder::new();
        let out = enc.encode(&WireValue::Str("hello".into()));
        // fixstr: 0xa0 | 5 = 0xa5, then 5 bytes
        assert_eq!(out[0], 0xa5);
        assert_eq!(&out[1..], b"hello");
        let out = enc.encode(&WireValue::Str("x".repeat(32)));
        assert_eq!(&out[..2], &[0xd9, 32]);
        let out = enc.encode(&WireValue::Str("x".repeat(300)));
        assert_eq!(&out[..3], &[0xda, 0x01, 0x2c]);
    }

    #[test]
    fn encoder_containers() {
        let mut enc = MsgPackEncoder::new();
        let arr = WireValue::Array(vec![WireValue::Nil, WireValue::PositiveInteger(1)]);
        assert_eq!(enc.encode(&arr), vec![0x92, 0xc0, 0x01]);
        let map = WireValue::Map(vec![(
            WireValue::Str("a".into()),
            WireValue::PositiveInteger(1),
        )]);
        assert_eq!(enc.encode(&map), vec![0x81, 0xa1, b'a', 0x01]);
        let long = WireValue::Array(vec![WireValue::Nil; 16]);
        // 16 items → array16 (0xdc) header
        assert_eq!(&enc.encode(&long)[..3], &[0xdc, 0x00, 0x10]);
    }

    #[test]
    fn encoder_bin_and_ext() {
        let mut enc = MsgPackEncoder::new();
        assert_eq!(
            enc.encode(&WireValue::Binary(vec![1, 2, 3])),
            vec![0xc4, 3, 1, 2, 3]
        );
        assert_eq!(
            enc.encode(&WireValue::Extension {
                ext_type: 7,
                data: vec![9, 9]
            }),
            vec![0xd5, 7, 9, 9]
        );
        assert_eq!(
            enc.encode(&WireValue::Extension {
                ext_type: -2,
                data: vec![1, 2, 3]
            }),
            vec![0xc7, 3, 0xfe, 1, 2, 3]
        );
    }
}
