//! Decodes any MessagePack document into a [`WireValue`].

use adlib_buffers::Reader;

use super::constants::*;
use super::error::MsgPackError;
use super::wire::WireValue;

/// Default nesting limit for arrays and maps.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Complete MessagePack decoder.
///
/// Understands every format family of the MessagePack specification. A
/// document must consist of exactly one top-level object; truncated input,
/// the reserved byte `0xc1`, invalid UTF-8 in a `str` payload, trailing
/// bytes and nesting deeper than `max_depth` are reported as
/// [`MsgPackError`].
pub struct MsgPackDecoder {
    max_depth: usize,
}

impl Default for MsgPackDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackDecoder {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Decodes one complete document.
    pub fn decode(&self, data: &[u8]) -> Result<WireValue, MsgPackError> {
        let mut reader = Reader::new(data);
        let value = self.read_any(&mut reader, 0)?;
        if !reader.is_empty() {
            return Err(MsgPackError::ExtraBytes(reader.size()));
        }
        Ok(value)
    }

    /// Decodes the next object and leaves the reader positioned after it.
    ///
    /// Only container headers recurse; every other format is read by
    /// `read_scalar`, which keeps the recursive frame small.
    pub fn read_any(&self, reader: &mut Reader<'_>, depth: usize) -> Result<WireValue, MsgPackError> {
        let offset = reader.x;
        let byte = reader.u8()?;
        match byte {
            0x80..=0x8f => self.read_map(reader, (byte & 0x0f) as usize, depth),
            0x90..=0x9f => self.read_arr(reader, (byte & 0x0f) as usize, depth),
            ARRAY16 => {
                let size = reader.u16()? as usize;
                self.read_arr(reader, size, depth)
            }
            ARRAY32 => {
                let size = reader.u32()? as usize;
                self.read_arr(reader, size, depth)
            }
            MAP16 => {
                let size = reader.u16()? as usize;
                self.read_map(reader, size, depth)
            }
            MAP32 => {
                let size = reader.u32()? as usize;
                self.read_map(reader, size, depth)
            }
            _ => read_scalar(reader, byte, offset),
        }
    }

    fn read_arr(
        &self,
        reader: &mut Reader<'_>,
        size: usize,
        depth: usize,
    ) -> Result<WireValue, MsgPackError> {
        let depth = self.enter(depth)?;
        // Every element occupies at least one byte.
        let mut arr = Vec::with_capacity(size.min(reader.size()));
        for _ in 0..size {
            arr.push(self.read_any(reader, depth)?);
        }
        Ok(WireValue::Array(arr))
    }

    fn read_map(
        &self,
        reader: &mut Reader<'_>,
        size: usize,
        depth: usize,
    ) -> Result<WireValue, MsgPackError> {
        let depth = self.enter(depth)?;
        let mut pairs = Vec::with_capacity(size.min(reader.size() / 2));
        for _ in 0..size {
            let key = self.read_any(reader, depth)?;
            let val = self.read_any(reader, depth)?;
            pairs.push((key, val));
        }
        Ok(WireValue::Map(pairs))
    }

    fn enter(&self, depth: usize) -> Result<usize, MsgPackError> {
        if depth >= self.max_depth {
            return Err(MsgPackError::DepthLimit(self.max_depth));
        }
        Ok(depth + 1)
    }
}

/// Reads every non-container format whose marker `byte` sits at `offset`.
#[inline(never)]
fn read_scalar(reader: &mut Reader<'_>, byte: u8, offset: usize) -> Result<WireValue, MsgPackError> {
    let value = match byte {
        0x00..=0x7f => WireValue::PositiveInteger(byte as u64),
        0xa0..=0xbf => read_str(reader, (byte & 0x1f) as usize)?,
        0xe0..=0xff => WireValue::NegativeInteger(byte as i8 as i64),
        NIL => WireValue::Nil,
        FALSE => WireValue::Boolean(false),
        TRUE => WireValue::Boolean(true),
        BIN8 => {
            let size = reader.u8()? as usize;
            WireValue::Binary(reader.buf(size)?.to_vec())
        }
        BIN16 => {
            let size = reader.u16()? as usize;
            WireValue::Binary(reader.buf(size)?.to_vec())
        }
        BIN32 => {
            let size = reader.u32()? as usize;
            WireValue::Binary(reader.buf(size)?.to_vec())
        }
        EXT8 => {
            let size = reader.u8()? as usize;
            read_ext(reader, size)?
        }
        EXT16 => {
            let size = reader.u16()? as usize;
            read_ext(reader, size)?
        }
        EXT32 => {
            let size = reader.u32()? as usize;
            read_ext(reader, size)?
        }
        FLOAT32 => WireValue::Float32(reader.f32()?),
        FLOAT64 => WireValue::Float64(reader.f64()?),
        UINT8 => WireValue::PositiveInteger(reader.u8()? as u64),
        UINT16 => WireValue::PositiveInteger(reader.u16()? as u64),
        UINT32 => WireValue::PositiveInteger(reader.u32()? as u64),
        UINT64 => WireValue::PositiveInteger(reader.u64()?),
        INT8 => WireValue::integer(reader.i8()? as i64),
        INT16 => WireValue::integer(reader.i16()? as i64),
        INT32 => WireValue::integer(reader.i32()? as i64),
        INT64 => WireValue::integer(reader.i64()?),
        FIXEXT1 => read_ext(reader, 1)?,
        FIXEXT2 => read_ext(reader, 2)?,
        FIXEXT4 => read_ext(reader, 4)?,
        FIXEXT8 => read_ext(reader, 8)?,
        FIXEXT16 => read_ext(reader, 16)?,
        STR8 => {
            let size = reader.u8()? as usize;
            read_str(reader, size)?
        }
        STR16 => {
            let size = reader.u16()? as usize;
            read_str(reader, size)?
        }
        STR32 => {
            let size = reader.u32()? as usize;
            read_str(reader, size)?
        }
        // 0xc1 is reserved; container markers are consumed by `read_any`.
        NEVER_USED | 0x80..=0x9f | ARRAY16 | ARRAY32 | MAP16 | MAP32 => {
            return Err(MsgPackError::InvalidByte(byte, offset))
        }
    };
    Ok(value)
}

fn read_str(reader: &mut Reader<'_>, size: usize) -> Result<WireValue, MsgPackError> {
    Ok(WireValue::Str(reader.utf8(size)?.to_owned()))
}

fn read_ext(reader: &mut Reader<'_>, size: usize) -> Result<WireValue, MsgPackError> {
    let ext_type = reader.i8()?;
    let data = reader.buf(size)?.to_vec();
    Ok(WireValue::Extension { ext_type, data })
}
