//! Auto-growing binary buffer writer.

/// A binary buffer writer that appends big-endian data to a growable buffer.
///
/// Call [`Writer::flush`] to take the bytes written since the last flush.
///
/// # Example
///
/// ```
/// use adlib_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8u16(0xcd, 1000);
/// assert_eq!(writer.flush(), vec![0xcd, 0x03, 0xe8]);
/// assert!(writer.flush().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Writer {
    /// The underlying buffer.
    pub uint8: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self { uint8: Vec::new() }
    }

    /// Creates a writer with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written since the last flush.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    /// Returns `true` if nothing has been written since the last flush.
    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    /// Discards everything written so far.
    pub fn reset(&mut self) {
        self.uint8.clear();
    }

    /// Takes the written bytes, leaving the writer empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.uint8.push(val);
    }

    /// Writes an unsigned 16-bit integer (big-endian).
    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes an unsigned 32-bit integer (big-endian).
    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes an unsigned 64-bit integer (big-endian).
    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a 64-bit float (big-endian).
    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a one-byte header followed by an unsigned 8-bit payload.
    #[inline]
    pub fn u8u8(&mut self, head: u8, val: u8) {
        self.uint8.extend_from_slice(&[head, val]);
    }

    /// Writes a one-byte header followed by a big-endian u16 payload.
    #[inline]
    pub fn u8u16(&mut self, head: u8, val: u16) {
        self.u8(head);
        self.u16(val);
    }

    /// Writes a one-byte header followed by a big-endian u32 payload.
    #[inline]
    pub fn u8u32(&mut self, head: u8, val: u32) {
        self.u8(head);
        self.u32(val);
    }

    /// Writes a one-byte header followed by a big-endian u64 payload.
    #[inline]
    pub fn u8u64(&mut self, head: u8, val: u64) {
        self.u8(head);
        self.u64(val);
    }

    /// Writes a one-byte header followed by a big-endian f64 payload.
    #[inline]
    pub fn u8f64(&mut self, head: u8, val: f64) {
        self.u8(head);
        self.f64(val);
    }

    /// Writes raw bytes.
    pub fn buf(&mut self, data: &[u8]) {
        self.uint8.extend_from_slice(data);
    }

    /// Writes the UTF-8 bytes of a string.
    pub fn utf8(&mut self, s: &str) {
        self.uint8.extend_from_slice(s.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_big_endian() {
        let mut writer = Writer::new();
        writer.u16(0x0102);
        writer.u32(0x03040506);
        assert_eq!(writer.flush(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn header_helpers() {
        let mut writer = Writer::with_capacity(16);
        writer.u8u8(0xcc, 0xff);
        writer.u8u32(0xce, 1);
        writer.u8f64(0xcb, 1.5);
        let out = writer.flush();
        assert_eq!(&out[..2], &[0xcc, 0xff]);
        assert_eq!(&out[2..7], &[0xce, 0, 0, 0, 1]);
        assert_eq!(out[7], 0xcb);
        assert_eq!(&out[8..], &1.5f64.to_be_bytes());
    }

    #[test]
    fn reset_discards() {
        let mut writer = Writer::new();
        writer.utf8("abc");
        assert_eq!(writer.len(), 3);
        writer.reset();
        assert!(writer.is_empty());
    }
}
