//! Auto-growing binary buffer writer.

/// Writes big-endian binary data into an internal buffer that grows on
/// demand.
///
/// # Example
///
/// ```
/// use rb_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8u64(0x1b, 1);
/// assert_eq!(writer.flush(), vec![0x1b, 0, 0, 0, 0, 0, 0, 0, 1]);
/// ```
#[derive(Debug, Default)]
pub struct Writer {
    /// Written bytes.
    pub uint8: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self { uint8: Vec::new() }
    }

    /// Discards everything written so far.
    pub fn reset(&mut self) {
        self.uint8.clear();
    }

    /// Returns the written bytes and resets the writer.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.uint8.push(val);
    }

    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn f32(&mut self, val: f32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a one-byte header followed by a 64-bit integer.
    pub fn u8u64(&mut self, head: u8, val: u64) {
        self.u8(head);
        self.u64(val);
    }

    /// Writes a one-byte header followed by a 64-bit float.
    pub fn u8f64(&mut self, head: u8, val: f64) {
        self.u8(head);
        self.f64(val);
    }

    pub fn buf(&mut self, data: &[u8]) {
        self.uint8.extend_from_slice(data);
    }

    pub fn utf8(&mut self, s: &str) {
        self.uint8.extend_from_slice(s.as_bytes());
    }
}
