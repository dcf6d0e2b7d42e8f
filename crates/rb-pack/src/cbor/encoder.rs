//! `CborEncoder` writes [`PackValue`] trees as CBOR.

use rb_buffers::Writer;

use super::constants::*;
use crate::PackValue;

/// CBOR encoder.
///
/// Integers use the shortest header, floats are always written as 64-bit so
/// that every cell reads back bit-exact, containers are definite-length.
pub struct CborEncoder {
    pub writer: Writer,
}

impl Default for CborEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CborEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Encode a value and return the CBOR bytes.
    pub fn encode(&mut self, value: &PackValue) -> Vec<u8> {
        self.writer.reset();
        self.write_any(value);
        self.writer.flush()
    }

    pub fn write_any(&mut self, value: &PackValue) {
        match value {
            PackValue::Null => self.write_null(),
            PackValue::Undefined => self.write_undef(),
            PackValue::Bool(b) => self.write_boolean(*b),
            PackValue::Integer(i) => self.write_integer(*i),
            PackValue::UInteger(u) => self.write_u_integer(*u),
            PackValue::Float(f) => self.write_float(*f),
            PackValue::Bytes(b) => self.write_bin(b),
            PackValue::Str(s) => self.write_str(s),
            PackValue::Array(arr) => self.write_arr(arr),
            PackValue::Object(obj) => self.write_obj(obj),
            PackValue::Extension(ext) => self.write_tag(ext.tag, &ext.val),
        }
    }

    pub fn write_null(&mut self) {
        self.writer.u8(OVERLAY_TKN | TKN_NULL);
    }

    pub fn write_undef(&mut self) {
        self.writer.u8(OVERLAY_TKN | TKN_UNDEFINED);
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer
            .u8(OVERLAY_TKN | if b { TKN_TRUE } else { TKN_FALSE });
    }

    /// Writes a major-type header with the shortest argument encoding.
    fn write_hdr(&mut self, overlay: u8, arg: u64) {
        let w = &mut self.writer;
        if arg <= 23 {
            w.u8(overlay | arg as u8);
        } else if arg <= 0xff {
            w.u8(overlay | MINOR_U8);
            w.u8(arg as u8);
        } else if arg <= 0xffff {
            w.u8(overlay | MINOR_U16);
            w.u16(arg as u16);
        } else if arg <= 0xffff_ffff {
            w.u8(overlay | MINOR_U32);
            w.u32(arg as u32);
        } else {
            w.u8u64(overlay | MINOR_U64, arg);
        }
    }

    pub fn write_integer(&mut self, int: i64) {
        if int >= 0 {
            self.write_u_integer(int as u64);
        } else {
            self.encode_nint(int);
        }
    }

    pub fn write_u_integer(&mut self, uint: u64) {
        self.write_hdr(OVERLAY_UIN, uint);
    }

    pub fn encode_nint(&mut self, int: i64) {
        let uint = (-1i64).wrapping_sub(int) as u64;
        self.write_hdr(OVERLAY_NIN, uint);
    }

    pub fn write_float(&mut self, float: f64) {
        self.writer.u8f64(OVERLAY_TKN | TKN_F64, float);
    }

    pub fn write_bin(&mut self, buf: &[u8]) {
        self.write_hdr(OVERLAY_BIN, buf.len() as u64);
        self.writer.buf(buf);
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_hdr(OVERLAY_STR, s.len() as u64);
        self.writer.utf8(s);
    }

    pub fn write_arr(&mut self, arr: &[PackValue]) {
        self.write_hdr(OVERLAY_ARR, arr.len() as u64);
        for item in arr {
            self.write_any(item);
        }
    }

    pub fn write_obj(&mut self, obj: &[(String, PackValue)]) {
        self.write_hdr(OVERLAY_MAP, obj.len() as u64);
        for (key, value) in obj {
            self.write_str(key);
            self.write_any(value);
        }
    }

    pub fn write_tag(&mut self, tag: u64, value: &PackValue) {
        self.write_hdr(OVERLAY_TAG, tag);
        self.write_any(value);
    }
}
