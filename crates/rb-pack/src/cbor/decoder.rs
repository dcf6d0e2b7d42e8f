//! CBOR decoder producing [`PackValue`] trees.

use rb_buffers::{decode_f16, Reader};

use super::constants::*;
use super::CborError;
use crate::PackValue;

/// CBOR decoder.
///
/// Decodes every major type except big integers. The optional traversal
/// limit caps the number of data items visited in one decode; declared
/// lengths are never trusted beyond the bytes actually present. Arrays,
/// maps and tags may nest at most `nesting_limit` levels deep.
#[derive(Debug, Clone)]
pub struct CborDecoder {
    traversal_limit: Option<usize>,
    nesting_limit: usize,
}

impl Default for CborDecoder {
    fn default() -> Self {
        Self {
            traversal_limit: None,
            nesting_limit: Self::DEFAULT_NESTING_LIMIT,
        }
    }
}

impl CborDecoder {
    pub const DEFAULT_NESTING_LIMIT: usize = 64;

    /// A decoder without a traversal limit.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_traversal_limit(limit: Option<usize>) -> Self {
        Self {
            traversal_limit: limit,
            ..Self::default()
        }
    }

    pub fn with_nesting_limit(mut self, limit: usize) -> Self {
        self.nesting_limit = limit;
        self
    }

    /// Decodes exactly one data item spanning the whole input.
    pub fn decode(&self, data: &[u8]) -> Result<PackValue, CborError> {
        let (value, consumed) = self.decode_with_consumed(data)?;
        if consumed != data.len() {
            return Err(CborError::TrailingBytes(data.len() - consumed));
        }
        Ok(value)
    }

    /// Decodes one data item from the front of the input and returns it with
    /// the number of bytes it occupied.
    pub fn decode_with_consumed(&self, data: &[u8]) -> Result<(PackValue, usize), CborError> {
        let mut cursor = Cursor {
            reader: Reader::new(data),
            visited: 0,
            limit: self.traversal_limit,
            depth: 0,
            nesting_limit: self.nesting_limit,
        };
        let value = cursor.read_any()?;
        Ok((value, cursor.reader.x))
    }
}

struct Cursor<'a> {
    reader: Reader<'a>,
    visited: usize,
    limit: Option<usize>,
    depth: usize,
    nesting_limit: usize,
}

impl Cursor<'_> {
    fn visit(&mut self) -> Result<(), CborError> {
        self.visited += 1;
        match self.limit {
            Some(limit) if self.visited > limit => Err(CborError::TraversalLimit(limit)),
            _ => Ok(()),
        }
    }

    /// Runs `read` one container level deeper.
    fn nested(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<PackValue, CborError>,
    ) -> Result<PackValue, CborError> {
        if self.depth >= self.nesting_limit {
            return Err(CborError::NestingLimit(self.nesting_limit));
        }
        self.depth += 1;
        let value = read(self);
        self.depth -= 1;
        value
    }

    fn read_any(&mut self) -> Result<PackValue, CborError> {
        self.visit()?;
        let octet = self.reader.u8()?;
        let major = octet >> 5;
        let minor = octet & MINOR_MASK;
        match major {
            MAJOR_UIN => {
                let uint = self.read_arg(minor)?;
                Ok(match i64::try_from(uint) {
                    Ok(int) => PackValue::Integer(int),
                    Err(_) => PackValue::UInteger(uint),
                })
            }
            MAJOR_NIN => {
                let uint = self.read_arg(minor)?;
                let int = i64::try_from(uint).map_err(|_| CborError::IntegerOverflow)?;
                Ok(PackValue::Integer(-1 - int))
            }
            MAJOR_BIN => Ok(PackValue::Bytes(self.read_bin(minor)?)),
            MAJOR_STR => Ok(PackValue::Str(self.read_str(minor)?)),
            MAJOR_ARR => self.nested(|cursor| cursor.read_arr(minor)),
            MAJOR_MAP => self.nested(|cursor| cursor.read_obj(minor)),
            MAJOR_TAG => {
                let tag = self.read_arg(minor)?;
                let val = self.nested(Self::read_any)?;
                Ok(PackValue::tagged(tag, val))
            }
            _ => self.read_token(minor),
        }
    }

    /// Reads the argument that follows an initial byte.
    fn read_arg(&mut self, minor: u8) -> Result<u64, CborError> {
        match minor {
            0..=23 => Ok(u64::from(minor)),
            MINOR_U8 => Ok(u64::from(self.reader.u8()?)),
            MINOR_U16 => Ok(u64::from(self.reader.u16()?)),
            MINOR_U32 => Ok(u64::from(self.reader.u32()?)),
            MINOR_U64 => Ok(self.reader.u64()?),
            _ => Err(CborError::UnexpectedMinor(minor)),
        }
    }

    /// Reads a definite length, or `None` for an indefinite-length item.
    ///
    /// Every element takes at least one byte, so a length larger than the
    /// remaining input is rejected before anything is allocated for it.
    fn read_len(&mut self, minor: u8) -> Result<Option<usize>, CborError> {
        if minor == MINOR_INDEFINITE {
            return Ok(None);
        }
        let length = self.read_arg(minor)?;
        match usize::try_from(length) {
            Ok(len) if len <= self.reader.size() => Ok(Some(len)),
            _ => Err(CborError::InvalidSize(length)),
        }
    }

    /// Consumes the break code if it is next.
    fn at_break(&mut self) -> Result<bool, CborError> {
        if self.reader.peek()? == CBOR_END {
            self.reader.x += 1;
            return Ok(true);
        }
        Ok(false)
    }

    fn read_bin(&mut self, minor: u8) -> Result<Vec<u8>, CborError> {
        match self.read_len(minor)? {
            Some(len) => Ok(self.reader.buf(len)?.to_vec()),
            None => {
                let mut out = Vec::new();
                while !self.at_break()? {
                    let octet = self.reader.u8()?;
                    if octet >> 5 != MAJOR_BIN || octet & MINOR_MASK == MINOR_INDEFINITE {
                        return Err(CborError::UnexpectedBinChunkMajor);
                    }
                    out.extend_from_slice(&self.read_bin(octet & MINOR_MASK)?);
                }
                Ok(out)
            }
        }
    }

    fn read_str(&mut self, minor: u8) -> Result<String, CborError> {
        match self.read_len(minor)? {
            Some(len) => Ok(self.reader.utf8(len)?.to_owned()),
            None => {
                let mut out = String::new();
                while !self.at_break()? {
                    let octet = self.reader.u8()?;
                    if octet >> 5 != MAJOR_STR || octet & MINOR_MASK == MINOR_INDEFINITE {
                        return Err(CborError::UnexpectedStrChunkMajor);
                    }
                    out.push_str(&self.read_str(octet & MINOR_MASK)?);
                }
                Ok(out)
            }
        }
    }

    fn read_arr(&mut self, minor: u8) -> Result<PackValue, CborError> {
        let mut items = Vec::new();
        match self.read_len(minor)? {
            Some(len) => {
                items.reserve(len);
                for _ in 0..len {
                    items.push(self.read_any()?);
                }
            }
            None => {
                while !self.at_break()? {
                    items.push(self.read_any()?);
                }
            }
        }
        Ok(PackValue::Array(items))
    }

    fn read_obj(&mut self, minor: u8) -> Result<PackValue, CborError> {
        let mut fields = Vec::new();
        match self.read_len(minor)? {
            Some(len) => {
                fields.reserve(len);
                for _ in 0..len {
                    fields.push(self.read_field()?);
                }
            }
            None => {
                while !self.at_break()? {
                    fields.push(self.read_field()?);
                }
            }
        }
        Ok(PackValue::Object(fields))
    }

    fn read_field(&mut self) -> Result<(String, PackValue), CborError> {
        self.visit()?;
        let octet = self.reader.u8()?;
        if octet >> 5 != MAJOR_STR {
            return Err(CborError::UnexpectedObjKey(octet >> 5));
        }
        let key = self.read_str(octet & MINOR_MASK)?;
        let value = self.read_any()?;
        Ok((key, value))
    }

    fn read_token(&mut self, minor: u8) -> Result<PackValue, CborError> {
        match minor {
            TKN_FALSE => Ok(PackValue::Bool(false)),
            TKN_TRUE => Ok(PackValue::Bool(true)),
            TKN_NULL => Ok(PackValue::Null),
            TKN_UNDEFINED => Ok(PackValue::Undefined),
            TKN_F16 => Ok(PackValue::Float(decode_f16(self.reader.u16()?))),
            TKN_F32 => Ok(PackValue::Float(f64::from(self.reader.f32()?))),
            TKN_F64 => Ok(PackValue::Float(self.reader.f64()?)),
            MINOR_INDEFINITE => Err(CborError::UnexpectedBreak),
            _ => Err(CborError::Unsupported("simple value")),
        }
    }
}
