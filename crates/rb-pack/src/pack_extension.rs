//! [`PackExtension`]: a CBOR tag wrapped around a nested value.

use crate::PackValue;

/// A CBOR semantic tag (major type 6) and the value it annotates.
///
/// Model files tag their root record with a schema id; the decoder keeps the
/// tag here so the caller can check it before interpreting the record.
#[derive(Debug, Clone, PartialEq)]
pub struct PackExtension {
    pub tag: u64,
    pub val: Box<PackValue>,
}

impl PackExtension {
    pub fn new(tag: u64, val: PackValue) -> Self {
        Self {
            tag,
            val: Box::new(val),
        }
    }
}
