use rb_buffers::BufferError;
use thiserror::Error;

/// Error type for CBOR decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CborError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid UTF-8 in text string")]
    InvalidUtf8,
    #[error("unsupported cbor feature: {0}")]
    Unsupported(&'static str),
    #[error("unexpected minor value {0}")]
    UnexpectedMinor(u8),
    #[error("unexpected binary chunk major type")]
    UnexpectedBinChunkMajor,
    #[error("unexpected string chunk major type")]
    UnexpectedStrChunkMajor,
    #[error("object keys must be text strings, found major type {0}")]
    UnexpectedObjKey(u8),
    #[error("unexpected break code")]
    UnexpectedBreak,
    #[error("declared length {0} exceeds the remaining input")]
    InvalidSize(u64),
    #[error("negative integer out of range")]
    IntegerOverflow,
    #[error("traversal limit of {0} values exceeded")]
    TraversalLimit(usize),
    #[error("nesting limit of {0} levels exceeded")]
    NestingLimit(usize),
    #[error("{0} trailing bytes after the root value")]
    TrailingBytes(usize),
}

impl From<BufferError> for CborError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => CborError::UnexpectedEof,
            BufferError::InvalidUtf8 => CborError::InvalidUtf8,
        }
    }
}
