//! Whole-file messages and the options used to read them.

use std::io::Read;

use thiserror::Error;

use crate::{CborDecoder, CborError, PackValue};

/// Limits applied while decoding a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Maximum number of data items visited while decoding, `None` for no
    /// limit.
    pub traversal_limit: Option<usize>,
    /// Maximum depth of nested arrays, maps and tags. Applies even to
    /// [`ReaderOptions::unlimited`].
    pub nesting_limit: usize,
}

impl ReaderOptions {
    /// Default limit on visited data items.
    pub const DEFAULT_TRAVERSAL_LIMIT: usize = 64 * 1024 * 1024;
    /// Default limit on container depth.
    pub const DEFAULT_NESTING_LIMIT: usize = CborDecoder::DEFAULT_NESTING_LIMIT;

    /// Options that treat the input as trusted: no traversal limit. The
    /// nesting limit stays in place since it bounds stack use.
    pub fn unlimited() -> Self {
        Self {
            traversal_limit: None,
            nesting_limit: Self::DEFAULT_NESTING_LIMIT,
        }
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            traversal_limit: Some(Self::DEFAULT_TRAVERSAL_LIMIT),
            nesting_limit: Self::DEFAULT_NESTING_LIMIT,
        }
    }
}

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("failed to read message: {0}")]
    Io(#[from] std::io::Error),
    #[error("empty message")]
    Empty,
    #[error("malformed message: {0}")]
    Decode(#[from] CborError),
}

/// One decoded message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    root: PackValue,
}

impl Message {
    /// Decodes a message that must span all of `bytes`.
    pub fn from_bytes(bytes: &[u8], options: &ReaderOptions) -> Result<Self, MessageError> {
        if bytes.is_empty() {
            return Err(MessageError::Empty);
        }
        let root = CborDecoder::with_traversal_limit(options.traversal_limit)
            .with_nesting_limit(options.nesting_limit)
            .decode(bytes)?;
        Ok(Self { root })
    }

    /// The root data item, including its tag if it has one.
    pub fn root(&self) -> &PackValue {
        &self.root
    }

    /// Tag number of the root data item.
    pub fn root_tag(&self) -> Option<u64> {
        match &self.root {
            PackValue::Extension(ext) => Some(ext.tag),
            _ => None,
        }
    }

    /// The value inside the root tag, or the root itself when untagged.
    pub fn root_value(&self) -> &PackValue {
        match &self.root {
            PackValue::Extension(ext) => &ext.val,
            other => other,
        }
    }
}

/// Reads `input` to the end and decodes it as one message.
pub fn read_message<R: Read>(
    mut input: R,
    options: &ReaderOptions,
) -> Result<Message, MessageError> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    Message::from_bytes(&bytes, options)
}
