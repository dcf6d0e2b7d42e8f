//! CBOR (RFC 8949) decoding and encoding of [`PackValue`](crate::PackValue)
//! trees.

pub mod constants;
mod decoder;
mod encoder;
mod error;

pub use decoder::CborDecoder;
pub use encoder::CborEncoder;
pub use error::CborError;
