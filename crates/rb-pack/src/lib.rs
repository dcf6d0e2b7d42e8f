//! Self-describing binary message codec for rb-data model files.
//!
//! A model file holds exactly one CBOR (RFC 8949) data item. The decoder
//! turns it into a [`PackValue`] tree; [`Message`] wraps the decoded root and
//! exposes its schema tag. [`cbor::CborEncoder`] writes the same trees back
//! out and is what the test suites use to build fixtures.

mod message;
mod pack_extension;
mod pack_value;

pub mod cbor;

pub use cbor::{CborDecoder, CborEncoder, CborError};
pub use message::{read_message, Message, MessageError, ReaderOptions};
pub use pack_extension::PackExtension;
pub use pack_value::PackValue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_record_roundtrip() {
        let value = PackValue::tagged(
            7,
            PackValue::object([
                ("nBfs", PackValue::from(3u64)),
                ("deltaT", PackValue::Float(0.01)),
            ]),
        );
        let bin = CborEncoder::new().encode(&value);
        let message = Message::from_bytes(&bin, &ReaderOptions::unlimited()).unwrap();
        assert_eq!(message.root_tag(), Some(7));
        assert_eq!(message.root(), &value);
    }

    #[test]
    fn small_unsigned_integers_decode_canonically() {
        let bin = CborEncoder::new().encode(&PackValue::UInteger(3));
        let message = Message::from_bytes(&bin, &ReaderOptions::unlimited()).unwrap();
        assert_eq!(message.root(), &PackValue::Integer(3));
        assert_eq!(message.root().as_u64(), Some(3));
    }
}
