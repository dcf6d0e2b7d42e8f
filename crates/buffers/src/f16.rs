//! Half-precision (16-bit) float decoding.
//!
//! CBOR writers may shrink a cell to a half float when the value survives the
//! round trip (`0.5`, `1.0`, small integers), so the decoder must widen it
//! back without loss.

/// Widens the raw bits of an IEEE 754 half-precision float to `f64`.
///
/// Every half-precision value is exactly representable as `f64`, so the
/// result is exact; NaN payloads are not preserved.
///
/// ```
/// use rb_buffers::decode_f16;
///
/// assert_eq!(decode_f16(0x3C00), 1.0);
/// assert_eq!(decode_f16(0xC000), -2.0);
/// assert!(decode_f16(0x7C01).is_nan());
/// ```
pub fn decode_f16(binary: u16) -> f64 {
    let negative = binary & 0x8000 != 0;
    let exponent = i32::from((binary >> 10) & 0x1f);
    let mantissa = f64::from(binary & 0x03ff);

    let magnitude = match exponent {
        0 => mantissa * 2f64.powi(-24),
        0x1f if mantissa == 0.0 => f64::INFINITY,
        0x1f => return f64::NAN,
        _ => (1024.0 + mantissa) * 2f64.powi(exponent - 25),
    };

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_zeroes() {
        assert_eq!(decode_f16(0x0000), 0.0);
        assert!(decode_f16(0x8000).is_sign_negative());
    }

    #[test]
    fn normal_values() {
        assert_eq!(decode_f16(0x3C00), 1.0);
        assert_eq!(decode_f16(0x3800), 0.5);
        assert_eq!(decode_f16(0x4248), 3.140625);
        assert_eq!(decode_f16(0x7BFF), 65504.0);
    }

    #[test]
    fn smallest_subnormal() {
        assert_eq!(decode_f16(0x0001), 2f64.powi(-24));
    }

    #[test]
    fn infinities_and_nan() {
        assert_eq!(decode_f16(0x7C00), f64::INFINITY);
        assert_eq!(decode_f16(0xFC00), f64::NEG_INFINITY);
        assert!(decode_f16(0xFE00).is_nan());
    }
}
