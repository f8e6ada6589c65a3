//! Scalar rendition of the table-driven parser
//!
//! Walks the same steps as the vector backends one lane at a time: shuffle by
//! the id's pattern, subtract `'0'` with saturation, multiply-add adjacent
//! lanes, fold the hundreds half onto the low half, clamp to a byte. Results
//! are bit-identical to the SIMD paths, which makes this the reference in
//! differential tests as well as the fallback on targets without SSSE3/NEON.

use crate::ParseError;
use crate::core::dotmask::{classify, lane_bits};
use crate::core::tables::{FIELD_COUNT, WEIGHTS, WINDOW_WIDTH, tables};

/// Parse the first `len` bytes of `window`.
pub fn parse_window(window: &[u8; WINDOW_WIDTH], len: usize) -> Result<u32, ParseError> {
    let (dot_bits, digit_bits) = lane_bits(window);
    let dotmask = classify(dot_bits, digit_bits, len)?;

    let tables = tables();
    let id = tables.id_for(dotmask).ok_or(ParseError::InvalidFormat)?;
    let pattern = tables.pattern(id);

    // pshufb semantics: high bit zeroes the lane, low nibble selects
    let mut digits = [0u8; WINDOW_WIDTH];
    for (digit, &index) in digits.iter_mut().zip(pattern) {
        let byte = if index < 0 {
            0
        } else {
            window[(index & 0x0F) as usize]
        };
        *digit = byte.saturating_sub(b'0');
    }

    let mut partial = [0u16; WINDOW_WIDTH / 2];
    for (lane, sum) in partial.iter_mut().enumerate() {
        let a = digits[lane * 2] as u16 * WEIGHTS[lane * 2] as u16;
        let b = digits[lane * 2 + 1] as u16 * WEIGHTS[lane * 2 + 1] as u16;
        *sum = a + b;
    }

    let mut octets = [0u8; FIELD_COUNT];
    for (field, octet) in octets.iter_mut().enumerate() {
        let value = partial[field] + partial[field + FIELD_COUNT];
        *octet = value.min(u8::MAX as u16) as u8;
    }

    Ok(u32::from_ne_bytes(octets))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<[u8; 4], ParseError> {
        let mut window = [0u8; WINDOW_WIDTH];
        window[..text.len()].copy_from_slice(text.as_bytes());
        parse_window(&window, text.len()).map(u32::to_ne_bytes)
    }

    #[test]
    fn test_scalar_basic() {
        assert_eq!(parse("192.168.1.1"), Ok([192, 168, 1, 1]));
        assert_eq!(parse("0.0.0.0"), Ok([0, 0, 0, 0]));
        assert_eq!(parse("255.255.255.255"), Ok([255, 255, 255, 255]));
        assert_eq!(parse("10.20.30.40"), Ok([10, 20, 30, 40]));
    }

    #[test]
    fn test_scalar_two_digit_fields_do_not_leak() {
        assert_eq!(parse("12.1.1.1"), Ok([12, 1, 1, 1]));
        assert_eq!(parse("1.1.99.1"), Ok([1, 1, 99, 1]));
    }

    #[test]
    fn test_scalar_saturates() {
        assert_eq!(parse("999.1.256.1"), Ok([255, 1, 255, 1]));
    }

    #[test]
    fn test_scalar_rejects() {
        assert_eq!(parse("1..2.3"), Err(ParseError::InvalidFormat));
        assert_eq!(parse("1.2.3"), Err(ParseError::InvalidFormat));
        assert_eq!(parse("1.2.3.4.5"), Err(ParseError::InvalidFormat));
        assert_eq!(parse("1.2.3.4."), Err(ParseError::InvalidFormat));
        assert_eq!(parse("1.2.3.1000"), Err(ParseError::InvalidFormat));
        assert_eq!(parse(""), Err(ParseError::InvalidFormat));
    }
}
