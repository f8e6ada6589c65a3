//! Dot bitmask classification shared by every backend

use super::tables::WINDOW_WIDTH;
use crate::ParseError;

/// Longest address text that fits the window with room for the sentinel bit
pub const MAX_ADDRESS_LEN: usize = WINDOW_WIDTH - 1;

/// Turn per-lane classification bits into the table index for a parse.
///
/// `dot_bits` and `digit_bits` have bit `i` set when window byte `i` is `.` or
/// an ASCII digit. Bits at or beyond `len` are ignored; the bit at `len` is
/// set to terminate the last field.
#[inline(always)]
pub fn classify(dot_bits: u16, digit_bits: u16, len: usize) -> Result<u16, ParseError> {
    if len > MAX_ADDRESS_LEN {
        return Err(ParseError::InvalidFormat);
    }

    let end = 1u16 << len;
    let live = end - 1;

    if (dot_bits | digit_bits) & live != live {
        return Err(ParseError::InvalidFormat);
    }

    Ok((dot_bits & live) | end)
}

/// Scalar per-lane classification, returns `(dot_bits, digit_bits)`
pub fn lane_bits(window: &[u8; WINDOW_WIDTH]) -> (u16, u16) {
    let mut dots = 0u16;
    let mut digits = 0u16;
    for (i, &byte) in window.iter().enumerate() {
        dots |= ((byte == b'.') as u16) << i;
        digits |= (byte.is_ascii_digit() as u16) << i;
    }
    (dots, digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(text: &str) -> [u8; WINDOW_WIDTH] {
        let mut buf = [0u8; WINDOW_WIDTH];
        buf[..text.len()].copy_from_slice(text.as_bytes());
        buf
    }

    #[test]
    fn test_lane_bits() {
        let (dots, digits) = lane_bits(&window("1.22.3"));
        assert_eq!(dots, 0b01_0010);
        assert_eq!(digits, 0b10_1101);
    }

    #[test]
    fn test_sentinel_bit() {
        let (dots, digits) = lane_bits(&window("1.2.3.4"));
        assert_eq!(classify(dots, digits, 7), Ok(0b1010_1010));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let (dots, digits) = lane_bits(&window("1.2.3.4...x.."));
        assert_eq!(classify(dots, digits, 7), Ok(0b1010_1010));
    }

    #[test]
    fn test_foreign_character_rejected() {
        let (dots, digits) = lane_bits(&window("1.2.x.4"));
        assert_eq!(classify(dots, digits, 7), Err(ParseError::InvalidFormat));
    }

    #[test]
    fn test_length_limit() {
        let (dots, digits) = lane_bits(&window("111.111.111.111"));
        assert!(classify(dots, digits, MAX_ADDRESS_LEN).is_ok());
        assert_eq!(classify(dots, digits, 16), Err(ParseError::InvalidFormat));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(classify(0, 0, 0), Ok(1));
    }
}
