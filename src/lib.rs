//! Vectorized IPv4 dotted-decimal parser.
//!
//! An address of up to 15 characters is parsed with one 16-byte load: the dot
//! positions form a 16-bit mask, the mask selects a precomputed shuffle that
//! lines the digits up in fixed lanes, and a multiply-add against 1/10/100
//! weights produces all four octets at once.
//!
//! ```
//! let address = dotquad::parse_str("192.168.1.1").unwrap();
//! assert_eq!(dotquad::octets(address), [192, 168, 1, 1]);
//!
//! assert!(dotquad::parse_str("1..2.3").is_err());
//! ```
//!
//! Fields are only checked for length, so `"999.0.0.1"` parses with the first
//! octet clamped to 255.

pub mod bench;
pub mod core;
mod error;
pub mod prelude;
pub mod scalar;
#[cfg(feature = "simd")]
pub mod simd;

pub use crate::core::dotmask::MAX_ADDRESS_LEN;
pub use crate::core::tables::{DotmaskTables, ShufflePattern, WINDOW_WIDTH, tables};
pub use error::ParseError;

use std::net::Ipv4Addr;

/// Parse the first `len` bytes of a 16-byte window.
///
/// Bytes at or beyond `len` are read but never affect the result. The
/// returned value holds field `i` in byte `i` of its native-endian
/// representation; use [`octets`] to get them back.
pub fn parse_window(window: &[u8; WINDOW_WIDTH], len: usize) -> Result<u32, ParseError> {
    #[cfg(feature = "simd")]
    if let Some(result) = simd::parse_with_simd(window, len) {
        return result;
    }

    scalar::parse_window(window, len)
}

/// Parse `len` bytes at the start of `buf`.
///
/// When `buf` has at least 16 readable bytes they are loaded in place, which
/// is the cheap path for tokens inside a larger line buffer. Shorter buffers
/// are copied into a zero-padded window.
pub fn parse_padded(buf: &[u8], len: usize) -> Result<u32, ParseError> {
    if len > buf.len() || len > MAX_ADDRESS_LEN {
        return Err(ParseError::InvalidFormat);
    }

    match buf.get(..WINDOW_WIDTH) {
        Some(head) => {
            let window: &[u8; WINDOW_WIDTH] =
                head.try_into().map_err(|_| ParseError::InvalidFormat)?;
            parse_window(window, len)
        }
        None => parse_window(&load_window(&buf[..len])?, len),
    }
}

/// Parse an address from a byte slice.
pub fn parse(input: &[u8]) -> Result<u32, ParseError> {
    parse_window(&load_window(input)?, input.len())
}

/// Parse an address from a string.
pub fn parse_str(input: &str) -> Result<u32, ParseError> {
    parse(input.as_bytes())
}

/// Parse an address into [`Ipv4Addr`].
pub fn parse_ipv4(input: &str) -> Result<Ipv4Addr, ParseError> {
    parse_str(input).map(|address| Ipv4Addr::from(octets(address)))
}

/// Split a parsed address into its four fields, first field first.
#[inline]
pub fn octets(address: u32) -> [u8; 4] {
    address.to_ne_bytes()
}

/// Copy a short input into a zero-padded window.
pub(crate) fn load_window(input: &[u8]) -> Result<[u8; WINDOW_WIDTH], ParseError> {
    if input.len() > MAX_ADDRESS_LEN {
        return Err(ParseError::InvalidFormat);
    }

    let mut window = [0u8; WINDOW_WIDTH];
    window[..input.len()].copy_from_slice(input);
    Ok(window)
}
