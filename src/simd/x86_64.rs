//! SSSE3 address parser
//!
//! Based on techniques from:
//! - Wojciech Muła's notes on parsing IPv4 addresses with SIMD
//! - http://0x80.pl/notesen/2023-04-09-faster-parse-ipv4.html
//! - https://lemire.me/blog/2023/06/08/parsing-ip-addresses-crazily-fast
//!
//! One unaligned 16-byte load, two compares for the dot and digit masks, one
//! table lookup, then `pshufb` → `psubusb` → `pmaddubsw` → `palignr` + `paddw`
//! → `packuswb`. No loop over the input.

use crate::ParseError;
use crate::core::dotmask::classify;
use crate::core::tables::{DotmaskTables, WEIGHTS, WINDOW_WIDTH, tables};

/// SIMD-accelerated parse, `None` if SSSE3 is unavailable
pub fn parse_window(window: &[u8; WINDOW_WIDTH], len: usize) -> Option<Result<u32, ParseError>> {
    if !super::has_ssse3() {
        return None;
    }

    // SAFETY: SSSE3 support checked above
    Some(unsafe { parse_ssse3_impl(window, len, tables()) })
}

/// SSSE3 parse implementation
///
/// Algorithm:
/// 1. Load 16 bytes
/// 2. movemask of `== '.'` and of `'0'..='9'`
/// 3. Classify into the sentinel-terminated dot mask, look up the id
/// 4. Shuffle digits into fixed lanes and subtract `'0'` with saturation
/// 5. Multiply-add against the 1/10/100 weights (8 x i16)
/// 6. Rotate by 8 bytes and add to fold hundreds onto tens/units
/// 7. Saturating pack to bytes, extract the low 32 bits
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "ssse3")]
unsafe fn parse_ssse3_impl(
    window: &[u8; WINDOW_WIDTH],
    len: usize,
    tables: &DotmaskTables,
) -> Result<u32, ParseError> {
    unsafe {
        use std::arch::x86_64::*;

        let input = _mm_loadu_si128(window.as_ptr() as *const __m128i);

        let dots = _mm_cmpeq_epi8(input, _mm_set1_epi8(b'.' as i8));
        let dot_bits = _mm_movemask_epi8(dots) as u16;

        // Unsigned `x - '0' <= 9` via min/cmpeq
        let offset = _mm_sub_epi8(input, _mm_set1_epi8(b'0' as i8));
        let is_digit = _mm_cmpeq_epi8(_mm_min_epu8(offset, _mm_set1_epi8(9)), offset);
        let digit_bits = _mm_movemask_epi8(is_digit) as u16;

        let dotmask = classify(dot_bits, digit_bits, len)?;
        let id = tables.id_for(dotmask).ok_or(ParseError::InvalidFormat)?;
        let pattern = _mm_loadu_si128(tables.pattern(id).as_ptr() as *const __m128i);

        let shuffled = _mm_shuffle_epi8(input, pattern);
        let digits = _mm_subs_epu8(shuffled, _mm_set1_epi8(b'0' as i8));

        let weights = _mm_loadu_si128(WEIGHTS.as_ptr() as *const __m128i);
        let partial = _mm_maddubs_epi16(digits, weights);

        let rotated = _mm_alignr_epi8(partial, partial, 8);
        let fields = _mm_add_epi16(partial, rotated);

        let packed = _mm_packus_epi16(fields, fields);
        Ok(_mm_cvtsi128_si32(packed) as u32)
    }
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
    fn test_ssse3_parse() {
        let Some(result) = parse_window(&window("192.168.1.1"), 11) else {
            return;
        };
        assert_eq!(result.map(u32::to_ne_bytes), Ok([192, 168, 1, 1]));
    }

    #[test]
    fn test_ssse3_rejects() {
        for text in ["1..2.3", "1.2.3", "1.2.3.4.5", "a.b.c.d", "1.2.3.4 "] {
            if let Some(result) = parse_window(&window(text), text.len()) {
                assert_eq!(result, Err(ParseError::InvalidFormat), "{:?}", text);
            }
        }
    }

    #[test]
    fn test_ssse3_ignores_trailing_window_bytes() {
        let mut buf = *b"8.8.4.4.999.....";
        let Some(clean) = parse_window(&buf, 7) else {
            return;
        };
        buf[7..].copy_from_slice(b"Z..Z..Z..");
        assert_eq!(parse_window(&buf, 7), Some(clean));
        assert_eq!(clean.map(u32::to_ne_bytes), Ok([8, 8, 4, 4]));
    }
}
