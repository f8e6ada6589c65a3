//! NEON address parser
//!
//! Same pipeline as the SSSE3 backend. NEON has no movemask or `pmaddubsw`,
//! so both are emulated:
//! - movemask: AND with per-lane bit weights, horizontal add of each half
//! - multiply-add: `vmull_u8` on each half, then `vpaddq_u16` to sum
//!   adjacent products

use crate::ParseError;
use crate::core::dotmask::classify;
use crate::core::tables::{DotmaskTables, WEIGHTS, WINDOW_WIDTH, tables};

/// NEON parse; NEON is mandatory on aarch64 so this always returns `Some`
pub fn parse_window(window: &[u8; WINDOW_WIDTH], len: usize) -> Option<Result<u32, ParseError>> {
    if !super::has_neon() {
        return None;
    }

    // SAFETY: NEON is mandatory on aarch64
    Some(unsafe { parse_neon_impl(window, len, tables()) })
}

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
unsafe fn parse_neon_impl(
    window: &[u8; WINDOW_WIDTH],
    len: usize,
    tables: &DotmaskTables,
) -> Result<u32, ParseError> {
    unsafe {
        use std::arch::aarch64::*;

        let input = vld1q_u8(window.as_ptr());

        let dots = vceqq_u8(input, vdupq_n_u8(b'.'));
        let is_digit = vcleq_u8(vsubq_u8(input, vdupq_n_u8(b'0')), vdupq_n_u8(9));

        let dotmask = classify(movemask(dots), movemask(is_digit), len)?;
        let id = tables.id_for(dotmask).ok_or(ParseError::InvalidFormat)?;

        // PAD (-1) reads as 0xFF, out of range for tbl, which yields zero
        let pattern = vld1q_u8(tables.pattern(id).as_ptr() as *const u8);
        let shuffled = vqtbl1q_u8(input, pattern);
        let digits = vqsubq_u8(shuffled, vdupq_n_u8(b'0'));

        let weights = vld1q_u8(WEIGHTS.as_ptr() as *const u8);
        let products_lo = vmull_u8(vget_low_u8(digits), vget_low_u8(weights));
        let products_hi = vmull_u8(vget_high_u8(digits), vget_high_u8(weights));
        let partial = vpaddq_u16(products_lo, products_hi);

        let rotated = vextq_u16(partial, partial, 4);
        let fields = vaddq_u16(partial, rotated);

        let packed = vqmovn_u16(fields);
        Ok(vget_lane_u32(vreinterpret_u32_u8(packed), 0))
    }
}

/// Collapse a lane mask (0x00/0xFF per byte) into 16 bits, bit i = lane i
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
unsafe fn movemask(lanes: std::arch::aarch64::uint8x16_t) -> u16 {
    const BIT_WEIGHTS: [u8; 16] = [1, 2, 4, 8, 16, 32, 64, 128, 1, 2, 4, 8, 16, 32, 64, 128];

    unsafe {
        use std::arch::aarch64::*;

        let masked = vandq_u8(lanes, vld1q_u8(BIT_WEIGHTS.as_ptr()));
        let lo = vaddv_u8(vget_low_u8(masked)) as u16;
        let hi = vaddv_u8(vget_high_u8(masked)) as u16;
        lo | (hi << 8)
    }
}
