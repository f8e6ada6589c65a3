//! SIMD-accelerated address parsing
//!
//! This module provides platform-specific SIMD parsers. Runtime CPU feature
//! detection is used to pick the backend; callers fall back to
//! [`crate::scalar`] when this returns `None`.

use crate::ParseError;
use crate::core::tables::WINDOW_WIDTH;
#[cfg(target_arch = "x86_64")]
use std::sync::OnceLock;

#[cfg(target_arch = "x86_64")]
mod x86_64;

#[cfg(target_arch = "aarch64")]
mod aarch64;

// CPU feature detection cache
#[cfg(target_arch = "x86_64")]
static HAS_SSSE3: OnceLock<bool> = OnceLock::new();

/// Check if SSSE3 is available (cached after first call)
#[cfg(target_arch = "x86_64")]
pub fn has_ssse3() -> bool {
    *HAS_SSSE3.get_or_init(|| is_x86_feature_detected!("ssse3"))
}

#[cfg(not(target_arch = "x86_64"))]
pub fn has_ssse3() -> bool {
    false
}

/// Check if NEON is available (aarch64 only)
#[cfg(target_arch = "aarch64")]
pub fn has_neon() -> bool {
    true // NEON is mandatory on aarch64
}

#[cfg(not(target_arch = "aarch64"))]
pub fn has_neon() -> bool {
    false
}

/// Whether any vector backend can run on this CPU
pub fn is_available() -> bool {
    has_ssse3() || has_neon()
}

/// Unified SIMD parse entry point
///
/// Returns `None` if no SIMD backend is available for this CPU.
#[cfg(target_arch = "x86_64")]
pub fn parse_with_simd(
    window: &[u8; WINDOW_WIDTH],
    len: usize,
) -> Option<Result<u32, ParseError>> {
    x86_64::parse_window(window, len)
}

/// SIMD parse for aarch64 platforms
#[cfg(target_arch = "aarch64")]
pub fn parse_with_simd(
    window: &[u8; WINDOW_WIDTH],
    len: usize,
) -> Option<Result<u32, ParseError>> {
    aarch64::parse_window(window, len)
}

#[cfg(all(not(target_arch = "x86_64"), not(target_arch = "aarch64")))]
pub fn parse_with_simd(
    _window: &[u8; WINDOW_WIDTH],
    _len: usize,
) -> Option<Result<u32, ParseError>> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar;
    use rand::Rng;

    fn window(text: &[u8]) -> [u8; WINDOW_WIDTH] {
        let mut buf = [0u8; WINDOW_WIDTH];
        buf[..text.len()].copy_from_slice(text);
        buf
    }

    #[test]
    fn test_feature_probe_is_stable() {
        assert_eq!(has_ssse3(), has_ssse3());
        assert_eq!(is_available(), has_ssse3() || has_neon());
    }

    #[test]
    fn test_unavailable_means_none() {
        if !is_available() {
            assert_eq!(parse_with_simd(&window(b"1.2.3.4"), 7), None);
        }
    }

    #[test]
    fn test_matches_scalar_on_random_addresses() {
        if !is_available() {
            return;
        }

        let mut rng = rand::rng();
        for _ in 0..20_000 {
            let octets: [u16; 4] = [
                rng.random_range(0..1000),
                rng.random_range(0..1000),
                rng.random_range(0..1000),
                rng.random_range(0..1000),
            ];
            let text = format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3]);
            let buf = window(text.as_bytes());

            assert_eq!(
                parse_with_simd(&buf, text.len()),
                Some(scalar::parse_window(&buf, text.len())),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_matches_scalar_on_random_noise() {
        if !is_available() {
            return;
        }

        // Mostly digits and dots so a fair share of inputs reach the shuffle
        const ALPHABET: &[u8] = b"0123456789....x ";
        let mut rng = rand::rng();
        for _ in 0..50_000 {
            let mut buf = [0u8; WINDOW_WIDTH];
            for byte in buf.iter_mut() {
                *byte = ALPHABET[rng.random_range(0..ALPHABET.len())];
            }
            let len = rng.random_range(0..=WINDOW_WIDTH);

            assert_eq!(
                parse_with_simd(&buf, len),
                Some(scalar::parse_window(&buf, len)),
                "{:?} len {}",
                String::from_utf8_lossy(&buf),
                len
            );
        }
    }
}
