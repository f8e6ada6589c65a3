//! Benchmarking utilities for comparing parse paths.
//!
//! This module exposes the internal parse paths for performance comparison:
//! - Scalar: table-driven, one lane at a time
//! - Simd: SSSE3 on x86_64, NEON on aarch64
//!
//! # Example
//!
//! ```
//! use dotquad::bench::{detect_available_paths, parse_with_path};
//!
//! for path in detect_available_paths() {
//!     let result = parse_with_path(b"10.0.0.1", path).unwrap();
//!     assert_eq!(dotquad::octets(result.unwrap()), [10, 0, 0, 1]);
//! }
//! ```

use crate::core::tables::WINDOW_WIDTH;
use crate::{ParseError, load_window, scalar};

#[cfg(feature = "simd")]
use crate::simd;

/// Available parse paths for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsePath {
    /// Table-driven scalar implementation (no SIMD)
    Scalar,
    /// Vector implementation for the current architecture
    Simd,
}

impl std::fmt::Display for ParsePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParsePath::Scalar => write!(f, "Scalar"),
            ParsePath::Simd => write!(f, "SIMD"),
        }
    }
}

/// Platform capabilities for SIMD.
#[derive(Debug, Clone)]
pub struct PlatformInfo {
    pub arch: &'static str,
    pub simd_features: Vec<&'static str>,
}

impl PlatformInfo {
    /// Detect current platform capabilities.
    pub fn detect() -> Self {
        let arch = std::env::consts::ARCH;
        #[allow(unused_mut)]
        let mut simd_features = Vec::new();

        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("ssse3") {
                simd_features.push("SSSE3");
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            // NEON is always available on aarch64
            simd_features.push("NEON");
        }

        PlatformInfo {
            arch,
            simd_features,
        }
    }

    /// Format as display string.
    pub fn display(&self) -> String {
        if self.simd_features.is_empty() {
            self.arch.to_string()
        } else {
            format!("{} ({})", self.arch, self.simd_features.join(", "))
        }
    }
}

/// Detect which parse paths can run on this CPU.
pub fn detect_available_paths() -> Vec<ParsePath> {
    let mut paths = vec![ParsePath::Scalar]; // Scalar always available

    #[cfg(feature = "simd")]
    {
        if simd::is_available() {
            paths.push(ParsePath::Simd);
        }
    }

    paths
}

/// Parse using a specific path.
///
/// Returns `None` if the path is not available on this CPU.
pub fn parse_with_path(input: &[u8], path: ParsePath) -> Option<Result<u32, ParseError>> {
    let window = match load_window(input) {
        Ok(window) => window,
        Err(e) => return Some(Err(e)),
    };
    parse_window_with_path(&window, input.len(), path)
}

/// Parse a prepared window using a specific path.
pub fn parse_window_with_path(
    window: &[u8; WINDOW_WIDTH],
    len: usize,
    path: ParsePath,
) -> Option<Result<u32, ParseError>> {
    match path {
        ParsePath::Scalar => Some(scalar::parse_window(window, len)),
        ParsePath::Simd => parse_simd(window, len),
    }
}

#[cfg(feature = "simd")]
fn parse_simd(window: &[u8; WINDOW_WIDTH], len: usize) -> Option<Result<u32, ParseError>> {
    simd::parse_with_simd(window, len)
}

#[cfg(not(feature = "simd"))]
fn parse_simd(_window: &[u8; WINDOW_WIDTH], _len: usize) -> Option<Result<u32, ParseError>> {
    None
}
