//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use dotquad::prelude::*;
//!
//! let address = parse_str("10.1.2.3").unwrap();
//! assert_eq!(octets(address), [10, 1, 2, 3]);
//! ```

pub use crate::{
    MAX_ADDRESS_LEN,
    ParseError,
    // Benchmark paths
    bench::{ParsePath, PlatformInfo, detect_available_paths, parse_with_path},
    octets,
    // Core parsing
    parse,
    parse_ipv4,
    parse_padded,
    parse_str,
    parse_window,
};
