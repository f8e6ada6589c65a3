//! Table generation and dot classification

pub mod dotmask;
pub mod tables;
