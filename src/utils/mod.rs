//! Shared utilities: command formatting and run-time estimation.

pub mod estimate;
pub mod format;

pub use estimate::{estimate_test_time, ScanReport};
pub use format::{compact, format, toggle};
