//! Common maths

mod common;

// Re-export.
pub use common::*;
