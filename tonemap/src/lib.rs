//! Tone mapping
//!
//! Night-vision post processing: auto exposure, mesopic colour blending,
//! extended Reinhard compression, gamma encoding and a bloom pass.

mod bloom;
mod mapper;

pub use bloom::*;
pub use mapper::*;
