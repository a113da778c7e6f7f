//! Stars
//!
//! Bright star catalog loading and diffraction-limited point source
//! splatting.

#[macro_use]
extern crate log;

mod catalog;
mod psf;

pub use catalog::*;
pub use psf::*;
