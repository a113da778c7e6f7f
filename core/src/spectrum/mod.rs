//! Spectra and colour

mod banded;
mod cie;
mod xyzv;

pub use banded::*;
pub use cie::*;
pub use xyzv::*;
