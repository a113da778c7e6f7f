//! Atmosphere
//!
//! Single scattering transport through a spherical-shell atmosphere with
//! exponential Rayleigh and Mie density profiles.

mod model;
mod phase;
mod transport;
mod zodiacal;

pub use model::*;
pub use phase::*;
pub use transport::*;
pub use zodiacal::*;
