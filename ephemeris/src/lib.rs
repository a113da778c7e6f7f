//! Ephemeris
//!
//! Low precision positions for the sun, the moon and the naked-eye planets,
//! plus the time and coordinate frame conversions they need. Accuracy is a
//! fraction of a degree, plenty for placing lights in a rendered sky.

mod frames;
mod planets;
mod sun_moon;
mod time;

pub use frames::*;
pub use planets::*;
pub use sun_moon::*;
pub use time::*;
