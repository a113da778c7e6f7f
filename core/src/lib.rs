//! Core

#[macro_use]
extern crate log;

pub mod film;
pub mod geometry;
pub mod image_io;
pub mod knight;
pub mod spectrum;
