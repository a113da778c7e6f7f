//! Film

#![allow(dead_code)]

use crate::knight::*;
use crate::spectrum::Xyzv;
use std::sync::RwLock;

/// Accumulates tristimulus radiance for every pixel of the output image.
///
/// Worker threads render into `FilmTile`s and merge them back, while point
/// source splats go straight to the shared pixel store.
pub struct RadianceFilm {
    /// Image width in pixels.
    width: usize,

    /// Image height in pixels.
    height: usize,

    /// Pixel radiance in row-major order.
    pixels: RwLock<Vec<Xyzv>>,
}

impl RadianceFilm {
    /// Creates a new film cleared to black.
    ///
    /// * `width` - Image width in pixels.
    /// * `height` - Image height in pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: RwLock::new(vec![Xyzv::default(); width * height]),
        }
    }

    /// Returns the image resolution as `(width, height)`.
    pub fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns a tile covering the given row band.
    ///
    /// * `y0` - First row of the band.
    /// * `y1` - One past the last row of the band.
    pub fn tile(&self, y0: usize, y1: usize) -> FilmTile {
        debug_assert!(y0 <= y1 && y1 <= self.height);
        FilmTile {
            width: self.width,
            y0,
            pixels: vec![Xyzv::default(); self.width * (y1 - y0)],
        }
    }

    /// Merges a rendered tile into the film.
    ///
    /// * `tile` - The tile to merge.
    pub fn merge_tile(&self, tile: FilmTile) {
        let offset = tile.y0 * self.width;
        let mut pixels = self.pixels.write().unwrap();
        for (i, p) in tile.pixels.into_iter().enumerate() {
            pixels[offset + i] += p;
        }
    }

    /// Adds radiance directly to a single pixel. Out-of-bounds coordinates and
    /// non-finite or negative-luminance contributions are ignored with a
    /// warning.
    ///
    /// * `x` - Pixel column.
    /// * `y` - Pixel row.
    /// * `c` - Radiance to add.
    pub fn add_splat(&self, x: usize, y: usize, c: Xyzv) {
        if x >= self.width || y >= self.height {
            return;
        }
        if c.has_nans() {
            warn!("Ignoring splatted value with NaN at ({}, {})", x, y);
            return;
        }
        if c.y < 0.0 {
            warn!(
                "Ignoring splatted value with negative luminance {} at ({}, {})",
                c.y, x, y
            );
            return;
        }
        let mut pixels = self.pixels.write().unwrap();
        pixels[y * self.width + x] += c;
    }

    /// Consumes the film and returns the pixel buffer in row-major order.
    pub fn into_pixels(self) -> Vec<Xyzv> {
        self.pixels.into_inner().unwrap()
    }
}

/// A row band of pixels rendered by one worker.
pub struct FilmTile {
    /// Image width in pixels.
    width: usize,

    /// First film row the tile covers.
    y0: usize,

    /// Tile pixel radiance in row-major order.
    pixels: Vec<Xyzv>,
}

impl FilmTile {
    /// Adds radiance to a pixel in film coordinates.
    ///
    /// * `x` - Film pixel column.
    /// * `y` - Film pixel row.
    /// * `c` - Radiance to add.
    pub fn add(&mut self, x: usize, y: usize, c: Xyzv) {
        debug_assert!(y >= self.y0);
        self.pixels[(y - self.y0) * self.width + x] += c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_places_tile_rows() {
        let film = RadianceFilm::new(2, 4);
        let mut tile = film.tile(2, 4);
        tile.add(1, 2, Xyzv::new(0.0, 5.0, 0.0, 0.0));
        film.merge_tile(tile);

        let pixels = film.into_pixels();
        assert_eq!(pixels[2 * 2 + 1].y, 5.0);
        assert_eq!(pixels[0].y, 0.0);
    }

    #[test]
    fn splat_accumulates() {
        let film = RadianceFilm::new(2, 2);
        film.add_splat(1, 1, Xyzv::new(0.0, 1.0, 0.0, 0.5));
        film.add_splat(1, 1, Xyzv::new(0.0, 2.0, 0.0, 0.5));
        let pixels = film.into_pixels();
        assert_eq!(pixels[3].y, 3.0);
        assert_eq!(pixels[3].v, 1.0);
    }

    #[test]
    fn splat_rejects_nan_and_out_of_bounds() {
        let film = RadianceFilm::new(2, 2);
        film.add_splat(5, 0, Xyzv::new(0.0, 1.0, 0.0, 0.0));
        film.add_splat(0, 0, Xyzv::new(0.0, Float::NAN, 0.0, 0.0));
        let pixels = film.into_pixels();
        assert!(pixels.iter().all(|p| p.y == 0.0));
    }
}
