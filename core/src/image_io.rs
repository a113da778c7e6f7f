//! Image I/O

#![allow(dead_code)]

use crate::knight::*;
use byteorder::{LittleEndian, WriteBytesExt};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes linear RGB pixel data to a file, choosing the format from the
/// extension. Floating point formats receive the data untouched; 8-bit
/// formats expect the caller to have tone mapped into [0, 1] already.
///
/// * `path`    - Output file path.
/// * `rgb`     - Pixel data in row-major order, top row first.
/// * `width`   - Image width in pixels.
/// * `height`  - Image height in pixels.
pub fn write_image(
    path: &str,
    rgb: &[[Float; 3]],
    width: usize,
    height: usize,
) -> Result<(), String> {
    debug_assert!(rgb.len() == width * height);

    match Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
    {
        Some(ext) if ext == "pfm" => write_pfm(path, rgb, width, height),
        Some(ext) if ext == "png" => write_png(path, rgb, width, height),
        Some(ext) => Err(format!("Unsupported image file extension '{}'", ext)),
        None => Err(format!("Can't determine image file type from '{}'", path)),
    }
}

/// Writes the pixel data as a little-endian colour PFM, bottom row first as
/// the format requires.
fn write_pfm(path: &str, rgb: &[[Float; 3]], width: usize, height: usize) -> Result<(), String> {
    let file = File::create(path).map_err(|e| format!("Error creating PFM file '{}'. {}", path, e))?;
    let mut out = BufWriter::new(file);

    let err = |e: std::io::Error| format!("Error writing PFM file '{}'. {}", path, e);

    out.write_all(format!("PF\n{} {}\n-1.0\n", width, height).as_bytes())
        .map_err(err)?;
    for y in (0..height).rev() {
        for x in 0..width {
            for c in rgb[y * width + x] {
                out.write_f32::<LittleEndian>(c).map_err(err)?;
            }
        }
    }
    out.flush().map_err(err)
}

/// Writes the pixel data as an 8-bit PNG; values are clamped to [0, 1].
fn write_png(path: &str, rgb: &[[Float; 3]], width: usize, height: usize) -> Result<(), String> {
    let mut buf = image::RgbImage::new(width as u32, height as u32);
    for (y, row) in rgb.chunks(width).enumerate() {
        for (x, p) in row.iter().enumerate() {
            let q = |c: Float| (clamp(c, 0.0, 1.0) * 255.0 + 0.5) as u8;
            buf.put_pixel(x as u32, y as u32, image::Rgb([q(p[0]), q(p[1]), q(p[2])]));
        }
    }
    buf.save(path)
        .map_err(|e| format!("Error writing PNG file '{}'. {}", path, e))
}
