//! Converts a photographed glyph into a binary `Pattern`.
//!
//! The image is decoded (PNG/JPEG/BMP/GIF), resized to the pattern shape,
//! converted to grayscale, and every pixel darker than `cutoff` (luma
//! normalized to [0, 1]) becomes ink.

use std::path::Path;

use image::imageops::FilterType;
use image::GenericImageView;

use crate::data::pattern::Pattern;
use crate::error::Result;
use crate::math::matrix::Matrix;

/// Default luma cutoff below which a pixel counts as ink.
pub const DEFAULT_INK_CUTOFF: f64 = 0.5;

pub fn image_bytes_to_pattern(bytes: &[u8], rows: usize, cols: usize, cutoff: f64) -> Result<Pattern> {
    let mut img = image::load_from_memory(bytes)?;
    if img.width() as usize != cols || img.height() as usize != rows {
        img = img.resize_exact(cols as u32, rows as u32, FilterType::Lanczos3);
    }
    let gray = img.to_luma8();

    let mut matrix = Matrix::zeros(rows, cols);
    for (x, y, pixel) in gray.enumerate_pixels() {
        let luma = pixel.0[0] as f64 / 255.0;
        matrix.data[y as usize][x as usize] = if luma < cutoff { 1.0 } else { 0.0 };
    }
    Ok(Pattern::from_binary_matrix(matrix))
}

pub fn load_image_pattern(path: &Path, rows: usize, cols: usize, cutoff: f64) -> Result<Pattern> {
    let bytes = std::fs::read(path)?;
    image_bytes_to_pattern(&bytes, rows, cols, cutoff)
}
