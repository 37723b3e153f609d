//! Light/dark classification of a region from its mean luma.

use image::GrayImage;

use super::region::{Region, RegionSampler};
use crate::error::PlacementResult;

/// Mean luma a region must exceed to count as bright (0-255 scale).
pub const DEFAULT_BRIGHTNESS_THRESHOLD: u8 = 128;

/// Arithmetic mean of all luma samples, `None` for an empty buffer.
pub fn mean_luma(pixels: &GrayImage) -> Option<f64> {
    let raw = pixels.as_raw();
    if raw.is_empty() {
        return None;
    }
    let sum: u64 = raw.iter().map(|&v| v as u64).sum();
    Some(sum as f64 / raw.len() as f64)
}

/// True when the mean luma is strictly greater than `threshold`.
pub fn is_bright_pixels(pixels: &GrayImage, threshold: u8) -> bool {
    mean_luma(pixels).is_some_and(|mean| mean > threshold as f64)
}

/// Sample `region` as luma and classify it.
pub fn is_bright<S: RegionSampler + ?Sized>(
    sampler: &S,
    region: Region,
    threshold: u8,
) -> PlacementResult<bool> {
    let pixels = sampler.sample_luma(region)?;
    Ok(is_bright_pixels(&pixels, threshold))
}
