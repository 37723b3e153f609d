//! Colour uniformity: is a region plain enough to put a logo on?

use image::RgbImage;

use super::region::{Region, RegionSampler};
use crate::error::PlacementResult;

/// Maximum per-channel deviation from the first pixel.
pub const DEFAULT_TOLERANCE: u8 = 10;

/// True when every pixel stays within `tolerance` of the first pixel on
/// each of R, G and B. Scans row-major and stops at the first deviation.
/// An empty buffer is uniform.
pub fn is_uniform_pixels(pixels: &RgbImage, tolerance: u8) -> bool {
    let mut iter = pixels.pixels();
    let Some(base) = iter.next() else {
        return true;
    };
    let base = base.0;
    iter.all(|px| {
        px.0
            .iter()
            .zip(base.iter())
            .all(|(c, b)| c.abs_diff(*b) <= tolerance)
    })
}

/// Sample `region` and test it for uniformity.
pub fn is_uniform<S: RegionSampler + ?Sized>(
    sampler: &S,
    region: Region,
    tolerance: u8,
) -> PlacementResult<bool> {
    let pixels = sampler.sample_rgb(region)?;
    Ok(is_uniform_pixels(&pixels, tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb};

    #[test]
    fn constant_region_is_uniform_at_zero_tolerance() {
        let px = RgbImage::from_pixel(8, 8, Rgb([12, 200, 99]));
        assert!(is_uniform_pixels(&px, 0));
        assert!(is_uniform_pixels(&px, DEFAULT_TOLERANCE));
    }

    #[test]
    fn deviation_at_tolerance_passes() {
        let mut px = RgbImage::from_pixel(4, 4, Rgb([100, 100, 100]));
        px.put_pixel(3, 3, Rgb([110, 90, 100]));
        assert!(is_uniform_pixels(&px, 10));
    }

    #[test]
    fn single_channel_over_tolerance_fails() {
        let mut px = RgbImage::from_pixel(4, 4, Rgb([100, 100, 100]));
        px.put_pixel(2, 1, Rgb([100, 100, 111]));
        assert!(!is_uniform_pixels(&px, 10));
    }

    #[test]
    fn baseline_is_first_pixel_not_mean() {
        // first pixel is the outlier, so everything else deviates from it
        let mut px = RgbImage::from_pixel(4, 1, Rgb([50, 50, 50]));
        px.put_pixel(0, 0, Rgb([0, 0, 0]));
        assert!(!is_uniform_pixels(&px, 10));
    }

    #[test]
    fn empty_buffer_is_uniform() {
        assert!(is_uniform_pixels(&RgbImage::new(0, 0), 0));
    }

    #[test]
    fn samples_through_region() {
        let mut img = RgbImage::from_pixel(30, 30, Rgb([255, 255, 255]));
        img.put_pixel(25, 25, Rgb([0, 0, 0]));
        let img = DynamicImage::ImageRgb8(img);
        assert!(is_uniform(&img, Region::new(0, 0, 20, 20), 10).unwrap());
        assert!(!is_uniform(&img, Region::new(10, 10, 20, 20), 10).unwrap());
    }
}
