//! Rectangular regions and the sampler that extracts them.
//!
//! The sampler performs no clamping: a region that reaches past the image
//! edge is an [`PlacementError::OutOfBounds`] error. Callers validate
//! dimensions before sampling.

use image::{DynamicImage, GenericImageView, GrayImage, RgbImage};

use crate::error::{PlacementError, PlacementResult};

/// A rectangle inside an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the region lies entirely inside a `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);
        matches!((right, bottom), (Some(r), Some(b)) if r <= width && b <= height)
    }

    /// Fail with `OutOfBounds` unless the region fits a `width` x `height` image.
    pub fn ensure_within(&self, width: u32, height: u32) -> PlacementResult<()> {
        if self.fits_within(width, height) {
            Ok(())
        } else {
            Err(PlacementError::out_of_bounds(*self, width, height)
                .with_recovery_suggestion("Validate logo size plus margin against the image first"))
        }
    }
}

/// Extracts raw pixel data for a region of an image.
///
/// Implemented for [`DynamicImage`]; test doubles implement it to observe
/// which regions get sampled.
pub trait RegionSampler {
    /// Width and height of the underlying image.
    fn dimensions(&self) -> (u32, u32);

    /// Three-channel (R, G, B) pixels of `region`, row-major.
    fn sample_rgb(&self, region: Region) -> PlacementResult<RgbImage>;

    /// Single-channel luma pixels of `region`, row-major.
    fn sample_luma(&self, region: Region) -> PlacementResult<GrayImage>;
}

impl RegionSampler for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn sample_rgb(&self, region: Region) -> PlacementResult<RgbImage> {
        let (w, h) = GenericImageView::dimensions(self);
        region.ensure_within(w, h)?;
        Ok(self
            .crop_imm(region.x, region.y, region.width, region.height)
            .to_rgb8())
    }

    fn sample_luma(&self, region: Region) -> PlacementResult<GrayImage> {
        let (w, h) = GenericImageView::dimensions(self);
        region.ensure_within(w, h)?;
        Ok(self
            .crop_imm(region.x, region.y, region.width, region.height)
            .to_luma8())
    }
}
