//! # Resize Policy
//!
//! Shrinks logo buffers by a fixed factor when a logo does not fit or no
//! corner qualifies. The shrink never enlarges and keeps the aspect ratio;
//! failures propagate as `Resize` errors and are never retried here.

use fast_image_resize::Resizer;
use image::{DynamicImage, GenericImageView, RgbaImage};
use logo_scale::cpu::resize_rgba_cpu;
use logo_scale::plan::{ResizeFilter, Size, build_plan, shrink_box};
use tracing::info;

use crate::config::PlacerConfig;
use crate::core::LogoSet;
use crate::error::{PlacementError, PlacementResult};

/// Scale applied per shrink.
pub const SHRINK_FACTOR: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePolicy {
    pub factor: f64,
    pub filter: ResizeFilter,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self {
            factor: SHRINK_FACTOR,
            filter: ResizeFilter::default(),
        }
    }
}

impl ResizePolicy {
    pub fn from_config(config: &PlacerConfig) -> Self {
        Self {
            factor: config.scale_factor,
            filter: config.resize_filter,
        }
    }

    /// Shrink `logo` to fit inside `factor * (width, height)`.
    pub fn shrink(&self, logo: &DynamicImage, width: u32, height: u32) -> PlacementResult<DynamicImage> {
        if !(self.factor > 0.0 && self.factor < 1.0) {
            return Err(PlacementError::resize(format!(
                "scale factor {} must be between 0 and 1",
                self.factor
            )));
        }

        let target = shrink_box(Size { w: width, h: height }, self.factor);
        info!(
            "Resizing logo to {:.0}% of its original size: {}x{}",
            self.factor * 100.0,
            target.w,
            target.h
        );

        let (src_w, src_h) = logo.dimensions();
        let plan = build_plan(Size { w: src_w, h: src_h }, target);
        let src = logo.to_rgba8();
        let mut dst = vec![0u8; plan.out_len()];
        let mut resizer = Resizer::new();
        resize_rgba_cpu(&mut resizer, src.as_raw(), &plan, self.filter, &mut dst)
            .map_err(|e| PlacementError::from(e).with_operation("shrink_logo"))?;

        let resized = RgbaImage::from_raw(plan.out.w, plan.out.h, dst).ok_or_else(|| {
            PlacementError::resize("resized buffer does not match planned dimensions")
        })?;
        Ok(DynamicImage::ImageRgba8(resized))
    }

    /// Shrink every rendering in `logos`, using the set's logical dimensions
    /// as the base box for each.
    pub fn shrink_set(&self, logos: &LogoSet) -> PlacementResult<LogoSet> {
        let (width, height) = logos.dimensions();
        logos.try_map(|logo| self.shrink(logo, width, height))
    }
}
