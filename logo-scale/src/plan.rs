// SPDX-License-Identifier: MIT
//! # Shrink Plan Computation
//!
//! A shrink is described in two steps:
//! 1. **Target box**: the requested dimensions scaled by a factor (`shrink_box`)
//! 2. **ScalePlan**: the input fitted inside that box with its aspect ratio kept
//!
//! - Rounding is half away from zero, matching how pixel sizes are usually quoted
//! - No upscaling: inputs already inside the box keep their size
//! - Every side is clamped to a minimum of 1px

/// Represents a 2D size with width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

/// Resampling filter used by the CPU kernel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ResizeFilter {
    /// Nearest neighbour, fastest, blocky on logos with thin strokes
    Nearest,
    /// Bilinear convolution
    Bilinear,
    /// Catmull-Rom cubic convolution
    #[clap(name = "catmull-rom")]
    CatmullRom,
    /// Lanczos3 convolution, sharpest edges for downscaled artwork
    #[default]
    Lanczos3,
}

/// Complete shrink plan computed from the source size and target box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScalePlan {
    /// Original input dimensions
    pub input: Size,
    /// Box the output must fit inside
    pub target: Size,
    /// Final computed output dimensions
    pub out: Size,
}

impl ScalePlan {
    /// Byte length of an RGBA8 buffer holding the output.
    pub fn out_len(&self) -> usize {
        (self.out.w as usize) * (self.out.h as usize) * 4
    }

    /// True when the plan leaves the input untouched.
    pub fn is_identity(&self) -> bool {
        self.input == self.out
    }
}

/// Scale `size` by `factor` on both axes, rounding each side and clamping to 1px.
///
/// `shrink_box(100x50, 0.75)` is `75x38`.
pub fn shrink_box(size: Size, factor: f64) -> Size {
    Size {
        w: ((size.w as f64 * factor).round() as u32).max(1),
        h: ((size.h as f64 * factor).round() as u32).max(1),
    }
}

/// Fit `input` inside `target` while preserving aspect ratio.
///
/// Never upscales: the scale is capped at 1.0.
pub fn build_plan(input: Size, target: Size) -> ScalePlan {
    let (w, h) = fit_within(input, target);
    ScalePlan {
        input,
        target,
        out: Size { w, h },
    }
}

fn fit_within(input: Size, box_: Size) -> (u32, u32) {
    let (w, h) = (input.w.max(1) as f64, input.h.max(1) as f64);
    let (bw, bh) = (box_.w as f64, box_.h as f64);
    let s = (bw / w).min(bh / h).min(1.0); // don't upscale
    (
        ((w * s).round() as u32).max(1),
        ((h * s).round() as u32).max(1),
    )
}
