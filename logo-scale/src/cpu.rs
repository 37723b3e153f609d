// SPDX-License-Identifier: MIT
// CPU scaler built on fast_image_resize (SIMD-accelerated).
// RGBA8 in → RGBA8 out, direct write into caller-provided dst buffer.

use fast_image_resize as fir;
use fir::images::{TypedImage, TypedImageRef};
use fir::pixels::U8x4;
use fir::{FilterType, ResizeAlg, ResizeOptions, Resizer};

use crate::plan::{ResizeFilter, ScalePlan};

#[derive(Debug)]
pub enum ScaleError {
    BufferTooSmall { needed: usize, got: usize },
    SourceTooSmall { needed: usize, got: usize },
    Fir(fir::ResizeError),
    ImageBuf(fir::ImageBufferError),
}

impl From<fir::ResizeError> for ScaleError { fn from(e: fir::ResizeError) -> Self { Self::Fir(e) } }
impl From<fir::ImageBufferError> for ScaleError { fn from(e: fir::ImageBufferError) -> Self { Self::ImageBuf(e) } }

impl std::fmt::Display for ScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleError::BufferTooSmall { needed, got } => {
                write!(f, "Output buffer too small: need {} bytes, got {}", needed, got)
            }
            ScaleError::SourceTooSmall { needed, got } => {
                write!(f, "Source buffer too small: need {} bytes, got {}", needed, got)
            }
            ScaleError::Fir(e) => write!(f, "Fast image resize error: {}", e),
            ScaleError::ImageBuf(e) => write!(f, "Image buffer error: {}", e),
        }
    }
}

impl std::error::Error for ScaleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaleError::Fir(e) => Some(e),
            ScaleError::ImageBuf(e) => Some(e),
            _ => None,
        }
    }
}

impl ResizeFilter {
    fn to_alg(self) -> ResizeAlg {
        match self {
            ResizeFilter::Nearest => ResizeAlg::Nearest,
            ResizeFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
            ResizeFilter::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
            ResizeFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
        }
    }
}

/// Main scaling entry point.
/// `src_rgba` must be tightly packed `plan.input.w * plan.input.h * 4` bytes.
/// `dst` must be at least `plan.out_len()` bytes; only that prefix is written.
pub fn resize_rgba_cpu(
    resizer: &mut Resizer,
    src_rgba: &[u8],
    plan: &ScalePlan,
    filter: ResizeFilter,
    dst: &mut [u8],
) -> Result<(), ScaleError> {
    let src_len = (plan.input.w as usize) * (plan.input.h as usize) * 4;
    if src_rgba.len() < src_len {
        return Err(ScaleError::SourceTooSmall { needed: src_len, got: src_rgba.len() });
    }
    let dst_len = plan.out_len();
    if dst.len() < dst_len {
        return Err(ScaleError::BufferTooSmall { needed: dst_len, got: dst.len() });
    }

    if plan.is_identity() {
        dst[..dst_len].copy_from_slice(&src_rgba[..src_len]);
        return Ok(());
    }

    let src_view = TypedImageRef::<U8x4>::from_buffer(plan.input.w, plan.input.h, &src_rgba[..src_len])?;
    let mut dst_image = TypedImage::<U8x4>::from_buffer(plan.out.w, plan.out.h, &mut dst[..dst_len])?;

    // Logos are mostly transparent; premultiply so edges don't pick up dark fringes.
    let opts = ResizeOptions::new()
        .resize_alg(filter.to_alg())
        .use_alpha(true);

    resizer.resize_typed::<U8x4>(&src_view, &mut dst_image, &opts)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{build_plan, shrink_box, Size};

    fn solid(size: Size, px: [u8; 4]) -> Vec<u8> {
        let mut v = vec![0u8; (size.w * size.h * 4) as usize];
        for p in v.chunks_exact_mut(4) {
            p.copy_from_slice(&px);
        }
        v
    }

    #[test]
    fn shrinks_solid_logo() {
        let input = Size { w: 100, h: 50 };
        let plan = build_plan(input, shrink_box(input, 0.75));
        let src = solid(input, [10, 200, 30, 255]);
        let mut dst = vec![0u8; plan.out_len()];
        let mut resizer = Resizer::new();
        resize_rgba_cpu(&mut resizer, &src, &plan, ResizeFilter::Bilinear, &mut dst).unwrap();
        for p in dst.chunks_exact(4) {
            for (got, want) in p.iter().zip([10u8, 200, 30, 255]) {
                assert!(got.abs_diff(want) <= 1, "{:?}", p);
            }
        }
    }

    #[test]
    fn identity_plan_copies() {
        let input = Size { w: 3, h: 2 };
        let plan = build_plan(input, Size { w: 10, h: 10 });
        let src: Vec<u8> = (0..24).collect();
        let mut dst = vec![0u8; plan.out_len()];
        resize_rgba_cpu(&mut Resizer::new(), &src, &plan, ResizeFilter::Nearest, &mut dst).unwrap();
        assert_eq!(src, dst);
    }

    #[test]
    fn rejects_short_destination() {
        let input = Size { w: 8, h: 8 };
        let plan = build_plan(input, Size { w: 4, h: 4 });
        let src = solid(input, [0, 0, 0, 255]);
        let mut dst = vec![0u8; 8];
        let err = resize_rgba_cpu(&mut Resizer::new(), &src, &plan, ResizeFilter::Nearest, &mut dst)
            .unwrap_err();
        assert!(matches!(err, ScaleError::BufferTooSmall { needed: 64, got: 8 }));
    }
}
