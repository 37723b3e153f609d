// SPDX-License-Identifier: MIT
//! # logo-scale: Aspect-Preserving Logo Shrinking
//!
//! This crate computes shrink plans for logo overlays and performs the actual
//! resampling on the CPU. It is the resize capability behind the placer's
//! shrink-and-retry policy.
//!
//! ## Key Components
//!
//! - [`plan`]: Shrink box and fit-inside plan computation (never upscales)
//! - [`cpu`]: RGBA8 resize kernel built on `fast_image_resize` (SIMD-accelerated)
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use logo_scale::cpu::resize_rgba_cpu;
//! use logo_scale::plan::{build_plan, shrink_box, ResizeFilter, Size};
//!
//! let logo = Size { w: 100, h: 50 };
//! let plan = build_plan(logo, shrink_box(logo, 0.75));
//! assert_eq!((plan.out.w, plan.out.h), (75, 38));
//!
//! let src = vec![255u8; (logo.w * logo.h * 4) as usize];
//! let mut dst = vec![0u8; plan.out_len()];
//! let mut resizer = fast_image_resize::Resizer::new();
//! resize_rgba_cpu(&mut resizer, &src, &plan, ResizeFilter::Lanczos3, &mut dst)?;
//! # Ok::<(), logo_scale::cpu::ScaleError>(())
//! ```

pub mod cpu;
pub mod plan;
