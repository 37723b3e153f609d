//! # Core Analysis Module
//!
//! Pixel-level building blocks for placement decisions: region sampling,
//! colour uniformity, brightness classification, and the logo variant types
//! those analyses feed.

pub mod brightness;
pub mod logo;
pub mod region;
pub mod uniformity;

pub use brightness::{DEFAULT_BRIGHTNESS_THRESHOLD, is_bright, is_bright_pixels, mean_luma};
pub use logo::{LogoSet, LogoVariant};
pub use region::{Region, RegionSampler};
pub use uniformity::{DEFAULT_TOLERANCE, is_uniform, is_uniform_pixels};
