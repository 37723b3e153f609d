//! # Placer Configuration
//!
//! `PlacerConfig` is the common interface between the CLI and the placement
//! core. Every field has a default matching the reference behaviour, so
//! `PlacerConfig::default()` reproduces it apart from the variant policy
//! choice.
//!
//! ## Configuration Parameters
//!
//! | Parameter | Type | Default | Constraint |
//! |-----------|------|---------|------------|
//! | `margin_x` / `margin_y` | `u32` | 5 | any |
//! | `tolerance` | `u8` | 10 | any |
//! | `brightness_threshold` | `u8` | 128 | any |
//! | `scale_factor` | `f64` | 0.75 | strictly between 0 and 1 |
//! | `variant_policy` | `VariantPolicy` | `Contrast` | |
//! | `resize_filter` | `ResizeFilter` | `Lanczos3` | |
//! | `output_dir` | `PathBuf` | `images` | non-empty |
//! | `public_base_url` | `String` | `http://localhost:3000/` | non-empty |
//! | `public_path` | `String` | `images` | non-empty, no `..` |
//! | `fetch_timeout_secs` | `u64` | 30 | > 0 |
//!
//! ## Examples
//!
//! ```rust
//! use logo_placer::config::PlacerConfig;
//!
//! let config = PlacerConfig {
//!     tolerance: 4,
//!     ..PlacerConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::path::PathBuf;
use std::time::Duration;

use logo_scale::plan::ResizeFilter;

use crate::processing::VariantPolicy;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacerConfig {
    /// Horizontal distance between the logo and the image edge.
    pub margin_x: u32,

    /// Vertical distance between the logo and the top edge.
    pub margin_y: u32,

    /// Maximum per-channel deviation for a corner to count as uniform.
    pub tolerance: u8,

    /// Mean luma a corner must exceed to count as bright.
    pub brightness_threshold: u8,

    /// Factor applied to the logo on each shrink.
    ///
    /// Must lie strictly between 0 and 1 so a shrink can never enlarge.
    pub scale_factor: f64,

    /// How corner brightness picks the light or dark logo.
    pub variant_policy: VariantPolicy,

    /// Resampling filter for shrinking logos.
    pub resize_filter: ResizeFilter,

    /// Directory the composited images are written to.
    pub output_dir: PathBuf,

    /// Origin the response URL starts with.
    pub public_base_url: String,

    /// Route under which `output_dir` is served; the response URL is
    /// `<public_base_url>/<public_path>/<file name>`.
    pub public_path: String,

    /// Timeout for each HTTP fetch.
    pub fetch_timeout_secs: u64,
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            margin_x: 5,
            margin_y: 5,
            tolerance: crate::core::DEFAULT_TOLERANCE,
            brightness_threshold: crate::core::DEFAULT_BRIGHTNESS_THRESHOLD,
            scale_factor: crate::processing::SHRINK_FACTOR,
            variant_policy: VariantPolicy::Contrast,
            resize_filter: ResizeFilter::Lanczos3,
            output_dir: PathBuf::from("images"),
            public_base_url: "http://localhost:3000/".to_string(),
            public_path: "images".to_string(),
            fetch_timeout_secs: 30,
        }
    }
}

impl PlacerConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.scale_factor > 0.0 && self.scale_factor < 1.0) {
            return Err(format!(
                "Scale factor must be between 0 and 1 (exclusive), got {}",
                self.scale_factor
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err("Fetch timeout must be greater than 0 seconds".to_string());
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err("Output directory must not be empty".to_string());
        }
        if self.public_base_url.trim().is_empty() {
            return Err("Public base URL must not be empty".to_string());
        }
        let route = self.public_route();
        if route.split('/').any(|segment| segment.is_empty() || segment == "..") {
            return Err(format!("Public path must be a plain route, got '{}'", self.public_path));
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// `public_path` without surrounding slashes.
    pub fn public_route(&self) -> &str {
        self.public_path.trim().trim_matches('/')
    }
}
