//! # Placement Evaluator
//!
//! Scores the two fixed corner candidates (top-left, top-right) for a logo of
//! a given size. Uniformity decides whether a corner has space; brightness
//! only decides which logo variant to recommend.

use tracing::{debug, warn};

use crate::config::PlacerConfig;
use crate::core::{LogoVariant, Region, RegionSampler, is_bright, is_uniform};
use crate::error::PlacementResult;

/// The corners a logo may be placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
}

impl Corner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::TopLeft => "top-left",
            Corner::TopRight => "top-right",
        }
    }
}

impl std::fmt::Display for Corner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offset between the logo and the image edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub x: u32,
    pub y: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self { x: 5, y: 5 }
    }
}

/// How the brightness of a corner maps to a logo variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum VariantPolicy {
    /// Dark logo on bright backgrounds, light logo on dark backgrounds.
    #[default]
    Contrast,
    /// Always recommend the light logo, whatever the background.
    #[clap(name = "always-light")]
    AlwaysLight,
}

impl VariantPolicy {
    pub fn select(&self, is_bright: bool) -> LogoVariant {
        match (self, is_bright) {
            (VariantPolicy::Contrast, true) => LogoVariant::Dark,
            (VariantPolicy::Contrast, false) => LogoVariant::Light,
            (VariantPolicy::AlwaysLight, _) => LogoVariant::Light,
        }
    }
}

/// Analysis result for one corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerCandidate {
    pub corner: Corner,
    /// Where the logo would go; `region.x`/`region.y` are the overlay coordinates.
    pub region: Region,
    pub has_space: bool,
    pub is_bright: bool,
    pub recommended_variant: LogoVariant,
}

impl CornerCandidate {
    pub fn x(&self) -> u32 {
        self.region.x
    }

    pub fn y(&self) -> u32 {
        self.region.y
    }
}

/// Both corner candidates plus the geometry they were computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementEvaluation {
    pub top_left: CornerCandidate,
    pub top_right: CornerCandidate,
    pub image_width: u32,
    pub image_height: u32,
    pub margins: Margins,
}

impl PlacementEvaluation {
    /// Top-left if it has space, else top-right if it has space.
    pub fn first_free(&self) -> Option<&CornerCandidate> {
        [&self.top_left, &self.top_right]
            .into_iter()
            .find(|c| c.has_space)
    }
}

/// Evaluates corner candidates against an image.
#[derive(Debug, Clone)]
pub struct PlacementEvaluator {
    pub margins: Margins,
    pub tolerance: u8,
    pub brightness_threshold: u8,
    pub policy: VariantPolicy,
}

impl Default for PlacementEvaluator {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            tolerance: crate::core::DEFAULT_TOLERANCE,
            brightness_threshold: crate::core::DEFAULT_BRIGHTNESS_THRESHOLD,
            policy: VariantPolicy::default(),
        }
    }
}

impl PlacementEvaluator {
    pub fn from_config(config: &PlacerConfig) -> Self {
        Self {
            margins: Margins {
                x: config.margin_x,
                y: config.margin_y,
            },
            tolerance: config.tolerance,
            brightness_threshold: config.brightness_threshold,
            policy: config.variant_policy,
        }
    }

    /// Evaluate both corners for a `logo_width` x `logo_height` logo.
    ///
    /// Returns `Ok(None)` without sampling when the logo plus margin does not
    /// fit the image: taller than `image_height - margin_y`, or wider than
    /// `image_width - margin_x`. Sampling errors only surface if that bound
    /// is broken, which would be a bookkeeping bug.
    pub fn evaluate<S: RegionSampler + ?Sized>(
        &self,
        image: &S,
        logo_width: u32,
        logo_height: u32,
    ) -> PlacementResult<Option<PlacementEvaluation>> {
        let (image_width, image_height) = image.dimensions();
        let Margins { x: margin_x, y: margin_y } = self.margins;

        if logo_height as u64 + margin_y as u64 > image_height as u64 {
            warn!(
                logo_height,
                image_height, "Logo height is too large to fit in the image"
            );
            return Ok(None);
        }
        if logo_width as u64 + margin_x as u64 > image_width as u64 {
            warn!(
                logo_width,
                image_width, "Logo width is too large to fit in the image"
            );
            return Ok(None);
        }

        let top_left = Region::new(margin_x, margin_y, logo_width, logo_height);
        let top_right = Region::new(
            image_width - logo_width - margin_x,
            margin_y,
            logo_width,
            logo_height,
        );

        let top_left = self.candidate(image, Corner::TopLeft, top_left)?;
        let top_right = self.candidate(image, Corner::TopRight, top_right)?;

        Ok(Some(PlacementEvaluation {
            top_left,
            top_right,
            image_width,
            image_height,
            margins: self.margins,
        }))
    }

    fn candidate<S: RegionSampler + ?Sized>(
        &self,
        image: &S,
        corner: Corner,
        region: Region,
    ) -> PlacementResult<CornerCandidate> {
        let has_space = is_uniform(image, region, self.tolerance)?;
        let is_bright = is_bright(image, region, self.brightness_threshold)?;
        let recommended_variant = self.policy.select(is_bright);
        debug!(
            %corner,
            x = region.x,
            y = region.y,
            has_space,
            is_bright,
            variant = %recommended_variant,
            "Evaluated corner"
        );
        Ok(CornerCandidate {
            corner,
            region,
            has_space,
            is_bright,
            recommended_variant,
        })
    }
}
