//! # Placement Orchestrator
//!
//! Drives one placement decision over already-decoded buffers:
//!
//! ```text
//! Start → CheckFit → Evaluate → { TopLeft | TopRight | Shrink | NoPlacementFound }
//! ```
//!
//! The decision runs as an explicit loop capped at [`MAX_EVALUATION_PASSES`].
//! A single `tried` flag in the [`AttemptContext`] allows exactly one shrink,
//! spent either on a logo that is larger than the image or on a first pass
//! where neither corner had space. Shrunk buffers live in the context, so a
//! retry never re-fetches or re-decodes anything, and concurrent decisions
//! share no state.

use image::DynamicImage;
use tracing::{debug, info};

use super::evaluator::{Corner, PlacementEvaluator};
use super::resize::ResizePolicy;
use crate::config::PlacerConfig;
use crate::core::{LogoSet, LogoVariant, RegionSampler};
use crate::error::PlacementResult;

/// Initial evaluation plus one retry with a shrunk logo.
pub const MAX_EVALUATION_PASSES: u32 = 2;

/// A successful decision: where, with which variant, and the logo to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub corner: Corner,
    pub x: u32,
    pub y: u32,
    pub variant: LogoVariant,
    pub logo_width: u32,
    pub logo_height: u32,
    /// Evaluation passes it took to reach this placement.
    pub passes: u32,
    /// The (possibly shrunk) rendering of `variant`.
    pub logo: DynamicImage,
}

/// Terminal output of the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementDecision {
    Placed(Placement),
    /// Neither corner qualified, even after the one permitted shrink.
    NoPlacementFound { passes: u32 },
}

impl PlacementDecision {
    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementDecision::Placed(_))
    }

    pub fn passes(&self) -> u32 {
        match self {
            PlacementDecision::Placed(p) => p.passes,
            PlacementDecision::NoPlacementFound { passes } => *passes,
        }
    }
}

/// Per-decision retry state: the current logo buffers and what was spent.
#[derive(Debug, Clone)]
pub struct AttemptContext {
    pub logos: LogoSet,
    pub tried: bool,
    pub passes: u32,
}

impl AttemptContext {
    pub fn new(logos: LogoSet) -> Self {
        Self {
            logos,
            tried: false,
            passes: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlacementOrchestrator {
    pub evaluator: PlacementEvaluator,
    pub resize: ResizePolicy,
}

impl PlacementOrchestrator {
    pub fn new(evaluator: PlacementEvaluator, resize: ResizePolicy) -> Self {
        Self { evaluator, resize }
    }

    pub fn from_config(config: &PlacerConfig) -> Self {
        Self::new(
            PlacementEvaluator::from_config(config),
            ResizePolicy::from_config(config),
        )
    }

    /// Decide where `logos` go on `image`.
    ///
    /// `Ok(NoPlacementFound)` is a normal outcome. Errors are resize failures
    /// or sampling bugs; they abort the decision.
    pub fn decide<S: RegionSampler + ?Sized>(
        &self,
        image: &S,
        logos: LogoSet,
    ) -> PlacementResult<PlacementDecision> {
        let (image_width, image_height) = image.dimensions();
        let mut ctx = AttemptContext::new(logos);

        while ctx.passes < MAX_EVALUATION_PASSES {
            let (logo_width, logo_height) = ctx.logos.dimensions();

            // CheckFit
            if !ctx.tried && (logo_width > image_width || logo_height > image_height) {
                info!(
                    logo_width,
                    logo_height, image_width, image_height, "Logo larger than image, shrinking once"
                );
                ctx.logos = self.resize.shrink_set(&ctx.logos)?;
                ctx.tried = true;
                continue;
            }

            // Evaluate
            ctx.passes += 1;
            debug!(pass = ctx.passes, logo_width, logo_height, "Evaluating corners");
            let evaluation = self.evaluator.evaluate(image, logo_width, logo_height)?;

            if let Some(candidate) = evaluation.as_ref().and_then(|e| e.first_free()) {
                info!(
                    corner = %candidate.corner,
                    x = candidate.x(),
                    y = candidate.y(),
                    variant = %candidate.recommended_variant,
                    "Logo placed"
                );
                return Ok(PlacementDecision::Placed(Placement {
                    corner: candidate.corner,
                    x: candidate.x(),
                    y: candidate.y(),
                    variant: candidate.recommended_variant,
                    logo_width,
                    logo_height,
                    passes: ctx.passes,
                    logo: ctx.logos.variant(candidate.recommended_variant).clone(),
                }));
            }

            info!("No suitable space for logo in either corner");
            if ctx.tried {
                break;
            }

            // Shrink, then re-enter Evaluate with the cached buffers
            ctx.logos = self.resize.shrink_set(&ctx.logos)?;
            ctx.tried = true;
        }

        Ok(PlacementDecision::NoPlacementFound { passes: ctx.passes })
    }
}
