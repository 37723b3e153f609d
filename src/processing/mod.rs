//! # Placement Processing Module
//!
//! Corner evaluation, the shrink policy, the bounded decision loop, and the
//! compositing/output step that consumes its result.

pub mod compose;
pub mod evaluator;
pub mod orchestrator;
pub mod resize;

// Re-export commonly used types for convenience
pub use compose::{ArtifactWriter, composite};
pub use evaluator::{
    Corner, CornerCandidate, Margins, PlacementEvaluation, PlacementEvaluator, VariantPolicy,
};
pub use orchestrator::{
    AttemptContext, MAX_EVALUATION_PASSES, Placement, PlacementDecision, PlacementOrchestrator,
};
pub use resize::{ResizePolicy, SHRINK_FACTOR};
