//! # Logo Placer Library
//!
//! Decides where to put a brand logo on an arbitrary background photo, picks
//! the light or dark logo for contrast, and shrinks the logo once when no
//! spot qualifies.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//! - `core`: Region sampling, colour uniformity and brightness analysis
//! - `processing`: Corner evaluation, resize policy, the decision loop, compositing
//! - `source`: Fetching image bytes from URLs, files and data URIs
//! - `config`: Configuration and validation
//! - `session`: Request validation and end-to-end orchestration
//! - `server`: The HTTP service around a session (`POST /placeLogo`, image hosting)
//!
//! ## Decision Overview
//!
//! 1. Check that the logo fits the image at all; otherwise shrink it once
//! 2. Evaluate the top-left and top-right corners (5px margin) for a
//!    near-constant colour
//! 3. Place in the first free corner, choosing the variant by brightness
//! 4. If neither is free, shrink to 75% and evaluate once more
//! 5. Otherwise report that no suitable location exists
//!
//! ## Example
//!
//! ```rust,no_run
//! use logo_placer::{PlacementOutcome, PlacementRequest, PlacementSession};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = PlacementSession::builder().build()?;
//! let request = PlacementRequest::new("https://example.com/photo.jpeg", "./logo-light.png")
//!     .with_dark_logo("./logo-dark.png");
//!
//! match session.place(&request).await {
//!     Some(PlacementOutcome::Placed(artifact)) => println!("{}", artifact.url),
//!     Some(PlacementOutcome::NoPlacementFound) => println!("no suitable location"),
//!     None => println!("processing failed"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod processing;
pub mod server;
pub mod session;
pub mod source;

/// Re-export error types for convenience
pub use error::{
    HasRecoverySuggestion, HasSeverity, PlacementError, PlacementResult, Recoverable, Retryable,
};

pub use config::PlacerConfig;
pub use core::{LogoSet, LogoVariant, Region, RegionSampler};
pub use processing::{Corner, PlacementDecision, PlacementOrchestrator, VariantPolicy};
pub use session::{PlacedArtifact, PlacementOutcome, PlacementRequest, PlacementSession};
