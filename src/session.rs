//! # Placement Session
//!
//! End-to-end handling of one placement request:
//! 1. **Validate**: reject empty image/logo references
//! 2. **Fetch**: image, light logo, then the dark logo if one was given
//! 3. **Decode**: bytes into images
//! 4. **Decide**: run the [`PlacementOrchestrator`]
//! 5. **Output**: composite and write the artifact
//!
//! Steps run strictly one after another. Fetches are awaited; the CPU-bound
//! steps run on tokio's blocking pool so they never stall the executor. Each
//! call to [`PlacementSession::place`] works on its own buffers, so a session
//! can serve concurrent requests.
//!
//! Two failure modes stay distinct: [`PlacementOutcome::NoPlacementFound`]
//! means the images were fine but no corner qualified; `None` from `place`
//! (or `Err` from `try_place`) means processing itself failed.

use std::path::PathBuf;

use image::DynamicImage;
use tokio::task;
use tracing::{error, info};

use crate::config::PlacerConfig;
use crate::core::{LogoSet, LogoVariant};
use crate::error::{HasRecoverySuggestion, HasSeverity, PlacementError, PlacementResult};
use crate::processing::{
    ArtifactWriter, Corner, PlacementDecision, PlacementOrchestrator, composite,
};
use crate::source::{ImageSource, RoutingSource};

/// References to the images of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRequest {
    /// Background photo.
    pub image: String,
    /// Logo rendered for dark backgrounds; mandatory.
    pub light_logo: String,
    /// Logo rendered for light backgrounds; the light logo stands in when absent.
    pub dark_logo: Option<String>,
}

impl PlacementRequest {
    pub fn new(image: impl Into<String>, light_logo: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            light_logo: light_logo.into(),
            dark_logo: None,
        }
    }

    pub fn with_dark_logo(mut self, dark_logo: impl Into<String>) -> Self {
        self.dark_logo = Some(dark_logo.into());
        self
    }

    /// Reject empty references before anything is fetched.
    pub fn validate(&self) -> PlacementResult<()> {
        if self.image.trim().is_empty() {
            return Err(PlacementError::input_validation("image", "Please enter valid image"));
        }
        if self.light_logo.trim().is_empty() {
            return Err(PlacementError::input_validation("logo", "Please enter valid logo"));
        }
        if self.dark_logo.as_deref().is_some_and(|d| d.trim().is_empty()) {
            return Err(PlacementError::input_validation(
                "dark_logo",
                "Dark logo reference must not be empty when given",
            ));
        }
        Ok(())
    }
}

/// A written artifact and the placement it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedArtifact {
    pub path: PathBuf,
    pub url: String,
    pub corner: Corner,
    pub x: u32,
    pub y: u32,
    pub variant: LogoVariant,
    pub logo_width: u32,
    pub logo_height: u32,
    pub passes: u32,
}

/// Result of a request that was processed without errors.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementOutcome {
    Placed(PlacedArtifact),
    NoPlacementFound,
}

impl PlacementOutcome {
    /// Response document for the caller: `{ "image": url }` or an error message.
    pub fn to_response(&self) -> serde_json::Value {
        match self {
            PlacementOutcome::Placed(artifact) => serde_json::json!({ "image": artifact.url }),
            PlacementOutcome::NoPlacementFound => {
                serde_json::json!({ "error": "no suitable location for logo" })
            }
        }
    }
}

/// Response document for a request whose processing failed.
pub fn failure_response() -> serde_json::Value {
    serde_json::json!({ "error": "processing failed" })
}

/// High-level session that fetches, decides, and writes.
pub struct PlacementSession {
    source: Box<dyn ImageSource>,
    orchestrator: PlacementOrchestrator,
    writer: ArtifactWriter,
}

impl PlacementSession {
    /// Create a new placement session using the builder pattern.
    pub fn builder() -> PlacementSessionBuilder {
        PlacementSessionBuilder::new()
    }

    pub fn writer(&self) -> &ArtifactWriter {
        &self.writer
    }

    /// Process `request`, logging any failure and reporting it as `None`.
    pub async fn place(&self, request: &PlacementRequest) -> Option<PlacementOutcome> {
        match self.try_place(request).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!(
                    category = e.category(),
                    severity = ?e.severity(),
                    suggestion = e.recovery_suggestion().unwrap_or(""),
                    "Error fetching or processing the images: {}",
                    e
                );
                None
            }
        }
    }

    /// Process `request`, propagating failures.
    ///
    /// Fetches are awaited in order; decoding, the decision, compositing and
    /// the JPEG write then run on the blocking pool.
    pub async fn try_place(&self, request: &PlacementRequest) -> PlacementResult<PlacementOutcome> {
        request.validate()?;

        let image = self.fetch("image", &request.image).await?;
        let light = self.fetch("light logo", &request.light_logo).await?;
        let dark = match &request.dark_logo {
            Some(reference) => Some(self.fetch("dark logo", reference).await?),
            None => None,
        };

        let orchestrator = self.orchestrator.clone();
        let writer = self.writer.clone();
        task::spawn_blocking(move || render(&orchestrator, &writer, image, light, dark))
            .await
            .map_err(|e| PlacementError::external("tokio", e).with_operation("placement_task"))?
    }

    async fn fetch(&self, what: &str, reference: &str) -> PlacementResult<Vec<u8>> {
        self.source
            .fetch(reference)
            .await
            .map_err(|e| e.with_context(format!("fetching {} via {}", what, self.source.name())))
    }
}

fn decode(what: &str, bytes: &[u8]) -> PlacementResult<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| PlacementError::decode(what, e))
}

/// Decode, decide, composite and write. Blocking.
fn render(
    orchestrator: &PlacementOrchestrator,
    writer: &ArtifactWriter,
    image: Vec<u8>,
    light: Vec<u8>,
    dark: Option<Vec<u8>>,
) -> PlacementResult<PlacementOutcome> {
    let image = decode("image", &image)?;
    let light = decode("light logo", &light)?;
    let dark = dark.map(|bytes| decode("dark logo", &bytes)).transpose()?;

    let placement = match orchestrator.decide(&image, LogoSet::new(light, dark))? {
        PlacementDecision::Placed(placement) => placement,
        PlacementDecision::NoPlacementFound { passes } => {
            info!(passes, "No suitable location for logo");
            return Ok(PlacementOutcome::NoPlacementFound);
        }
    };

    let output = composite(&image, &placement.logo, placement.x, placement.y);
    let path = writer.next_path();
    writer.write(&output, &path)?;
    let url = writer.public_url(&path);
    info!(path = %path.display(), corner = %placement.corner, "Logo placed and saved");

    Ok(PlacementOutcome::Placed(PlacedArtifact {
        path,
        url,
        corner: placement.corner,
        x: placement.x,
        y: placement.y,
        variant: placement.variant,
        logo_width: placement.logo_width,
        logo_height: placement.logo_height,
        passes: placement.passes,
    }))
}

/// Builder for creating placement sessions with fluent API.
pub struct PlacementSessionBuilder {
    config: PlacerConfig,
    source: Option<Box<dyn ImageSource>>,
}

impl PlacementSessionBuilder {
    /// Create a new session builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: PlacerConfig::default(),
            source: None,
        }
    }

    /// Use `config` for analysis, resizing and output.
    pub fn with_config(mut self, config: PlacerConfig) -> Self {
        self.config = config;
        self
    }

    /// Fetch through `source` instead of the scheme-routing default.
    pub fn with_source<S: ImageSource + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Validate the configuration and build the session.
    pub fn build(self) -> PlacementResult<PlacementSession> {
        self.config
            .validate()
            .map_err(|reason| PlacementError::config("placer", format!("{:?}", self.config), reason))?;

        let source = match self.source {
            Some(source) => source,
            None => Box::new(RoutingSource::from_config(&self.config)?),
        };

        Ok(PlacementSession {
            source,
            orchestrator: PlacementOrchestrator::from_config(&self.config),
            writer: ArtifactWriter::from_config(&self.config),
        })
    }
}

impl Default for PlacementSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_rejected() {
        let err = PlacementRequest::new("", "logo.png").validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid input 'image': Please enter valid image");

        let err = PlacementRequest::new("photo.jpg", "   ").validate().unwrap_err();
        assert_eq!(err.category(), "input_validation");

        let err = PlacementRequest::new("photo.jpg", "logo.png")
            .with_dark_logo("")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("dark_logo"));

        assert!(PlacementRequest::new("photo.jpg", "logo.png").validate().is_ok());
    }

    #[test]
    fn responses_distinguish_outcomes() {
        assert_eq!(
            PlacementOutcome::NoPlacementFound.to_response(),
            serde_json::json!({ "error": "no suitable location for logo" })
        );
        assert_ne!(PlacementOutcome::NoPlacementFound.to_response(), failure_response());
    }

    #[test]
    fn invalid_config_fails_build() {
        let config = PlacerConfig {
            scale_factor: 2.0,
            ..PlacerConfig::default()
        };
        let err = PlacementSession::builder().with_config(config).build().err().unwrap();
        assert_eq!(err.category(), "config");
    }
}
