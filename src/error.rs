//! # Placement Error Handling
//!
//! Error types for the logo placer, featuring per-variant context, error
//! classification traits, and recovery metadata.
//!
//! ## Architecture
//!
//! - **Error Types**: one `PlacementError` variant per failure kind
//! - **Error Context**: timestamp, operation, recovery suggestion and severity
//! - **Error Traits**: `Retryable`, `Recoverable`, `HasSeverity`, `HasRecoverySuggestion`
//!
//! "No placement found" is deliberately absent: it is a legitimate outcome and
//! lives in [`crate::processing::PlacementDecision`].
//!
//! ## Usage
//!
//! ```rust
//! use logo_placer::error::{PlacementError, Retryable};
//!
//! let error = PlacementError::fetch("https://example.com/logo.png", "connection reset")
//!     .with_context("fetching light logo")
//!     .with_recovery_suggestion("Check that the logo URL is reachable");
//!
//! assert_eq!(error.category(), "fetch");
//! assert!(error.is_retryable());
//! ```

use std::{error::Error as StdError, fmt, time::SystemTime};

use crate::core::Region;

/// Severity levels for errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Debug-level errors that don't affect operation
    Debug,
    /// Informational errors
    Info,
    /// Warnings that may indicate potential issues
    Warning,
    /// Errors that abort one placement decision
    Error,
    /// Errors that indicate a bug in dimension bookkeeping
    Critical,
    /// Fatal errors that cannot be recovered from
    Fatal,
}

/// Metadata about when and where an error occurred
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// When the error occurred
    pub timestamp: SystemTime,
    /// The operation being performed when the error occurred
    pub operation: Option<String>,
    /// Additional context about the error
    pub context: Option<String>,
    /// Suggested recovery action
    pub recovery_suggestion: Option<String>,
    /// Error severity level
    pub severity: ErrorSeverity,
    /// Whether this error is retryable
    pub retryable: bool,
    /// Whether this error is recoverable
    pub recoverable: bool,
    /// Additional metadata as key-value pairs
    pub metadata: std::collections::HashMap<String, String>,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            timestamp: SystemTime::now(),
            operation: None,
            context: None,
            recovery_suggestion: None,
            severity: ErrorSeverity::Error,
            retryable: false,
            recoverable: false,
            metadata: std::collections::HashMap::new(),
        }
    }
}

impl ErrorContext {
    /// Create a new error context
    pub fn new() -> Self {
        Self::default()
    }

    fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }
}

/// Base error type for the logo placer
#[derive(Debug)]
pub enum PlacementError {
    /// Empty or missing image/logo reference, rejected before the core runs
    InputValidation {
        field: String,
        reason: String,
        context: ErrorContext,
    },
    /// Configuration validation errors
    Config {
        field: String,
        value: String,
        reason: String,
        context: ErrorContext,
    },
    /// Network or source failure while fetching bytes
    Fetch {
        reference: String,
        reason: String,
        source: Option<Box<dyn StdError + Send + Sync>>,
        context: ErrorContext,
    },
    /// Bytes could not be decoded into an image
    Decode {
        what: String,
        source: image::ImageError,
        context: ErrorContext,
    },
    /// A region reached past the image edge
    OutOfBounds {
        region: Region,
        image_width: u32,
        image_height: u32,
        context: ErrorContext,
    },
    /// The imaging capability could not produce a shrunk logo
    Resize {
        reason: String,
        source: Option<Box<dyn StdError + Send + Sync>>,
        context: ErrorContext,
    },
    /// I/O errors
    Io {
        operation: String,
        path: Option<String>,
        source: std::io::Error,
        context: ErrorContext,
    },
    /// External library errors
    External {
        library: String,
        source: Box<dyn StdError + Send + Sync>,
        context: ErrorContext,
    },
}

impl PlacementError {
    /// Create an input validation error
    pub fn input_validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InputValidation {
            field: field.into(),
            reason: reason.into(),
            context: ErrorContext::new().with_severity(ErrorSeverity::Warning),
        }
    }

    /// Create a configuration error
    pub fn config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Config {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a fetch error without an underlying source
    pub fn fetch(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            reference: reference.into(),
            reason: reason.into(),
            source: None,
            context: ErrorContext::new(),
        }
    }

    /// Create a fetch error wrapping the transport error
    pub fn fetch_with_source(
        reference: impl Into<String>,
        reason: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Fetch {
            reference: reference.into(),
            reason: reason.into(),
            source: Some(Box::new(source)),
            context: ErrorContext::new(),
        }
    }

    /// Create a decode error
    pub fn decode(what: impl Into<String>, source: image::ImageError) -> Self {
        Self::Decode {
            what: what.into(),
            source,
            context: ErrorContext::new(),
        }
    }

    /// Create an out-of-bounds error
    pub fn out_of_bounds(region: Region, image_width: u32, image_height: u32) -> Self {
        Self::OutOfBounds {
            region,
            image_width,
            image_height,
            context: ErrorContext::new().with_severity(ErrorSeverity::Critical),
        }
    }

    /// Create a resize error
    pub fn resize(reason: impl Into<String>) -> Self {
        Self::Resize {
            reason: reason.into(),
            source: None,
            context: ErrorContext::new(),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            path: None,
            source,
            context: ErrorContext::new(),
        }
    }

    /// Create an I/O error tied to a path
    pub fn io_at(
        operation: impl Into<String>,
        path: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation: operation.into(),
            path: Some(path.into()),
            source,
            context: ErrorContext::new(),
        }
    }

    /// Create an external library error
    pub fn external(
        library: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::External {
            library: library.into(),
            source: Box::new(source),
            context: ErrorContext::new(),
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context_mut().context = Some(context.into());
        self
    }

    /// Add operation context
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    /// Add recovery suggestion
    pub fn with_recovery_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context_mut().recovery_suggestion = Some(suggestion.into());
        self
    }

    /// Set severity
    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.context_mut().severity = severity;
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context_mut().metadata.insert(key.into(), value.into());
        self
    }

    /// Get the error context
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::InputValidation { context, .. } => context,
            Self::Config { context, .. } => context,
            Self::Fetch { context, .. } => context,
            Self::Decode { context, .. } => context,
            Self::OutOfBounds { context, .. } => context,
            Self::Resize { context, .. } => context,
            Self::Io { context, .. } => context,
            Self::External { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::InputValidation { context, .. } => context,
            Self::Config { context, .. } => context,
            Self::Fetch { context, .. } => context,
            Self::Decode { context, .. } => context,
            Self::OutOfBounds { context, .. } => context,
            Self::Resize { context, .. } => context,
            Self::Io { context, .. } => context,
            Self::External { context, .. } => context,
        }
    }

    /// Get the error category as a string
    pub fn category(&self) -> &'static str {
        match self {
            Self::InputValidation { .. } => "input_validation",
            Self::Config { .. } => "config",
            Self::Fetch { .. } => "fetch",
            Self::Decode { .. } => "decode",
            Self::OutOfBounds { .. } => "out_of_bounds",
            Self::Resize { .. } => "resize",
            Self::Io { .. } => "io",
            Self::External { .. } => "external",
        }
    }
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::InputValidation { field, reason, .. } => {
                write!(f, "Invalid input '{}': {}", field, reason)
            }
            PlacementError::Config {
                field,
                value,
                reason,
                ..
            } => {
                write!(
                    f,
                    "Configuration error in '{}': {} (value: {})",
                    field, reason, value
                )
            }
            PlacementError::Fetch {
                reference, reason, ..
            } => {
                write!(f, "Failed to fetch '{}': {}", reference, reason)
            }
            PlacementError::Decode { what, source, .. } => {
                write!(f, "Failed to decode {}: {}", what, source)
            }
            PlacementError::OutOfBounds {
                region,
                image_width,
                image_height,
                ..
            } => {
                write!(
                    f,
                    "Region {}x{} at ({}, {}) exceeds {}x{} image",
                    region.width, region.height, region.x, region.y, image_width, image_height
                )
            }
            PlacementError::Resize { reason, .. } => {
                write!(f, "Logo resize failed: {}", reason)
            }
            PlacementError::Io {
                operation,
                path,
                source,
                ..
            } => {
                if let Some(path) = path {
                    write!(
                        f,
                        "I/O error during {} on '{}': {}",
                        operation, path, source
                    )
                } else {
                    write!(f, "I/O error during {}: {}", operation, source)
                }
            }
            PlacementError::External {
                library, source, ..
            } => {
                write!(f, "External library error in {}: {}", library, source)
            }
        }
    }
}

impl StdError for PlacementError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::External { source, .. } => Some(source.as_ref()),
            Self::Fetch {
                source: Some(source),
                ..
            } => Some(source.as_ref()),
            Self::Resize {
                source: Some(source),
                ..
            } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Result type alias using our custom error type
pub type PlacementResult<T> = Result<T, PlacementError>;

/// Trait for errors that can be retried by the caller
pub trait Retryable {
    /// Check if this error can be retried
    fn is_retryable(&self) -> bool;

    /// Get the recommended retry delay in milliseconds
    fn retry_delay_ms(&self) -> Option<u64> {
        None
    }
}

impl Retryable for PlacementError {
    fn is_retryable(&self) -> bool {
        self.context().retryable || matches!(self, Self::Fetch { .. } | Self::Io { .. })
    }

    fn retry_delay_ms(&self) -> Option<u64> {
        match self {
            Self::Fetch { .. } => Some(2000),
            Self::Io { .. } => Some(100),
            _ => None,
        }
    }
}

/// Trait for errors that can be recovered from
pub trait Recoverable {
    /// Check if this error can be recovered from
    fn is_recoverable(&self) -> bool;

    /// Get recovery strategies for this error
    fn recovery_strategies(&self) -> Vec<RecoveryStrategy>;
}

/// Recovery strategies for handling errors
#[derive(Debug, Clone, PartialEq)]
pub enum RecoveryStrategy {
    /// Retry the operation
    Retry { max_attempts: usize, delay_ms: u64 },
    /// Use a fallback method
    Fallback { description: String },
    /// Fix the request and resubmit
    CorrectInput { field: String },
}

impl Recoverable for PlacementError {
    fn is_recoverable(&self) -> bool {
        self.context().recoverable
            || matches!(
                self,
                Self::Fetch { .. } | Self::InputValidation { .. } | Self::Resize { .. }
            )
    }

    fn recovery_strategies(&self) -> Vec<RecoveryStrategy> {
        match self {
            Self::Fetch { .. } => vec![RecoveryStrategy::Retry {
                max_attempts: 3,
                delay_ms: 2000,
            }],
            Self::InputValidation { field, .. } => vec![RecoveryStrategy::CorrectInput {
                field: field.clone(),
            }],
            Self::Resize { .. } => vec![RecoveryStrategy::Fallback {
                description: "Supply a pre-scaled logo".to_string(),
            }],
            _ => vec![],
        }
    }
}

/// Trait for errors with severity levels
pub trait HasSeverity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;
}

impl HasSeverity for PlacementError {
    fn severity(&self) -> ErrorSeverity {
        self.context().severity
    }
}

/// Trait for errors that provide recovery suggestions
pub trait HasRecoverySuggestion {
    /// Get recovery suggestion for this error
    fn recovery_suggestion(&self) -> Option<&str>;
}

impl HasRecoverySuggestion for PlacementError {
    fn recovery_suggestion(&self) -> Option<&str> {
        self.context().recovery_suggestion.as_deref()
    }
}

/// Error classification utilities
pub mod classify {
    use super::*;

    /// Errors caused by the caller's request rather than processing
    pub fn is_client_error(error: &PlacementError) -> bool {
        matches!(
            error,
            PlacementError::InputValidation { .. } | PlacementError::Config { .. }
        )
    }

    /// Errors that point at a bug in region bookkeeping
    pub fn is_invariant_violation(error: &PlacementError) -> bool {
        matches!(error, PlacementError::OutOfBounds { .. })
    }

    /// Check if an error requires user intervention
    pub fn requires_user_intervention(error: &PlacementError) -> bool {
        error.severity() >= ErrorSeverity::Critical
    }
}

/// Error conversion implementations
impl From<std::io::Error> for PlacementError {
    fn from(error: std::io::Error) -> Self {
        Self::io("unknown", error)
    }
}

impl From<image::ImageError> for PlacementError {
    fn from(error: image::ImageError) -> Self {
        Self::decode("image", error)
    }
}

impl From<serde_json::Error> for PlacementError {
    fn from(error: serde_json::Error) -> Self {
        Self::external("serde_json", error)
    }
}

impl From<logo_scale::cpu::ScaleError> for PlacementError {
    fn from(error: logo_scale::cpu::ScaleError) -> Self {
        Self::Resize {
            reason: error.to_string(),
            source: Some(Box::new(error)),
            context: ErrorContext::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = PlacementError::input_validation("image", "must not be empty");
        assert_eq!(error.category(), "input_validation");
        assert!(!error.is_retryable());
        assert!(classify::is_client_error(&error));
        assert_eq!(error.to_string(), "Invalid input 'image': must not be empty");
    }

    #[test]
    fn test_error_with_context() {
        let error = PlacementError::resize("zero sized target")
            .with_operation("shrink_logo")
            .with_context("second pass")
            .with_recovery_suggestion("supply a larger logo")
            .with_metadata("width", "0");

        assert_eq!(error.category(), "resize");
        assert_eq!(error.context().operation.as_deref(), Some("shrink_logo"));
        assert_eq!(error.recovery_suggestion(), Some("supply a larger logo"));
        assert_eq!(error.context().metadata.get("width").map(String::as_str), Some("0"));
    }

    #[test]
    fn test_error_traits() {
        let fetch = PlacementError::fetch("https://x/logo.png", "timed out");
        assert!(fetch.is_retryable());
        assert_eq!(fetch.retry_delay_ms(), Some(2000));
        assert!(fetch.is_recoverable());
        assert_eq!(fetch.recovery_strategies().len(), 1);
    }

    #[test]
    fn test_out_of_bounds_is_critical() {
        let error = PlacementError::out_of_bounds(Region::new(95, 5, 10, 10), 100, 100);
        assert_eq!(error.severity(), ErrorSeverity::Critical);
        assert!(classify::is_invariant_violation(&error));
        assert!(classify::requires_user_intervention(&error));
        assert_eq!(error.to_string(), "Region 10x10 at (95, 5) exceeds 100x100 image");
    }

    #[test]
    fn test_scale_error_converts_to_resize() {
        let scale = logo_scale::cpu::ScaleError::BufferTooSmall { needed: 16, got: 4 };
        let error: PlacementError = scale.into();
        assert_eq!(error.category(), "resize");
        assert!(error.source().is_some());
    }
}
