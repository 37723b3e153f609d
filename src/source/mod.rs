//! # Image Sources
//!
//! Fetching raw image bytes by reference. The placement core never fetches
//! anything itself; sessions hand it already-decoded buffers obtained
//! through an [`ImageSource`].
//!
//! - [`HttpSource`]: `http://` and `https://` URLs via reqwest
//! - [`FileSource`]: local paths, with or without a `file://` prefix
//! - [`DataUriSource`]: inline `data:<mime>;base64,<payload>` references
//! - [`RoutingSource`]: picks one of the above by scheme

pub mod data_uri;
pub mod file;
pub mod http;

use async_trait::async_trait;

use crate::config::PlacerConfig;
use crate::error::PlacementResult;

pub use data_uri::DataUriSource;
pub use file::FileSource;
pub use http::HttpSource;

/// Abstract interface for anything that can turn a reference into bytes.
///
/// Implementations own their timeout/retry policy.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetch the raw, still-encoded bytes behind `reference`.
    async fn fetch(&self, reference: &str) -> PlacementResult<Vec<u8>>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Which backend a reference is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Http,
    DataUri,
    File,
}

impl SourceKind {
    pub fn of(reference: &str) -> Self {
        let lower = reference.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceKind::Http
        } else if lower.starts_with("data:") {
            SourceKind::DataUri
        } else {
            SourceKind::File
        }
    }
}

/// Dispatches each reference to the matching backend.
pub struct RoutingSource {
    http: HttpSource,
    file: FileSource,
    data: DataUriSource,
}

impl RoutingSource {
    pub fn new(http: HttpSource) -> Self {
        Self {
            http,
            file: FileSource,
            data: DataUriSource,
        }
    }

    pub fn from_config(config: &PlacerConfig) -> PlacementResult<Self> {
        Ok(Self::new(HttpSource::new(config.fetch_timeout())?))
    }
}

#[async_trait]
impl ImageSource for RoutingSource {
    async fn fetch(&self, reference: &str) -> PlacementResult<Vec<u8>> {
        match SourceKind::of(reference) {
            SourceKind::Http => self.http.fetch(reference).await,
            SourceKind::DataUri => self.data.fetch(reference).await,
            SourceKind::File => self.file.fetch(reference).await,
        }
    }

    fn name(&self) -> &'static str {
        "routing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_by_scheme() {
        assert_eq!(SourceKind::of("https://images.pexels.com/p.jpeg"), SourceKind::Http);
        assert_eq!(SourceKind::of("HTTP://host/x.png"), SourceKind::Http);
        assert_eq!(SourceKind::of("data:image/png;base64,AAAA"), SourceKind::DataUri);
        assert_eq!(SourceKind::of("./logo.jpeg"), SourceKind::File);
        assert_eq!(SourceKind::of("file:///tmp/logo.png"), SourceKind::File);
    }

    #[tokio::test]
    async fn routing_reads_data_uri_and_file() {
        let source = RoutingSource::new(HttpSource::new(std::time::Duration::from_secs(1)).unwrap());
        assert_eq!(source.fetch("data:text/plain;base64,aGk=").await.unwrap(), b"hi");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bytes.bin");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();
        let fetched = source.fetch(path.to_str().unwrap()).await.unwrap();
        assert_eq!(fetched, vec![1, 2, 3]);
    }
}
