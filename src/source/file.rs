//! Local file reads.

use async_trait::async_trait;

use super::ImageSource;
use crate::error::{PlacementError, PlacementResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

#[async_trait]
impl ImageSource for FileSource {
    async fn fetch(&self, reference: &str) -> PlacementResult<Vec<u8>> {
        let path = reference.strip_prefix("file://").unwrap_or(reference);
        tokio::fs::read(path)
            .await
            .map_err(|e| PlacementError::fetch_with_source(reference, e.to_string(), e))
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
