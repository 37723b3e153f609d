//! Inline `data:` URIs carrying base64 image bytes.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};

use super::ImageSource;
use crate::error::{PlacementError, PlacementResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct DataUriSource;

impl DataUriSource {
    /// Decode `data:<mime>;base64,<payload>` into bytes.
    pub fn decode(reference: &str) -> PlacementResult<Vec<u8>> {
        let rest = reference
            .get(..5)
            .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
            .map(|_| &reference[5..])
            .ok_or_else(|| PlacementError::fetch(abbreviate(reference), "not a data URI"))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| PlacementError::fetch(abbreviate(reference), "data URI has no payload"))?;
        if !meta.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
            return Err(PlacementError::fetch(
                abbreviate(reference),
                "only base64 data URIs are supported",
            ));
        }
        general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| PlacementError::fetch_with_source(abbreviate(reference), "invalid base64", e))
    }
}

// Keep multi-megabyte payloads out of error messages.
fn abbreviate(reference: &str) -> String {
    match reference.char_indices().nth(48) {
        Some((idx, _)) => format!("{}...", &reference[..idx]),
        None => reference.to_string(),
    }
}

#[async_trait]
impl ImageSource for DataUriSource {
    async fn fetch(&self, reference: &str) -> PlacementResult<Vec<u8>> {
        Self::decode(reference)
    }

    fn name(&self) -> &'static str {
        "data-uri"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_base64_payload() {
        let encoded = general_purpose::STANDARD.encode([0x89u8, b'P', b'N', b'G']);
        let uri = format!("data:image/png;base64,{}", encoded);
        assert_eq!(DataUriSource::decode(&uri).unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn rejects_plain_data_uri() {
        let err = DataUriSource::decode("data:text/plain,hello").unwrap_err();
        assert!(err.to_string().contains("only base64"));
    }

    #[test]
    fn rejects_missing_payload_and_bad_base64() {
        assert!(DataUriSource::decode("data:image/png;base64").is_err());
        assert!(DataUriSource::decode("data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn long_references_are_abbreviated() {
        let uri = format!("data:image/png;base64,{}", "A".repeat(500));
        let short = abbreviate(&uri);
        assert!(short.len() < 60);
        assert!(short.ends_with("..."));
    }
}
