//! # Compositing and Artifact Output
//!
//! Draws the decided logo onto the base image and writes the result under a
//! generated name (`<millis>-<suffix>.jpg`, suffix below
//! [`ARTIFACT_SUFFIX_BOUND`]).

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::{DynamicImage, ImageFormat, imageops};
use rand::Rng;
use tracing::debug;

use crate::config::PlacerConfig;
use crate::error::{PlacementError, PlacementResult};

/// Exclusive upper bound of the random file-name suffix.
pub const ARTIFACT_SUFFIX_BOUND: u32 = 16_545;

/// Extension of every generated artifact.
pub const ARTIFACT_EXTENSION: &str = "jpg";

/// Alpha-composite `logo` over a copy of `base` with its top-left at (`x`, `y`).
pub fn composite(base: &DynamicImage, logo: &DynamicImage, x: u32, y: u32) -> DynamicImage {
    let mut canvas = base.to_rgba8();
    imageops::overlay(&mut canvas, &logo.to_rgba8(), x as i64, y as i64);
    DynamicImage::ImageRgba8(canvas)
}

/// File name for an artifact created at `millis` with random `suffix`.
pub fn artifact_name(millis: u128, suffix: u32) -> String {
    format!("{}-{}.{}", millis, suffix, ARTIFACT_EXTENSION)
}

/// Generates artifact paths and writes composited images to them.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
    public_base_url: String,
    public_route: String,
}

impl ArtifactWriter {
    /// Writer serving `output_dir` as `<public_base_url>/images`.
    pub fn new(output_dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            public_base_url: public_base_url.into(),
            public_route: "images".to_string(),
        }
    }

    pub fn with_public_route(mut self, route: impl Into<String>) -> Self {
        self.public_route = route.into().trim_matches('/').to_string();
        self
    }

    pub fn from_config(config: &PlacerConfig) -> Self {
        Self::new(&config.output_dir, &config.public_base_url)
            .with_public_route(config.public_route())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// A fresh path inside the output directory.
    pub fn next_path(&self) -> PathBuf {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let suffix = rand::rng().random_range(0..ARTIFACT_SUFFIX_BOUND);
        self.output_dir.join(artifact_name(millis, suffix))
    }

    /// Encode `image` as JPEG at `path`, creating the parent directory.
    pub fn write(&self, image: &DynamicImage, path: &Path) -> PlacementResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlacementError::io_at("create_output_dir", parent.display().to_string(), e)
            })?;
        }
        // JPEG has no alpha channel
        DynamicImage::ImageRgb8(image.to_rgb8())
            .save_with_format(path, ImageFormat::Jpeg)
            .map_err(|e| {
                PlacementError::external("image", e)
                    .with_operation("write_artifact")
                    .with_context(path.display().to_string())
            })?;
        debug!(path = %path.display(), "Wrote artifact");
        Ok(())
    }

    /// Route the output directory is served under, without slashes.
    pub fn public_route(&self) -> &str {
        &self.public_route
    }

    /// URL under which the artifact at `path` is served.
    ///
    /// Only the file name is published; where `output_dir` lives on disk
    /// never shows up in the URL.
    pub fn public_url(&self, path: &Path) -> String {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        format!(
            "{}/{}/{}",
            self.public_base_url.trim_end_matches('/'),
            self.public_route,
            file_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn composite_respects_alpha_and_position() {
        let base = DynamicImage::ImageRgb8(RgbImage::from_pixel(20, 20, Rgb([255, 255, 255])));
        let mut logo = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        logo.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        let out = composite(&base, &DynamicImage::ImageRgba8(logo), 5, 5);

        assert_eq!(out.dimensions(), (20, 20));
        assert_eq!(out.get_pixel(5, 5), Rgba([255, 255, 255, 255]));
        assert_eq!(out.get_pixel(6, 6), Rgba([0, 0, 0, 255]));
        assert_eq!(out.get_pixel(10, 10), Rgba([255, 255, 255, 255]));
        // base left untouched
        assert_eq!(base.get_pixel(6, 6), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn artifact_names_are_jpg() {
        assert_eq!(artifact_name(1726070810105, 42), "1726070810105-42.jpg");
    }

    #[test]
    fn next_path_stays_in_output_dir() {
        let writer = ArtifactWriter::new("images", "http://localhost:3000/");
        let path = writer.next_path();
        assert_eq!(path.parent(), Some(Path::new("images")));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("jpg"));
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap();
        let suffix: u32 = stem.rsplit('-').next().unwrap().parse().unwrap();
        assert!(suffix < ARTIFACT_SUFFIX_BOUND);
    }

    #[test]
    fn public_url_joins_cleanly() {
        let writer = ArtifactWriter::new("images", "http://localhost:3000/");
        assert_eq!(
            writer.public_url(Path::new("images/1-2.jpg")),
            "http://localhost:3000/images/1-2.jpg"
        );
        let writer = ArtifactWriter::new("./images", "https://cdn.example.com")
            .with_public_route("/static/logos/");
        assert_eq!(
            writer.public_url(Path::new("./images/1-2.jpg")),
            "https://cdn.example.com/static/logos/1-2.jpg"
        );
    }

    #[test]
    fn public_url_hides_absolute_output_dir() {
        let writer = ArtifactWriter::new("/var/www/images", "http://localhost:3000/");
        let path = writer.next_path();
        let url = writer.public_url(&path);
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap();

        assert_eq!(url, format!("http://localhost:3000/images/{}", file_name));
        assert!(!url.contains("/var/www"));
        assert!(!url.contains("//images"));
    }

    #[test]
    fn write_creates_directory_and_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path().join("nested"), "http://localhost:3000/");
        let path = writer.next_path();
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 128])));
        writer.write(&img, &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.dimensions(), (8, 8));
    }
}
