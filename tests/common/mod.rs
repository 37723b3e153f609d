//! Common test utilities and helpers for the logo placer tests
//!
//! Synthetic backgrounds and logos, PNG encoding, and an in-memory image
//! source that records what was fetched.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use logo_placer::error::{PlacementError, PlacementResult};
use logo_placer::source::ImageSource;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Background filled with a single colour.
pub fn solid(width: u32, height: u32, color: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width, height, color)
}

/// Opaque logo of a single grey level.
pub fn logo(width: u32, height: u32, level: u8) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([level, level, level, 255]),
    ))
}

/// Encode as PNG bytes, as a source would return them.
pub fn png_bytes(image: &DynamicImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .expect("PNG encoding");
    out.into_inner()
}

/// In-memory source keyed by reference.
#[derive(Default)]
pub struct MemorySource {
    entries: HashMap<String, Vec<u8>>,
    fetched: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, reference: &str, image: &DynamicImage) -> Self {
        self.entries.insert(reference.to_string(), png_bytes(image));
        self
    }

    pub fn with_bytes(mut self, reference: &str, bytes: Vec<u8>) -> Self {
        self.entries.insert(reference.to_string(), bytes);
        self
    }

    /// References fetched so far, in order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageSource for MemorySource {
    async fn fetch(&self, reference: &str) -> PlacementResult<Vec<u8>> {
        self.fetched.lock().unwrap().push(reference.to_string());
        self.entries
            .get(reference)
            .cloned()
            .ok_or_else(|| PlacementError::fetch(reference, "404 Not Found"))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Shares a `MemorySource` between the session and the test body.
pub struct SharedSource(pub std::sync::Arc<MemorySource>);

#[async_trait]
impl ImageSource for SharedSource {
    async fn fetch(&self, reference: &str) -> PlacementResult<Vec<u8>> {
        self.0.fetch(reference).await
    }

    fn name(&self) -> &'static str {
        "shared-memory"
    }
}
