//! Logo variants and the set of buffers a placement works with.

use image::{DynamicImage, GenericImageView};

/// Which rendering of the logo to overlay.
///
/// `Light` is drawn for dark backgrounds, `Dark` for light backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogoVariant {
    Light,
    Dark,
}

impl LogoVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogoVariant::Light => "light",
            LogoVariant::Dark => "dark",
        }
    }
}

impl std::fmt::Display for LogoVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The light logo (always present) plus an optional dark rendering.
///
/// A missing dark logo resolves to the light one. Logical dimensions come
/// from the dark logo when it was supplied, else from the light one; both
/// renderings are assumed to share them.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoSet {
    light: DynamicImage,
    dark: Option<DynamicImage>,
}

impl LogoSet {
    pub fn new(light: DynamicImage, dark: Option<DynamicImage>) -> Self {
        Self { light, dark }
    }

    pub fn light(&self) -> &DynamicImage {
        &self.light
    }

    /// The dark rendering, falling back to the light one.
    pub fn dark(&self) -> &DynamicImage {
        self.dark.as_ref().unwrap_or(&self.light)
    }

    pub fn has_dark(&self) -> bool {
        self.dark.is_some()
    }

    pub fn variant(&self, variant: LogoVariant) -> &DynamicImage {
        match variant {
            LogoVariant::Light => self.light(),
            LogoVariant::Dark => self.dark(),
        }
    }

    /// Width and height used for fit checks and corner regions.
    pub fn dimensions(&self) -> (u32, u32) {
        self.dark().dimensions()
    }

    /// Apply `f` to every rendering that is actually present.
    pub fn try_map<E>(
        &self,
        mut f: impl FnMut(&DynamicImage) -> Result<DynamicImage, E>,
    ) -> Result<LogoSet, E> {
        let light = f(&self.light)?;
        let dark = match &self.dark {
            Some(dark) => Some(f(dark)?),
            None => None,
        };
        Ok(LogoSet { light, dark })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn logo(w: u32, h: u32, v: u8) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([v, v, v, 255])))
    }

    #[test]
    fn missing_dark_falls_back_to_light() {
        let set = LogoSet::new(logo(10, 4, 255), None);
        assert!(!set.has_dark());
        assert_eq!(set.variant(LogoVariant::Dark), set.light());
        assert_eq!(set.dimensions(), (10, 4));
    }

    #[test]
    fn dimensions_follow_dark_logo() {
        let set = LogoSet::new(logo(10, 4, 255), Some(logo(12, 6, 0)));
        assert_eq!(set.dimensions(), (12, 6));
        assert_eq!(set.variant(LogoVariant::Light).dimensions(), (10, 4));
    }

    #[test]
    fn try_map_preserves_absence() {
        let set = LogoSet::new(logo(10, 4, 255), None);
        let mapped: Result<_, ()> = set.try_map(|img| Ok(img.thumbnail_exact(5, 2)));
        let mapped = mapped.unwrap();
        assert!(!mapped.has_dark());
        assert_eq!(mapped.dimensions(), (5, 2));
    }
}
