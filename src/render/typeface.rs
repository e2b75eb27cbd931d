//! Font loading and text measurement.
//!
//! Outline fonts (TrueType/OpenType) are rasterized with `ab_glyph` through
//! `imageproc`. When no outline font can be loaded the renderer degrades to
//! the built-in 10x20 bitmap font from `embedded-graphics`, which covers
//! printable ASCII only (other characters draw as `?`).

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Point, Size};
use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::{Drawable, Pixel};
use image::{Rgb, RgbImage};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{BotError, Result};

/// Fonts tried, in order, when no font path is configured.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Pixel extent of a single line of text.
pub trait TextMeasure {
    /// `(width, height)` of `text` rendered on one line.
    fn measure(&self, text: &str) -> (u32, u32);
}

/// A font the renderer can measure and draw with.
pub enum Typeface {
    /// Scalable font rasterized at `scale`.
    Outline {
        /// Parsed font data.
        font: FontVec,
        /// Pixel size.
        scale: PxScale,
    },
    /// Fixed-size bitmap font.
    Builtin(&'static MonoFont<'static>),
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline { scale, .. } => f
                .debug_struct("Outline")
                .field("scale", &scale.y)
                .finish_non_exhaustive(),
            Self::Builtin(font) => f
                .debug_tuple("Builtin")
                .field(&format_args!(
                    "{}x{}",
                    font.character_size.width, font.character_size.height
                ))
                .finish(),
        }
    }
}

impl Typeface {
    /// The built-in bitmap font.
    pub fn builtin() -> Self {
        Self::Builtin(&FONT_10X20)
    }

    /// Parse outline font bytes at `size` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Render`] when the data is not a usable font.
    pub fn from_bytes(data: Vec<u8>, size: f32) -> Result<Self> {
        let font = FontVec::try_from_vec(data)
            .map_err(|e| BotError::Render(format!("invalid font data: {e}")))?;
        Ok(Self::Outline {
            font,
            scale: PxScale::from(size),
        })
    }

    /// Load the configured font, or a known system font when `path` is `None`.
    ///
    /// Never fails: an unreadable or invalid font is logged and replaced by
    /// the built-in bitmap font.
    pub fn load(path: Option<&Path>, size: f32) -> Self {
        match path {
            Some(path) => match std::fs::read(path)
                .map_err(BotError::from)
                .and_then(|data| Self::from_bytes(data, size))
            {
                Ok(face) => {
                    debug!("loaded font {}", path.display());
                    face
                }
                Err(e) => {
                    warn!(
                        "font {} unavailable ({e}); rendering with built-in font",
                        path.display()
                    );
                    Self::builtin()
                }
            },
            None => {
                for candidate in SYSTEM_FONT_CANDIDATES {
                    let Ok(data) = std::fs::read(candidate) else {
                        continue;
                    };
                    if let Ok(face) = Self::from_bytes(data, size) {
                        debug!("using system font {candidate}");
                        return face;
                    }
                }
                warn!("no font configured or found; rendering with built-in font");
                Self::builtin()
            }
        }
    }

    /// Whether this is the degraded built-in font.
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    pub fn draw(&self, image: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        match self {
            Self::Outline { font, scale } => {
                imageproc::drawing::draw_text_mut(image, color, x, y, *scale, font, text);
            }
            Self::Builtin(mono) => {
                let style = MonoTextStyle::new(mono, Rgb888::new(color[0], color[1], color[2]));
                let mut target = ImageTarget(image);
                // Drawing into an image buffer is infallible.
                let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
                    .draw(&mut target);
            }
        }
    }
}

impl TextMeasure for Typeface {
    fn measure(&self, text: &str) -> (u32, u32) {
        match self {
            Self::Outline { font, scale } => {
                let scaled = font.as_scaled(*scale);
                let mut width = 0.0f32;
                let mut prev = None;
                for c in text.chars() {
                    let id = scaled.glyph_id(c);
                    if let Some(prev) = prev {
                        width += scaled.kern(prev, id);
                    }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                (width.max(0.0).ceil() as u32, scaled.height().ceil() as u32)
            }
            Self::Builtin(mono) => {
                let count = text.chars().count() as u32;
                let advance = mono.character_size.width + mono.character_spacing;
                let width = (count * advance).saturating_sub(mono.character_spacing);
                (width, mono.character_size.height)
            }
        }
    }
}

/// `embedded-graphics` draw target over an RGB image buffer.
struct ImageTarget<'a>(&'a mut RgbImage);

impl DrawTarget for ImageTarget<'_> {
    type Color = Rgb888;
    type Error = std::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> std::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < self.0.width() && y < self.0.height() {
                self.0.put_pixel(x, y, Rgb([color.r(), color.g(), color.b()]));
            }
        }
        Ok(())
    }
}

impl OriginDimensions for ImageTarget<'_> {
    fn size(&self) -> Size {
        Size::new(self.0.width(), self.0.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_measures_fixed_width() {
        let face = Typeface::builtin();
        assert_eq!(face.measure("abc"), (30, 20));
        assert_eq!(face.measure(" "), (10, 20));
        assert_eq!(face.measure(""), (0, 20));
        // One glyph per char, even outside ASCII.
        assert_eq!(face.measure("é✨"), (20, 20));
    }

    #[test]
    fn missing_font_degrades_to_builtin() {
        let face = Typeface::load(Some(Path::new("/nonexistent/font.ttf")), 48.0);
        assert!(face.is_builtin());
    }

    #[test]
    fn invalid_font_data_degrades_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        assert!(Typeface::from_bytes(b"nope".to_vec(), 48.0).is_err());
        assert!(Typeface::load(Some(&path), 48.0).is_builtin());
    }

    #[test]
    fn builtin_draw_changes_pixels_inside_bounds_only() {
        let bg = Rgb([0, 0, 0]);
        let fg = Rgb([255, 255, 255]);
        let mut image = RgbImage::from_pixel(40, 30, bg);
        let face = Typeface::builtin();

        // Partly off-canvas on the left and bottom; must not panic.
        face.draw(&mut image, -5, 15, "HI", fg);
        face.draw(&mut image, 5, 2, "H", fg);

        assert!(image.pixels().any(|p| *p == fg));
        // Nothing right of the drawn glyphs.
        for y in 0..30 {
            assert_eq!(*image.get_pixel(39, y), bg);
        }
    }
}
