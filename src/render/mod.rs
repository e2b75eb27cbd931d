//! Card rendering: wrapped, centered text on a solid background.
//!
//! Layout rules:
//! - lines are wrapped to `width - 2 * margin` (see [`wrap::wrap_text`])
//! - blank lines take the height of a single space
//! - the block is vertically centered but never starts above `margin`
//! - each line is horizontally centered on its own
//!
//! Text that is taller than the canvas runs off the bottom edge.

pub mod color;
pub mod typeface;
pub mod wrap;

use crate::config::RenderConfig;
use crate::error::{BotError, Result};
use chrono::NaiveDate;
use image::{ImageEncoder, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tracing::debug;

pub use color::{color_or, parse_color};
pub use typeface::{TextMeasure, Typeface};
pub use wrap::wrap_text;

/// Background used when the configured color is invalid.
pub const FALLBACK_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
/// Text color used when the configured color is invalid.
pub const FALLBACK_TEXT: Rgb<u8> = Rgb([0, 0, 0]);

/// Canvas geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSpec {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Side margin and minimum top offset.
    pub margin: u32,
    /// Extra pixels between lines.
    pub line_spacing: u32,
}

impl CanvasSpec {
    /// Horizontal room available to a line.
    pub fn text_width(&self) -> u32 {
        self.width.saturating_sub(self.margin.saturating_mul(2))
    }
}

impl From<&RenderConfig> for CanvasSpec {
    fn from(config: &RenderConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            margin: config.margin,
            line_spacing: config.line_spacing,
        }
    }
}

/// A wrapped line with its measured size and top-left position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLine {
    /// Line text (empty for blank rows).
    pub text: String,
    /// Left edge; negative when the line is wider than the canvas.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Measured width.
    pub width: u32,
    /// Measured height.
    pub height: u32,
}

/// Wrap `text` and position every line on `canvas`.
pub fn layout<M: TextMeasure + ?Sized>(text: &str, canvas: &CanvasSpec, measure: &M) -> Vec<PlacedLine> {
    let sized: Vec<(String, u32, u32)> = wrap_text(text, canvas.text_width(), measure)
        .into_iter()
        .map(|line| {
            let (width, height) = if line.is_empty() {
                (0, measure.measure(" ").1)
            } else {
                measure.measure(&line)
            };
            (line, width, height)
        })
        .collect();

    let gaps = sized.len().saturating_sub(1) as i64;
    let total: i64 = sized.iter().map(|(_, _, h)| i64::from(*h)).sum::<i64>()
        + gaps * i64::from(canvas.line_spacing);
    let centered = (i64::from(canvas.height) - total).div_euclid(2);
    let mut y = centered.max(i64::from(canvas.margin));

    debug!(
        lines = sized.len(),
        block_height = total,
        top = y,
        "laid out card text"
    );

    sized
        .into_iter()
        .map(|(text, width, height)| {
            let x = (i64::from(canvas.width) - i64::from(width)).div_euclid(2);
            let placed = PlacedLine {
                text,
                x: clamp_i32(x),
                y: clamp_i32(y),
                width,
                height,
            };
            y += i64::from(height) + i64::from(canvas.line_spacing);
            placed
        })
        .collect()
}

/// Render `text` onto a new `canvas`-sized image.
pub fn render(text: &str, canvas: &CanvasSpec, font: &Typeface, bg: Rgb<u8>, fg: Rgb<u8>) -> RgbImage {
    let mut image = RgbImage::from_pixel(canvas.width, canvas.height, bg);
    for line in layout(text, canvas, font) {
        if !line.text.is_empty() {
            font.draw(&mut image, line.x, line.y, &line.text, fg);
        }
    }
    image
}

/// Render with colors and geometry from configuration.
///
/// Invalid colors fall back to black on white.
pub fn render_with_config(text: &str, config: &RenderConfig, font: &Typeface) -> RgbImage {
    let bg = color_or(&config.background, FALLBACK_BACKGROUND);
    let fg = color_or(&config.text_color, FALLBACK_TEXT);
    render(text, &CanvasSpec::from(config), font, bg, fg)
}

/// File name for the card of `date`: `post-YYYY-MM-DD-dayNN.png`, where
/// `NN` is the one-based day number.
pub fn output_file_name(date: NaiveDate, day_index: i64) -> String {
    format!("post-{}-day{:02}.png", date.format("%Y-%m-%d"), day_index + 1)
}

/// Encode `image` as PNG bytes.
///
/// # Errors
///
/// Returns [`BotError::Render`] if encoding fails.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| BotError::Render(format!("PNG encode failed: {e}")))?;
    Ok(buf)
}

/// Write `image` to `dir` under [`output_file_name`] and return the path.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn save_png(image: &RgbImage, dir: &Path, date: NaiveDate, day_index: i64) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(output_file_name(date, day_index));
    std::fs::write(&path, encode_png(image)?)?;
    debug!("wrote card {}", path.display());
    Ok(path)
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
