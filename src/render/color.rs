//! Color specifications for card backgrounds and text.

use image::Rgb;
use tracing::warn;

/// Named colors accepted in addition to hex and `rgb(..)` notation.
const NAMED: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("pink", [255, 192, 203]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("silver", [192, 192, 192]),
    ("navy", [0, 0, 128]),
    ("teal", [0, 128, 128]),
    ("maroon", [128, 0, 0]),
    ("gold", [255, 215, 0]),
    ("ivory", [255, 255, 240]),
    ("beige", [245, 245, 220]),
    ("crimson", [220, 20, 60]),
    ("lavender", [230, 230, 250]),
    ("darkred", [139, 0, 0]),
    ("midnightblue", [25, 25, 112]),
];

/// Parse `#RRGGBB`, `#RGB`, `rgb(r, g, b)` or a color name (case-insensitive).
pub fn parse_color(value: &str) -> Option<Rgb<u8>> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = value.to_ascii_lowercase();
    if let Some(inner) = lower
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if let [r, g, b] = parts.as_slice() {
            return Some(Rgb([r.parse().ok()?, g.parse().ok()?, b.parse().ok()?]));
        }
        return None;
    }

    NAMED
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, rgb)| Rgb(*rgb))
}

/// [`parse_color`], or `fallback` with a warning when `value` is invalid.
pub fn color_or(value: &str, fallback: Rgb<u8>) -> Rgb<u8> {
    parse_color(value).unwrap_or_else(|| {
        warn!(
            "invalid color '{value}', falling back to #{:02x}{:02x}{:02x}",
            fallback[0], fallback[1], fallback[2]
        );
        fallback
    })
}

fn parse_hex(hex: &str) -> Option<Rgb<u8>> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Rgb([channel(0)?, channel(2)?, channel(4)?]))
        }
        3 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
            Some(Rgb([channel(0)?, channel(1)?, channel(2)?]))
        }
        _ => None,
    }
}
