//! Greedy, measured word wrapping.

use super::typeface::TextMeasure;

/// Wrap `text` so each line measures at most `max_width` pixels.
///
/// Explicit newlines split paragraphs first; blank paragraphs come out as
/// empty lines. Words are never split, so a single word wider than
/// `max_width` occupies a line of its own and overflows it.
pub fn wrap_text<M: TextMeasure + ?Sized>(text: &str, max_width: u32, measure: &M) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_owned()
            } else {
                format!("{current} {word}")
            };

            if measure.measure(&candidate).0 <= max_width {
                current = candidate;
            } else {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current = word.to_owned();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}
