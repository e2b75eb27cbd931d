//! Hashtag normalisation.

use crate::config::TagConfig;

/// Append the first `append_count` of `required` to `message` unless it
/// already contains any of them (case-insensitive substring match).
///
/// Idempotent: the appended tags satisfy the check on a second pass.
pub fn ensure_tags<S: AsRef<str>>(message: &str, required: &[S], append_count: usize) -> String {
    let tags: Vec<&str> = required
        .iter()
        .map(|t| t.as_ref())
        .filter(|t: &&str| !t.trim().is_empty())
        .collect();

    let lower = message.to_lowercase();
    if tags.iter().any(|tag| lower.contains(&tag.to_lowercase())) {
        return message.to_owned();
    }

    let suffix = &tags[..append_count.min(tags.len())];
    if suffix.is_empty() {
        return message.to_owned();
    }

    let base = message.trim_end();
    if base.is_empty() {
        suffix.join(" ")
    } else {
        format!("{base} {}", suffix.join(" "))
    }
}

/// [`ensure_tags`] driven by configuration; a no-op when disabled.
pub fn apply(message: &str, config: &TagConfig) -> String {
    if !config.enabled {
        return message.to_owned();
    }
    ensure_tags(message, &config.required, config.append_count)
}
