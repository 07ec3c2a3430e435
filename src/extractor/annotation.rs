//! Text cleanup and `title` annotation parsing.
//!
//! Annotation titles look like `"n: nomina"` or `"Kim: kimia"`. Both halves
//! are trimmed and lowercased.

use crate::models::Attribution;

/// Strip homograph digits and `/` separators from heading text, then trim.
pub fn cleanup(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_ascii_digit() && *c != '/')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Same as [`cleanup`], but empty results become `None`.
pub fn cleanup_opt(text: &str) -> Option<String> {
    let cleaned = cleanup(text);
    (!cleaned.is_empty()).then_some(cleaned)
}

fn split_title(title: &str) -> Option<(String, String)> {
    let (tag, label) = title.split_once(':')?;
    Some((tag.trim().to_lowercase(), label.trim().to_lowercase()))
}

/// Parse a part-of-speech annotation into `(tag, label)`.
///
/// A missing title, a missing colon, or an empty side yields `(None, None)`.
pub fn parse_annotation(title: Option<&str>) -> (Option<String>, Option<String>) {
    match title.and_then(split_title) {
        Some((tag, label)) if !tag.is_empty() && !label.is_empty() => (Some(tag), Some(label)),
        _ => (None, None),
    }
}

/// Parse an attribution annotation. A label of `-` means "no label".
///
/// Returns `None` when the title does not carry a tag.
pub fn parse_attribution(title: Option<&str>) -> Option<Attribution> {
    let (tag, label) = split_title(title?)?;
    if tag.is_empty() {
        return None;
    }
    Some(Attribution {
        source_tag: tag,
        source_label: (label != "-" && !label.is_empty()).then_some(label),
    })
}
