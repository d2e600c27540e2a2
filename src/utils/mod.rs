//! Utility functions and helpers.

pub mod http;

use unicode_segmentation::UnicodeSegmentation;

/// Build the human-facing link for a wiki page title.
pub fn page_link(base: &str, title: &str) -> String {
    format!("{}{}", base, title.trim().replace(' ', "_"))
}

/// Keep at most `max` user-perceived characters of `text`.
pub fn truncate_display(text: &str, max: usize) -> &str {
    match text.grapheme_indices(true).nth(max) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}
