// src/utils/text.rs

//! Text helpers for presenting loaded data.

use chrono::{DateTime, Utc};
use unicode_segmentation::UnicodeSegmentation;

/// Shorten `text` to at most `max` graphemes, appending an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max {
        return text.to_string();
    }
    let mut out: String = graphemes[..max.saturating_sub(1)].concat();
    out = out.trim_end().to_string();
    out.push('…');
    out
}

/// Join names for display, or `fallback` when there are none.
pub fn join_or(names: &[String], fallback: &str) -> String {
    if names.is_empty() {
        fallback.to_string()
    } else {
        names.join(", ")
    }
}

/// Calendar date of a timestamp, e.g. `2025-05-28`.
pub fn format_date(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown date".to_string())
}
