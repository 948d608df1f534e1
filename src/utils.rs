use crate::models::Progress;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shortens `s` to at most `max_width` terminal columns, ending in "..." when cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width < 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut width = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}

pub fn progress_label(progress: &Progress) -> String {
    format!(
        "Progress: {}/{} words learned ({:.1}%)",
        progress.learned,
        progress.total,
        progress.percent()
    )
}

pub fn session_label(learned: usize, started: &str) -> String {
    let noun = if learned == 1 { "card" } else { "cards" };
    format!("Session: {} {} learned since {}", learned, noun, started)
}
