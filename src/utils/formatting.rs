//! Formatting utilities used for CLI and export outputs.

use unicode_width::UnicodeWidthStr;

/// Pads to a display width, so CJK and emoji line up in columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(used)))
}

/// Countdown rendering: `HH:MM:SS`.
pub fn format_hms(total_secs: u32) -> String {
    let (minutes, seconds) = (total_secs / 60, total_secs % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
