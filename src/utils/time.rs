//! Clock-time helpers shared by the shell and the list output.

use chrono::NaiveTime;

pub fn format_clock(t: NaiveTime) -> String {
    t.format("%H:%M:%S").to_string()
}

/// Minutes as `1h 05m` / `12m`, rounded to the nearest minute.
pub fn readable_minutes(minutes: f64) -> String {
    let total = minutes.round().max(0.0) as i64;
    let (h, m) = (total / 60, total % 60);
    if h > 0 {
        format!("{h}h {m:02}m")
    } else {
        format!("{m}m")
    }
}
