//! Per-hit performance arithmetic: gain and time-to-hit.

use chrono::{DateTime, Utc};

/// Percentage move from entry to the final target price.
///
/// Callers must reject signals with a zero entry before computing this.
pub fn gain_percent(entry_price: f64, target_price: f64) -> f64 {
    (target_price - entry_price) / entry_price * 100.0
}

/// Minutes between signal and hit, millisecond precision.
pub fn duration_minutes(signal_time: DateTime<Utc>, hit_time: DateTime<Utc>) -> f64 {
    (hit_time - signal_time).num_milliseconds() as f64 / 60_000.0
}

/// Renders minutes as `"Hh Mm"` using floored division, so negative
/// durations carry the sign on the hour part only (-125 minutes is
/// `"-3h 55m"`).
pub fn format_duration(minutes: f64) -> String {
    let hours = (minutes / 60.0).floor() as i64;
    let mins = minutes.rem_euclid(60.0).floor() as i64;
    format!("{hours}h {mins}m")
}
