//! Human-readable timestamps for list rows.

use chrono::{DateTime, Utc};

/// Formats `timestamp` relative to `now`
///
/// - under one hour: `"Just now"`
/// - under a day: `"{hours}h ago"`
/// - otherwise the calendar date, `YYYY-MM-DD`
///
/// Timestamps in the future count as "Just now".
#[must_use]
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - timestamp).num_hours();

    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}
