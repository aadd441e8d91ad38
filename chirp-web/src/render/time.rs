//! Relative timestamps ("3 minutes ago")

use chrono::{DateTime, Utc};

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const DAYS_PER_MONTH: f64 = 30.4;
const DAYS_PER_YEAR: f64 = 365.0;

/// Human-readable age of `created_at` as seen at `now`
///
/// Timestamps in the future read as "a few seconds ago".
pub fn relative_time(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - created_at).num_milliseconds().max(0) as f64 / 1000.0;
    let days = secs / DAY;

    if secs < 45.0 {
        "a few seconds ago".to_string()
    } else if secs < 90.0 {
        "a minute ago".to_string()
    } else if secs < 45.0 * MINUTE {
        format!("{} minutes ago", (secs / MINUTE).round())
    } else if secs < 90.0 * MINUTE {
        "an hour ago".to_string()
    } else if secs < 22.0 * HOUR {
        format!("{} hours ago", (secs / HOUR).round())
    } else if secs < 36.0 * HOUR {
        "a day ago".to_string()
    } else if days < 26.0 {
        format!("{} days ago", days.round())
    } else if days < 46.0 {
        "a month ago".to_string()
    } else if days < 320.0 {
        format!("{} months ago", (days / DAYS_PER_MONTH).round())
    } else if days < 548.0 {
        "a year ago".to_string()
    } else {
        format!("{} years ago", (days / DAYS_PER_YEAR).round())
    }
}
