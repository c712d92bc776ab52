//! Utility helpers shared across the WASM frontend.

use chrono::{DateTime, Utc};

/// Short "how long ago" text for the recent-projects list, e.g. `"just now"`,
/// `"5 min ago"`, `"3 h ago"`, `"2 d ago"`.  Falls back to the date after a
/// month.  Timestamps in the future read as "just now".
pub fn format_last_accessed(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0);
    let minutes = secs / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "just now".to_string()
    } else if hours < 1 {
        format!("{} min ago", minutes)
    } else if days < 1 {
        format!("{} h ago", hours)
    } else if days < 30 {
        format!("{} d ago", days)
    } else {
        then.format("%Y-%m-%d").to_string()
    }
}

/// Last path component, used when a project has no display name.
pub fn path_basename(path: &str) -> &str {
    path.trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(path)
}
