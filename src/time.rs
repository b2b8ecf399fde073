use chrono::{DateTime, Duration, Utc};

/// Whole days elapsed between `then` and `now`
pub fn age_in_days(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - then).num_days()
}

/// Describe how long ago `then` was, relative to `now`
/// ("just now", "5 minutes ago", "1 hour ago", "3 days ago")
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{} ago", plural(minutes, "minute"));
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{} ago", plural(hours, "hour"));
    }
    format!("{} ago", plural(hours / 24, "day"))
}

/// Title-cased span for section headings ("12 Hours", "30 Days", "1 Day")
pub fn format_span(duration: Duration) -> String {
    let minutes = duration.num_minutes();
    if minutes > 0 && minutes % (24 * 60) == 0 {
        plural(duration.num_days(), "Day")
    } else if minutes > 0 && minutes % 60 == 0 {
        plural(duration.num_hours(), "Hour")
    } else {
        plural(minutes, "Minute")
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}
