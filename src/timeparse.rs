//! Time-of-day parsing for chronological ordering.
//!
//! Request times arrive as free-form strings in either 12-hour
//! (`"9:30 AM"`) or 24-hour (`"14:05"`, `"14:05:30"`) form. They are
//! only ever used to break ties between requests on the same date, so
//! the parser maps a string to minutes since midnight and callers
//! treat anything unparseable as minute 0 rather than failing.

use crate::models::Request;

/// Parse a time-of-day string to minutes since midnight.
///
/// Accepted forms, case-insensitive, with or without a space before
/// the meridiem:
/// - `"H:MM"` / `"HH:MM"` / `"HH:MM:SS"` (24-hour, 0-23)
/// - `"h:MM AM"` / `"h:MM:SS PM"` (12-hour, 1-12; 12 AM is midnight,
///   12 PM is noon)
///
/// Returns `None` for anything else, including out-of-range fields.
/// Seconds are accepted but ignored; ordering is minute-granular.
pub fn minutes_since_midnight(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let upper = trimmed.to_ascii_uppercase();
    let (clock, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end(), Some(Meridiem::Am))
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end(), Some(Meridiem::Pm))
    } else {
        (upper.as_str(), None)
    };

    let mut parts = clock.split(':');
    let hour: u32 = parts.next()?.trim().parse().ok()?;
    let minute: u32 = parts.next()?.trim().parse().ok()?;
    if let Some(seconds) = parts.next() {
        let _: u32 = seconds.trim().parse().ok()?;
    }
    if parts.next().is_some() || minute > 59 {
        return None;
    }

    let hour24 = match meridiem {
        None => {
            if hour > 23 {
                return None;
            }
            hour
        }
        Some(m) => {
            if hour == 0 || hour > 12 {
                return None;
            }
            match (m, hour) {
                (Meridiem::Am, 12) => 0,
                (Meridiem::Am, h) => h,
                (Meridiem::Pm, 12) => 12,
                (Meridiem::Pm, h) => h + 12,
            }
        }
    };

    Some(hour24 * 60 + minute)
}

#[derive(Clone, Copy)]
enum Meridiem {
    Am,
    Pm,
}

/// Chronological sort key for a request: calendar date first (string
/// order on `YYYY-MM-DD` is date order), then time of day. A missing
/// or garbled time sorts as minute 0.
pub fn sort_key(request: &Request) -> (&str, u32) {
    let minutes = request
        .time
        .as_deref()
        .and_then(minutes_since_midnight)
        .unwrap_or(0);
    (request.date.as_str(), minutes)
}
