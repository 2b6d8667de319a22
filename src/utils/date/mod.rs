// Date utility functions
// Minute-of-day helpers shared by the time grid and selection labels

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// Format a minute-of-day as `HH:MM`. The end of the day renders as `24:00`.
pub fn format_minutes(minutes: u32) -> String {
    format!(
        "{:02}:{:02}",
        minutes / MINUTES_PER_HOUR,
        minutes % MINUTES_PER_HOUR
    )
}

/// Format a slot range label, e.g. `03:00 - 03:30`.
pub fn format_range(start_minutes: u32, end_minutes: u32) -> String {
    format!(
        "{} - {}",
        format_minutes(start_minutes),
        format_minutes(end_minutes)
    )
}

/// Parse an `HH:MM` grid-line label back into a minute-of-day.
pub fn parse_label(label: &str) -> Option<u32> {
    let (hours, minutes) = label.trim().split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if minutes >= MINUTES_PER_HOUR {
        return None;
    }
    let total = hours.checked_mul(MINUTES_PER_HOUR)?.checked_add(minutes)?;
    (total <= MINUTES_PER_DAY).then_some(total)
}

/// Combine a date and a minute-of-day. `24:00` rolls over to the next midnight.
pub fn at_minutes(date: NaiveDate, minutes: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(minutes))
}
