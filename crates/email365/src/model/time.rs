//! Timestamp formatting for the message list and preview.

use std::fmt::Display;

use chrono::{DateTime, Datelike, TimeZone, Utc};

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Converts a nanosecond timestamp into `tz`.
fn to_zone<Tz: TimeZone>(timestamp: u64, tz: &Tz) -> Option<DateTime<Tz>> {
    let secs = i64::try_from(timestamp / NANOS_PER_SEC).ok()?;
    #[allow(clippy::cast_possible_truncation)] // remainder is below one billion
    let nanos = (timestamp % NANOS_PER_SEC) as u32;
    DateTime::<Utc>::from_timestamp(secs, nanos).map(|dt| dt.with_timezone(tz))
}

/// Short label for the message list.
///
/// Time of day for today, weekday within the last week, otherwise the date.
pub fn format_received<Tz>(timestamp: u64, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(received) = to_zone(timestamp, &now.timezone()) else {
        return String::new();
    };

    if received.date_naive() == now.date_naive() {
        received.format("%H:%M").to_string()
    } else if (now.clone() - received.clone()).num_days() < 7 && received <= *now {
        received.format("%a").to_string()
    } else if received.year() == now.year() {
        received.format("%b %d").to_string()
    } else {
        received.format("%b %d, %Y").to_string()
    }
}

/// Full date for the preview header.
pub fn format_full<Tz>(timestamp: u64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    to_zone(timestamp, tz).map_or_else(String::new, |dt| {
        dt.format("%a, %d %b %Y %H:%M").to_string()
    })
}
