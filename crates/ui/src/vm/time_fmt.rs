use std::fmt::Display;

use chrono::{DateTime, TimeZone};

/// Hours and minutes, as shown under chat messages.
#[must_use]
pub fn format_clock_time<Tz: TimeZone>(value: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    value.format("%H:%M").to_string()
}

/// A percentage the way the API reports it: whole numbers without decimals,
/// others rounded to two places.
#[must_use]
pub fn format_percent(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}%")
    } else {
        format!("{rounded}%")
    }
}
