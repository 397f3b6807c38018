//! Epoch-relative millisecond encoding for temporal payloads.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use vellum_foundation::{Error, Result};

/// The wire epoch: 1400-01-01T00:00:00.
fn epoch() -> NaiveDateTime {
    // Statically in range.
    NaiveDate::from_ymd_opt(1400, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Milliseconds between the epoch and `value`.
#[must_use]
pub fn date_time_to_millis(value: NaiveDateTime) -> i64 {
    (value - epoch()).num_milliseconds()
}

/// The date-time at `millis` past the epoch.
pub fn date_time_from_millis(millis: i64) -> Result<NaiveDateTime> {
    TimeDelta::try_milliseconds(millis)
        .and_then(|delta| epoch().checked_add_signed(delta))
        .ok_or_else(|| Error::format(format!("date-time out of range: {millis} ms")))
}
