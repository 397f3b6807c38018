//! Canonical text grammar for primitive values.
//!
//! Every primitive kind has exactly one text form, and parsing is the exact
//! inverse of formatting. `Any` values store text in this grammar, so a
//! formatted primitive survives `any_cast` and re-projection unchanged.

use std::fmt::Write as _;

use chrono::{NaiveDateTime, TimeDelta, Timelike};

use crate::error::{Error, Result};

/// Sentinel for a float NaN.
pub const NAN: &str = "NaN";
/// Sentinel for positive infinity.
pub const INF: &str = "INF";
/// Sentinel for negative infinity.
pub const NEG_INF: &str = "-INF";

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;

/// Formats a boolean as `true` or `false`.
#[must_use]
pub fn format_boolean(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

/// Parses a boolean; only the exact canonical forms are accepted.
pub fn parse_boolean(text: &str) -> Result<bool> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::format(format!("invalid boolean: {text:?}"))),
    }
}

/// Parses a decimal integer of any fixed-width kind.
pub fn parse_integer<T>(text: &str) -> Result<T>
where
    T: std::str::FromStr,
{
    text.parse()
        .map_err(|_| Error::format(format!("invalid integer: {text:?}")))
}

/// Formats a 32-bit float: shortest round-trip decimal, with `NaN`, `INF`
/// and `-INF` sentinels.
#[must_use]
pub fn format_float(value: f32) -> String {
    if value.is_nan() {
        NAN.to_string()
    } else if value.is_infinite() {
        if value > 0.0 { INF } else { NEG_INF }.to_string()
    } else {
        value.to_string()
    }
}

/// Parses a 32-bit float.
pub fn parse_float(text: &str) -> Result<f32> {
    match text {
        NAN => Ok(f32::NAN),
        INF => Ok(f32::INFINITY),
        NEG_INF => Ok(f32::NEG_INFINITY),
        _ => text
            .parse()
            .map_err(|_| Error::format(format!("invalid float: {text:?}"))),
    }
}

/// Formats a 64-bit float; same grammar as [`format_float`].
#[must_use]
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        NAN.to_string()
    } else if value.is_infinite() {
        if value > 0.0 { INF } else { NEG_INF }.to_string()
    } else {
        value.to_string()
    }
}

/// Parses a 64-bit float.
pub fn parse_double(text: &str) -> Result<f64> {
    match text {
        NAN => Ok(f64::NAN),
        INF => Ok(f64::INFINITY),
        NEG_INF => Ok(f64::NEG_INFINITY),
        _ => text
            .parse()
            .map_err(|_| Error::format(format!("invalid double: {text:?}"))),
    }
}

/// Formats a date-time as `yyyy-MM-ddTHH:mm:ss[.fff]`, with the millisecond
/// fraction omitted when zero.
#[must_use]
pub fn format_date_time(value: NaiveDateTime) -> String {
    let mut out = value.format(DATE_TIME_FORMAT).to_string();
    let millis = value.time().nanosecond() / 1_000_000;
    if millis != 0 {
        let _ = write!(out, ".{millis:03}");
    }
    out
}

/// Parses a date-time in the canonical grammar.
pub fn parse_date_time(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|_| Error::format(format!("invalid date-time: {text:?}")))
}

/// Formats a duration as `[-]HH:mm:ss[.fff]`. Hours are unbounded (not
/// wrapped at 24) and the millisecond fraction is omitted when zero.
#[must_use]
pub fn format_time(value: TimeDelta) -> String {
    let total = value.num_milliseconds();
    let negative = total < 0;
    let total = total.unsigned_abs() as i64;
    let hours = total / MILLIS_PER_HOUR;
    let minutes = (total % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
    let seconds = (total % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
    let millis = total % MILLIS_PER_SECOND;
    let sign = if negative { "-" } else { "" };
    let mut out = format!("{sign}{hours:02}:{minutes:02}:{seconds:02}");
    if millis != 0 {
        let _ = write!(out, ".{millis:03}");
    }
    out
}

/// Parses a duration in the canonical grammar.
pub fn parse_time(text: &str) -> Result<TimeDelta> {
    let bad = || Error::format(format!("invalid time: {text:?}"));
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let mut parts = rest.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(bad());
    };
    let (seconds, millis) = match seconds.split_once('.') {
        Some((whole, fraction)) => {
            if fraction.len() != 3 {
                return Err(bad());
            }
            (whole, fraction)
        }
        None => (seconds, "000"),
    };
    let hours: i64 = hours.parse().map_err(|_| bad())?;
    let minutes: i64 = minutes.parse().map_err(|_| bad())?;
    let seconds: i64 = seconds.parse().map_err(|_| bad())?;
    let millis: i64 = millis.parse().map_err(|_| bad())?;
    if hours < 0 || !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
        return Err(bad());
    }
    let total =
        hours * MILLIS_PER_HOUR + minutes * MILLIS_PER_MINUTE + seconds * MILLIS_PER_SECOND + millis;
    Ok(TimeDelta::milliseconds(if negative { -total } else { total }))
}
