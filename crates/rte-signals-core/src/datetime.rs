// ABOUTME: Timestamp codec for the RTE API format with a colon inside the UTC offset
// ABOUTME: Also builds civil Europe/Paris datetimes used by the scheduler
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Timestamp Codec
//!
//! The API sends `2025-01-01T00:00:00+01:00`. The fixed parsing layout expects
//! the offset as `+0100`, so the colon is dropped before parsing.

use crate::constants::api::{DATE_FORMAT, DATE_FORMAT_WITH_COLON};
use crate::constants::schedule::FRANCE_TZ;
use crate::errors::{SignalError, SignalResult};
use chrono::{DateTime, FixedOffset, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::borrow::Cow;
use std::fmt::Display;

/// Parse an upstream timestamp into an offset-aware datetime
///
/// # Errors
///
/// Returns `SignalError::MalformedTimestamp` if the value does not match
/// `YYYY-MM-DDThh:mm:ss±hh:mm`
pub fn parse_timestamp(value: &str) -> SignalResult<DateTime<FixedOffset>> {
    let normalized = strip_offset_colon(value);
    DateTime::parse_from_str(&normalized, DATE_FORMAT).map_err(|source| {
        SignalError::MalformedTimestamp {
            value: value.to_owned(),
            source,
        }
    })
}

/// Parse an upstream timestamp and keep its calendar date in the same offset
///
/// # Errors
///
/// Returns `SignalError::MalformedTimestamp` on the same inputs as [`parse_timestamp`]
pub fn parse_date(value: &str) -> SignalResult<NaiveDate> {
    parse_timestamp(value).map(|timestamp| timestamp.date_naive())
}

/// Format a datetime back into the upstream layout
#[must_use]
pub fn format_timestamp<Z>(timestamp: &DateTime<Z>) -> String
where
    Z: TimeZone,
    Z::Offset: Display,
{
    timestamp.format(DATE_FORMAT_WITH_COLON).to_string()
}

/// Current time in the fixed civil timezone
#[must_use]
pub fn france_now() -> DateTime<Tz> {
    Utc::now().with_timezone(&FRANCE_TZ)
}

/// Civil time on `date` at `hour:minute` in Europe/Paris
///
/// Ambiguous local times resolve to the earliest instant; times skipped by a
/// DST jump are read as UTC.
#[must_use]
pub fn france_datetime(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Tz> {
    let naive = date
        .and_hms_opt(hour, minute, 0)
        .unwrap_or_else(|| date.and_time(NaiveTime::default()));
    match FRANCE_TZ.from_local_datetime(&naive) {
        LocalResult::Single(timestamp) | LocalResult::Ambiguous(timestamp, _) => timestamp,
        LocalResult::None => FRANCE_TZ.from_utc_datetime(&naive),
    }
}

/// Midnight of `date` in Europe/Paris
#[must_use]
pub fn france_midnight(date: NaiveDate) -> DateTime<Tz> {
    france_datetime(date, 0, 0)
}

fn strip_offset_colon(value: &str) -> Cow<'_, str> {
    let Some(split) = value.len().checked_sub(3) else {
        return Cow::Borrowed(value);
    };
    if value.as_bytes()[split] == b':' {
        Cow::Owned(format!("{}{}", &value[..split], &value[split + 1..]))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_timestamp_keeps_offset() {
        let parsed = parse_timestamp("2025-01-01T00:00:00+02:00").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(
            (parsed.year(), parsed.month(), parsed.day()),
            (2025, 1, 1)
        );
        assert_eq!((parsed.hour(), parsed.minute(), parsed.second()), (0, 0, 0));
    }

    #[test]
    fn test_parse_timestamp_negative_offset() {
        let parsed = parse_timestamp("2024-11-05T23:30:15-05:00").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(parsed.minute(), 30);
        assert_eq!(parsed.second(), 15);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        for value in ["", "+02:00", "2025-01-01", "2025-01-01T00:00:00", "yesterday"] {
            let err = parse_timestamp(value).unwrap_err();
            assert!(
                matches!(err, SignalError::MalformedTimestamp { .. }),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_date_uses_source_offset() {
        // 23:30 at +01:00 is already the next day in UTC+2 but not in its own offset
        let date = parse_date("2025-03-01T23:30:00+01:00").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }

    #[test]
    fn test_format_timestamp_restores_colon() {
        let raw = "2025-06-15T00:00:00+02:00";
        let parsed = parse_timestamp(raw).unwrap();
        assert_eq!(format_timestamp(&parsed), raw);
    }

    #[test]
    fn test_france_midnight_winter_and_summer_offsets() {
        let winter = france_midnight(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_eq!(format_timestamp(&winter), "2025-01-02T00:00:00+01:00");

        let summer = france_midnight(NaiveDate::from_ymd_opt(2025, 7, 14).unwrap());
        assert_eq!(format_timestamp(&summer), "2025-07-14T00:00:00+02:00");
    }

    #[test]
    fn test_france_datetime_in_dst_gap_does_not_panic() {
        // 2025-03-30 02:30 does not exist in Europe/Paris
        let date = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();
        let timestamp = france_datetime(date, 2, 30);
        assert_eq!(timestamp.date_naive(), date);
    }
}
