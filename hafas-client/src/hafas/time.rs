//! HaFAS date, time and duration encodings.
//!
//! HaFAS uses digit strings throughout:
//! - dates are `YYYYMMDD`
//! - times of day are `HHMMSS`, optionally prefixed with a day offset
//!   (usually `DDHHMMSS`) for stops reached after midnight
//! - durations use the same `(DD)HHMMSS` layout; long trips may carry a
//!   three-digit day count

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

/// Error returned when a wire date/time string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} '{value}': {reason}")]
pub struct TimeFormatError {
    kind: &'static str,
    value: String,
    reason: &'static str,
}

impl TimeFormatError {
    fn new(kind: &'static str, value: &str, reason: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            reason,
        }
    }
}

/// Format a date as `YYYYMMDD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Format a time of day as `HHMMSS`.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H%M%S").to_string()
}

/// Parse a `YYYYMMDD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, TimeFormatError> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeFormatError::new("date", s, "expected 8 digits"));
    }
    NaiveDate::parse_from_str(s, "%Y%m%d")
        .map_err(|_| TimeFormatError::new("date", s, "no such calendar date"))
}

/// Longest day prefix accepted in front of `HHMMSS`.
const MAX_DAY_DIGITS: usize = 3;

/// Split `(D..)HHMMSS` into (days, hours, minutes, seconds).
///
/// The last six digits are the clock; any leading digits count days.
fn split_day_clock(kind: &'static str, s: &str) -> Result<(i64, i64, i64, i64), TimeFormatError> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeFormatError::new(kind, s, "expected digits only"));
    }
    if s.len() < 6 || s.len() > 6 + MAX_DAY_DIGITS {
        return Err(TimeFormatError::new(kind, s, "expected 6 to 9 digits"));
    }

    let (days, clock) = match s.split_at(s.len() - 6) {
        ("", clock) => ("0", clock),
        split => split,
    };

    // All slices are ASCII digits of bounded length, so these cannot overflow.
    let num = |part: &str| part.parse::<i64>().unwrap_or_default();
    let (hours, minutes, seconds) = (num(&clock[0..2]), num(&clock[2..4]), num(&clock[4..6]));

    if minutes > 59 || seconds > 59 {
        return Err(TimeFormatError::new(kind, s, "minutes or seconds out of range"));
    }

    Ok((num(days), hours, minutes, seconds))
}

/// Parse a `(DD)HHMMSS` elapsed time.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use hafas_client::hafas::time::parse_duration;
///
/// assert_eq!(parse_duration("013000").unwrap(), Duration::minutes(90));
/// assert_eq!(parse_duration("01020000").unwrap(), Duration::hours(26));
/// ```
pub fn parse_duration(s: &str) -> Result<Duration, TimeFormatError> {
    let (days, hours, minutes, seconds) = split_day_clock("duration", s)?;
    Ok(Duration::days(days)
        + Duration::hours(hours)
        + Duration::minutes(minutes)
        + Duration::seconds(seconds))
}

/// Parse a `(DD)HHMMSS` time of day relative to `date`, in `tz`.
///
/// The optional day prefix is an offset from `date`. Local times that fall
/// into a DST gap are rejected; ambiguous ones resolve to the earlier instant.
pub fn parse_time(s: &str, date: NaiveDate, tz: Tz) -> Result<DateTime<Tz>, TimeFormatError> {
    let (days, hours, minutes, seconds) = split_day_clock("time", s)?;
    if hours > 23 {
        return Err(TimeFormatError::new("time", s, "hour out of range"));
    }

    let naive: NaiveDateTime = date.and_time(NaiveTime::MIN)
        + Duration::days(days)
        + Duration::hours(hours)
        + Duration::minutes(minutes)
        + Duration::seconds(seconds);

    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| TimeFormatError::new("time", s, "does not exist in operator timezone"))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Formatting a time then parsing it yields the same wall clock
        #[test]
        fn time_roundtrip(h in 0u32..24, m in 0u32..60, s in 0u32..60) {
            let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
            let wire = format_time(NaiveTime::from_hms_opt(h, m, s).unwrap());
            prop_assert_eq!(wire.len(), 6);
            let parsed = parse_time(&wire, date, chrono_tz::UTC).unwrap();
            prop_assert_eq!(parsed.naive_local(), date.and_hms_opt(h, m, s).unwrap());
        }

        /// Durations equal the sum of their fields
        #[test]
        fn duration_fields(d in 0i64..100, h in 0i64..100, m in 0i64..60, s in 0i64..60) {
            let wire = format!("{d:02}{h:02}{m:02}{s:02}");
            let expected = Duration::seconds(((d * 24 + h) * 60 + m) * 60 + s);
            prop_assert_eq!(parse_duration(&wire).unwrap(), expected);
        }
    }
}
