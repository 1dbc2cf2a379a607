//! ISO-8601 date handling for trip payloads
//!
//! Agents emit dates as `YYYY-MM-DD` and datetimes as `YYYY-MM-DDTHH:MM`,
//! sometimes with seconds, an hour only, or an offset. Only the calendar date
//! matters for the stay/flight consistency rules, so everything collapses to
//! `NaiveDate`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%:z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
];

/// Parse a date or datetime string and return its calendar date.
///
/// The date part must be zero-padded `YYYY-MM-DD`. The time of day (and any
/// UTC offset) is discarded, not converted.
#[must_use]
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if !has_padded_date_prefix(value) {
        return None;
    }

    let (date_part, rest) = value.split_at(10);
    let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()?;
    if rest.is_empty() {
        return Some(date);
    }

    let time = rest.strip_prefix(['T', ' '])?;
    let normalized = format!("{date_part}T{}", normalize_time(time));

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(datetime.date());
        }
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(datetime) = DateTime::parse_from_str(&normalized, format) {
            return Some(datetime.naive_local().date());
        }
    }

    None
}

fn has_padded_date_prefix(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() >= 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b'-'
        && bytes[8..10].iter().all(u8::is_ascii_digit)
}

/// `Z` becomes `+00:00` and an hour-only time gains `:00` minutes
fn normalize_time(time: &str) -> String {
    let time = match time.strip_suffix(['Z', 'z']) {
        Some(local) => format!("{local}+00:00"),
        None => time.to_string(),
    };

    let bytes = time.as_bytes();
    let hour_only = bytes.len() >= 2
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && matches!(bytes.get(2), None | Some(b'+' | b'-'));
    if hour_only {
        format!("{}:00{}", &time[..2], &time[2..])
    } else {
        time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("2026-06-10", date(2026, 6, 10))]
    #[case("2026-06-10T08:00", date(2026, 6, 10))]
    #[case("2026-06-10T23:59:59", date(2026, 6, 10))]
    #[case("2026-06-10T23:59:59.250", date(2026, 6, 10))]
    #[case("2026-06-10 08:00", date(2026, 6, 10))]
    #[case("2026-06-10T22:00+10:00", date(2026, 6, 10))]
    #[case("2026-06-10T22:00:00Z", date(2026, 6, 10))]
    #[case("2026-06-10T22:00Z", date(2026, 6, 10))]
    #[case("2026-06-10T08", date(2026, 6, 10))]
    #[case("2026-06-10T08Z", date(2026, 6, 10))]
    #[case("2026-06-10T08-05:00", date(2026, 6, 10))]
    #[case("  2026-06-10  ", date(2026, 6, 10))]
    fn test_parses_calendar_date(#[case] input: &str, #[case] expected: NaiveDate) {
        assert_eq!(parse_calendar_date(input), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("YYYY-MM-DD")]
    #[case("June 10, 2026")]
    #[case("2026-02-30")]
    #[case("2026-06-10T25:00")]
    #[case("2026-06-10T24")]
    #[case("2026-06-10garbage")]
    #[case("2026-6-1")]
    #[case("2026-06-1")]
    #[case("2026-06-10T")]
    fn test_rejects_invalid_dates(#[case] input: &str) {
        assert_eq!(parse_calendar_date(input), None);
    }

    #[test]
    fn test_offset_does_not_shift_date() {
        // Late evening in a positive offset stays on the local calendar day.
        assert_eq!(
            parse_calendar_date("2026-06-10T23:30:00+14:00"),
            Some(date(2026, 6, 10))
        );
    }
}
