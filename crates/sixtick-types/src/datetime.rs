//! Tick timestamp formats and range boundary parsing.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{ParseError, SixtickError};

/// Format of every timestamp written to or read from a tick series.
pub const TICK_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// The "beginning of time" watermark used for empty or absent destinations.
pub const EPOCH: NaiveDateTime = NaiveDate::from_ymd_opt(1970, 1, 1)
    .expect("1970-01-01 is a valid date")
    .and_hms_opt(0, 0, 0)
    .expect("midnight is a valid time");

/// Accepted range boundary formats, tried in order.
///
/// The date-only entry comes first. It cannot shadow the others because
/// parsing fails on any trailing input.
const BOUNDARY_FORMATS: &[BoundaryFormat] = &[
    BoundaryFormat::Date("%d.%m.%Y"),
    BoundaryFormat::DateTime("%d.%m.%YT%H:%M"),
    BoundaryFormat::DateTime("%d.%m.%YT%H:%M:%S"),
    BoundaryFormat::DateTime("%d.%m.%Y %H:%M"),
    BoundaryFormat::DateTime("%d.%m.%Y %H:%M:%S"),
];

#[derive(Debug, Clone, Copy)]
enum BoundaryFormat {
    Date(&'static str),
    DateTime(&'static str),
}

impl BoundaryFormat {
    fn parse(self, input: &str) -> Option<NaiveDateTime> {
        match self {
            Self::Date(fmt) => NaiveDate::parse_from_str(input, fmt)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0)),
            Self::DateTime(fmt) => NaiveDateTime::parse_from_str(input, fmt).ok(),
        }
    }
}

/// Parses a tick timestamp in the exact `DD.MM.YYYY HH:MM:SS` form.
///
/// # Errors
///
/// Returns [`ParseError::Datetime`] if the input does not match.
pub fn parse_tick_datetime(input: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(input, TICK_DATETIME_FORMAT).map_err(|_| ParseError::Datetime {
        input: input.to_string(),
    })
}

/// Formats a timestamp as `DD.MM.YYYY HH:MM:SS`, truncating sub-second precision.
#[must_use]
pub fn format_tick_datetime(dt: &NaiveDateTime) -> String {
    dt.format(TICK_DATETIME_FORMAT).to_string()
}

/// Parses a user-supplied range boundary such as `30.07.2014` or
/// `30.07.2014T15:05`.
///
/// The first format that matches wins. A bare date resolves to midnight.
///
/// # Errors
///
/// Returns [`SixtickError::UnrecognizedDatetime`] if no format matches.
pub fn parse_range_boundary(input: &str) -> Result<NaiveDateTime, SixtickError> {
    BOUNDARY_FORMATS
        .iter()
        .find_map(|format| format.parse(input))
        .ok_or_else(|| SixtickError::UnrecognizedDatetime(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_epoch() {
        assert_eq!(EPOCH, at(1970, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_parse_tick_datetime() {
        let dt = parse_tick_datetime("29.07.2014 15:23:03").unwrap();
        assert_eq!(dt, at(2014, 7, 29, 15, 23, 3));
    }

    #[test]
    fn test_parse_tick_datetime_rejects_other_layouts() {
        assert!(parse_tick_datetime("2014-07-29 15:24:35").is_err());
        assert!(parse_tick_datetime("29.07.2014").is_err());
        assert!(parse_tick_datetime("29.07.2014 15:24").is_err());
        assert!(parse_tick_datetime("29.07.2014 15:24:35 extra").is_err());
    }

    #[test]
    fn test_format_tick_datetime() {
        assert_eq!(
            format_tick_datetime(&at(2014, 7, 29, 9, 5, 0)),
            "29.07.2014 09:05:00"
        );
    }

    #[test]
    fn test_format_truncates_subseconds() {
        let dt = at(2014, 7, 29, 9, 5, 0).with_nanosecond(750_000_000).unwrap();
        assert_eq!(format_tick_datetime(&dt), "29.07.2014 09:05:00");
    }

    #[test]
    fn test_boundary_date_only_is_midnight() {
        let dt = parse_range_boundary("30.07.2014").unwrap();
        assert_eq!(dt, at(2014, 7, 30, 0, 0, 0));
    }

    #[test]
    fn test_boundary_minute_precision() {
        assert_eq!(
            parse_range_boundary("30.07.2014 15:05").unwrap(),
            at(2014, 7, 30, 15, 5, 0)
        );
        assert_eq!(
            parse_range_boundary("30.07.2014T15:05").unwrap(),
            at(2014, 7, 30, 15, 5, 0)
        );
    }

    #[test]
    fn test_boundary_second_precision() {
        assert_eq!(
            parse_range_boundary("30.07.2014 15:05:20").unwrap(),
            at(2014, 7, 30, 15, 5, 20)
        );
        assert_eq!(
            parse_range_boundary("30.07.2014T15:05:20").unwrap(),
            at(2014, 7, 30, 15, 5, 20)
        );
    }

    #[test]
    fn test_boundary_unrecognized() {
        let err = parse_range_boundary("2014-07-30").unwrap_err();
        assert!(matches!(err, SixtickError::UnrecognizedDatetime(ref s) if s == "2014-07-30"));
        assert!(parse_range_boundary("").is_err());
    }
}
