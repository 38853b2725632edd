// SPDX-License-Identifier: Apache-2.0

use chrono::{NaiveDate, NaiveDateTime};

use crate::ValidationError;

/// Client-facing rendering, e.g. `19-10-2026 08:30:00`.
pub const WIRE_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";
/// Column encoding; sorts lexicographically in time order.
pub const STORED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[must_use]
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(WIRE_TIMESTAMP_FORMAT).to_string()
}

/// Absent and zero-valued timestamps render as `None` so they can be
/// omitted from responses instead of showing `01-01-0001 00:00:00`.
#[must_use]
pub fn format_timestamp_opt(ts: Option<&NaiveDateTime>) -> Option<String> {
    ts.filter(|t| !is_zero_timestamp(t)).map(format_timestamp)
}

#[must_use]
pub fn is_zero_timestamp(ts: &NaiveDateTime) -> bool {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .is_some_and(|zero| *ts == zero)
}

#[must_use]
pub fn stored_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(STORED_TIMESTAMP_FORMAT).to_string()
}

pub fn parse_stored_timestamp(raw: &str) -> Result<NaiveDateTime, ValidationError> {
    NaiveDateTime::parse_from_str(raw.trim(), STORED_TIMESTAMP_FORMAT)
        .map_err(|e| ValidationError(format!("invalid stored timestamp '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_opt(h, mi, s))
            .expect("valid timestamp")
    }

    #[test]
    fn wire_format_is_day_first() {
        assert_eq!(
            format_timestamp(&at(2026, 3, 7, 9, 5, 1)),
            "07-03-2026 09:05:01"
        );
    }

    #[test]
    fn zero_and_missing_timestamps_are_omitted() {
        assert_eq!(format_timestamp_opt(None), None);
        assert_eq!(format_timestamp_opt(Some(&at(1, 1, 1, 0, 0, 0))), None);
        assert_eq!(
            format_timestamp_opt(Some(&at(2026, 1, 1, 0, 0, 0))).as_deref(),
            Some("01-01-2026 00:00:00")
        );
    }

    #[test]
    fn stored_encoding_survives_sub_second_precision() {
        let ts = at(2026, 10, 19, 23, 59, 58)
            .checked_add_signed(chrono::Duration::microseconds(250_000))
            .expect("add");
        let raw = stored_timestamp(&ts);
        assert_eq!(parse_stored_timestamp(&raw).expect("parse"), ts);
        assert_eq!(
            parse_stored_timestamp("2026-10-19 23:59:58").expect("parse whole seconds"),
            at(2026, 10, 19, 23, 59, 58)
        );
        assert!(parse_stored_timestamp("19-10-2026").is_err());
    }
}
