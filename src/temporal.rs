// ⏰ Calendar dates for close approaches
//
// The close-approach data carries timestamps as "YYYY-Mon-DD HH:MM" in UTC,
// with no seconds. We keep them as timezone-naive `NaiveDateTime` values and
// format them back with the same pattern, so parse → format is lossless.

use crate::error::{NeoError, NeoResult};
use chrono::{NaiveDate, NaiveDateTime};

/// Compact calendar format, e.g. "1900-Jan-01 12:00"
pub const CALENDAR_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Date format accepted on the command line, e.g. "2020-01-01"
pub const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a compact calendar string into a naive UTC timestamp.
///
/// chrono also accepts non-canonical spellings such as "1900-jan-1 2:05";
/// `format_calendar_date` only reproduces the input for canonical strings.
pub fn parse_calendar_date(calendar_date: &str) -> NeoResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(calendar_date, CALENDAR_FORMAT)
        .map_err(|e| NeoError::malformed("calendar_date", calendar_date, e))
}

/// Format a timestamp back into the compact, second-less calendar string
pub fn format_calendar_date(time: &NaiveDateTime) -> String {
    time.format(CALENDAR_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` date given as a query criterion
pub fn parse_query_date(date: &str) -> NeoResult<NaiveDate> {
    NaiveDate::parse_from_str(date, QUERY_DATE_FORMAT)
        .map_err(|e| NeoError::malformed("date", date, e))
}

// ============================================================================
// TESTS
// ============================================================================
