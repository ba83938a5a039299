//! Calendar-day windows in the commerce platform's time zone.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// UTC offset of the platform's local calendar (+09:00, no DST).
const PLATFORM_UTC_OFFSET_SECS: i32 = 9 * 3600;

/// Returns the fixed offset of the platform's local calendar.
pub fn platform_offset() -> FixedOffset {
    FixedOffset::east_opt(PLATFORM_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

// ============================================================================
// Timestamp Encoding
// ============================================================================

/// Textual forms of an instant that the order API may accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampEncoding {
    /// `2024-01-31T00:00:00` in platform-local time.
    LocalT,
    /// `2024-01-31 00:00:00` in platform-local time.
    LocalSpace,
    /// `2024-01-30T15:00:00.000Z` in UTC.
    UtcMillis,
}

impl TimestampEncoding {
    /// All encodings in probing order.
    pub const ALL: [TimestampEncoding; 3] = [Self::LocalT, Self::LocalSpace, Self::UtcMillis];

    /// Short label used in candidate names.
    pub fn label(&self) -> &'static str {
        match self {
            Self::LocalT => "local-t",
            Self::LocalSpace => "local-space",
            Self::UtcMillis => "utc-ms",
        }
    }

    /// Formats an instant in this encoding.
    pub fn format(&self, instant: &DateTime<FixedOffset>) -> String {
        match self {
            Self::LocalT => instant.format("%Y-%m-%dT%H:%M:%S").to_string(),
            Self::LocalSpace => instant.format("%Y-%m-%d %H:%M:%S").to_string(),
            Self::UtcMillis => instant
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl fmt::Display for TimestampEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Date Window
// ============================================================================

/// A closed local calendar day: `00:00:00.000` through `23:59:59.999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// The calendar day.
    pub date: NaiveDate,
    /// Midnight at the start of the day.
    pub start: DateTime<FixedOffset>,
    /// Last millisecond of the day.
    pub end: DateTime<FixedOffset>,
}

impl DateWindow {
    /// Builds the window for `date` at the given offset.
    pub fn for_date(date: NaiveDate, offset: FixedOffset) -> Option<Self> {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        let start = offset.from_local_datetime(&midnight).single()?;
        let end = start + Duration::days(1) - Duration::milliseconds(1);
        Some(Self { date, start, end })
    }

    /// Builds the window for `date` in the platform's zone.
    pub fn platform_day(date: NaiveDate) -> Option<Self> {
        Self::for_date(date, platform_offset())
    }

    /// Start of the window in the given encoding.
    pub fn start_text(&self, encoding: TimestampEncoding) -> String {
        encoding.format(&self.start)
    }

    /// End of the window in the given encoding.
    pub fn end_text(&self, encoding: TimestampEncoding) -> String {
        encoding.format(&self.end)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_encodings() {
        let window = DateWindow::platform_day(day(2024, 3, 1)).unwrap();

        assert_eq!(window.start_text(TimestampEncoding::LocalT), "2024-03-01T00:00:00");
        assert_eq!(window.start_text(TimestampEncoding::LocalSpace), "2024-03-01 00:00:00");
        assert_eq!(window.start_text(TimestampEncoding::UtcMillis), "2024-02-29T15:00:00.000Z");

        assert_eq!(window.end_text(TimestampEncoding::LocalT), "2024-03-01T23:59:59");
        assert_eq!(window.end_text(TimestampEncoding::UtcMillis), "2024-03-01T14:59:59.999Z");
    }

    #[test]
    fn test_encodings_denote_same_instant() {
        let window = DateWindow::platform_day(day(2024, 12, 31)).unwrap();
        let utc: DateTime<Utc> = window
            .start_text(TimestampEncoding::UtcMillis)
            .parse()
            .unwrap();
        assert_eq!(utc, window.start.with_timezone(&Utc));
    }

    #[test]
    fn test_window_is_closed_day() {
        let window = DateWindow::platform_day(day(2024, 1, 15)).unwrap();
        assert_eq!(window.end - window.start, Duration::milliseconds(86_399_999));
        assert_eq!(window.start.date_naive(), window.end.date_naive());
    }

    #[test]
    fn test_windows_leave_no_gap_between_days() {
        let first = DateWindow::platform_day(day(2024, 3, 1)).unwrap();
        let second = DateWindow::platform_day(day(2024, 3, 2)).unwrap();
        assert_eq!(second.start - first.end, Duration::milliseconds(1));

        let last_instant = "2024-03-01T14:59:59.999Z".parse::<DateTime<Utc>>().unwrap();
        assert!(last_instant <= first.end.with_timezone(&Utc));
        assert_eq!(first.end_text(TimestampEncoding::LocalSpace), "2024-03-01 23:59:59");
    }
}
