//! Splits an inclusive date range into single-day windows.

use chrono::{FixedOffset, NaiveDate};
use shopdesk_core::{DateWindow, platform_offset};
use shopdesk_fetch::DEFAULT_MAX_DAYS;
use tracing::debug;

use crate::error::CommerceError;

/// Windows to fetch plus what the cap left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedRange {
    /// One window per day, oldest first.
    pub windows: Vec<DateWindow>,
    /// The requested range exceeded the cap.
    pub truncated: bool,
    /// Days after the last window that were dropped.
    pub omitted_days: u32,
}

impl ChunkedRange {
    /// Days covered by the windows.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.windows.iter().map(|w| w.date).collect()
    }
}

/// Produces day windows in the platform's time zone.
#[derive(Debug, Clone, Copy)]
pub struct DateRangeChunker {
    max_days: u32,
    offset: FixedOffset,
}

impl DateRangeChunker {
    /// Creates a chunker capped at `max_days` (at least one).
    pub fn new(max_days: u32) -> Self {
        Self {
            max_days: max_days.max(1),
            offset: platform_offset(),
        }
    }

    /// Uses a different UTC offset for the day boundaries.
    #[must_use]
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// The day cap.
    pub fn max_days(&self) -> u32 {
        self.max_days
    }

    /// Splits `start..=end` into at most `max_days` windows.
    ///
    /// # Errors
    ///
    /// Returns [`CommerceError::InvalidRequest`] if `start` is after `end`.
    pub fn split(&self, start: NaiveDate, end: NaiveDate) -> Result<ChunkedRange, CommerceError> {
        if start > end {
            return Err(CommerceError::InvalidRequest(format!(
                "dateFrom {start} is after dateTo {end}"
            )));
        }

        let windows: Vec<DateWindow> = start
            .iter_days()
            .take_while(|day| *day <= end)
            .take(self.max_days as usize)
            .filter_map(|day| DateWindow::for_date(day, self.offset))
            .collect();

        let requested = (end - start).num_days() + 1;
        let omitted_days = u32::try_from(requested)
            .unwrap_or(u32::MAX)
            .saturating_sub(u32::try_from(windows.len()).unwrap_or(u32::MAX));

        debug!(%start, %end, windows = windows.len(), omitted_days, "Split date range");

        Ok(ChunkedRange {
            windows,
            truncated: omitted_days > 0,
            omitted_days,
        })
    }
}

impl Default for DateRangeChunker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DAYS)
    }
}
