//! Commit time ranges.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use crate::{CoreError, CoreResult};

/// Parses a `year-month-day-hour-minute-second` timestamp in local time.
///
/// Components need not be zero-padded (`2024-3-1-9-0-0`). When a local time
/// occurs twice (a DST fold) the earlier instant is used.
///
/// # Errors
///
/// Returns [`CoreError::MalformedTimestamp`] if the input is not six numeric
/// components or does not name a valid local time.
pub fn parse_timestamp(input: &str) -> CoreResult<DateTime<Local>> {
    let malformed = |reason: String| CoreError::MalformedTimestamp {
        input: input.to_string(),
        reason,
    };

    let parts: Vec<&str> = input.trim().split('-').collect();
    if parts.len() != 6 {
        return Err(malformed(format!(
            "expected 6 components, found {}",
            parts.len()
        )));
    }

    let mut numbers = [0u32; 6];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(format!("{part:?} is not a number")));
        }
        *slot = part
            .parse()
            .map_err(|_| malformed(format!("{part:?} is not a number")))?;
    }
    let [year, month, day, hour, minute, second] = numbers;

    let year = i32::try_from(year).map_err(|_| malformed("year out of range".into()))?;
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| malformed("no such date".into()))?
        .and_hms_opt(hour, minute, second)
        .ok_or_else(|| malformed("no such time of day".into()))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| malformed("time does not exist in the local time zone".into()))
}

/// An inclusive range of author dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    since: DateTime<Local>,
    until: DateTime<Local>,
}

impl TimeRange {
    /// Creates a range from `since` to `until`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRange`] if `since` is after `until`.
    pub fn new(since: DateTime<Local>, until: DateTime<Local>) -> CoreResult<Self> {
        if since > until {
            return Err(CoreError::InvalidRange {
                since: since.to_string(),
                until: until.to_string(),
            });
        }
        Ok(Self { since, until })
    }

    /// Returns the start of the range.
    #[must_use]
    pub fn since(&self) -> DateTime<Local> {
        self.since
    }

    /// Returns the end of the range.
    #[must_use]
    pub fn until(&self) -> DateTime<Local> {
        self.until
    }

    /// Returns the range bounds in UTC.
    #[must_use]
    pub fn to_utc(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.since.to_utc(), self.until.to_utc())
    }
}
