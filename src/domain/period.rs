use crate::error::{RentalError, Result};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// A half-open rental interval `[start, end)`.
///
/// Periods that merely touch (one ends exactly when the other starts) do not
/// overlap, so a car returned in the morning can be rented again that morning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RentalPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl RentalPeriod {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(RentalError::InvalidPeriod(format!(
                "start {} must be before end {}",
                start, end
            )))
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn overlaps(&self, other: &RentalPeriod) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Number of days charged for this period; partial days round up.
    pub fn billable_days(&self) -> i64 {
        let millis = (self.end - self.start).num_milliseconds();
        (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
    }

    /// Calendar year (UTC) the period starts in.
    pub fn start_year(&self) -> i32 {
        self.start.year()
    }
}
