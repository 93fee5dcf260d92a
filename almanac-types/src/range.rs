use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::AlmanacError;

/// Canonical wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive range of calendar days with `start <= end`.
///
/// Fields are private so an inverted range can never be constructed; use
/// [`DateRange::new`] or [`DateRange::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange", into = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Serialize, Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = AlmanacError;
    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl From<DateRange> for RawDateRange {
    fn from(r: DateRange) -> Self {
        Self {
            start: r.start,
            end: r.end,
        }
    }
}

impl DateRange {
    /// Build a range, rejecting `start > end`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the start date falls after the end date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AlmanacError> {
        if start > end {
            return Err(AlmanacError::invalid_arg(format!(
                "start_date {start} cannot be after end_date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse two `yyyy-MM-dd` strings into a range.
    ///
    /// # Errors
    /// Returns `InvalidArg` for blank or malformed dates and for inverted ranges.
    pub fn parse(start: &str, end: &str) -> Result<Self, AlmanacError> {
        let start = parse_date(start, "start_date")?;
        let end = parse_date(end, "end_date")?;
        Self::new(start, end)
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, always at least one.
    #[must_use]
    pub fn len_days(&self) -> usize {
        let span = (self.end - self.start).num_days();
        usize::try_from(span).unwrap_or(0) + 1
    }

    /// True if `day` lies inside the range.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Iterate the days of the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Parse a single `yyyy-MM-dd` date, ignoring surrounding whitespace.
///
/// # Errors
/// Returns `InvalidArg` naming `param` when the input is blank or malformed.
pub fn parse_date(raw: &str, param: &str) -> Result<NaiveDate, AlmanacError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AlmanacError::invalid_arg(format!(
            "the {param} cannot be null or empty"
        )));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        AlmanacError::invalid_arg(format!(
            "the {param} '{raw}' is not in the correct format (YYYY-MM-DD)"
        ))
    })
}
