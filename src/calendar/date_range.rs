use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::CalendarError;

/// Inclusive calendar-date range. Time-of-day never participates in
/// comparisons; both endpoints are valid member dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn encloses(&self, other: &DateRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn rejects_inverted_range() {
        let err = DateRange::new(d("2026-04-01"), d("2025-04-01")).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidRange { .. }));
    }

    #[test]
    fn single_day_range_is_valid() {
        let range = DateRange::new(d("2025-12-25"), d("2025-12-25")).unwrap();
        assert!(range.contains(d("2025-12-25")));
    }

    #[test]
    fn contains_is_boundary_inclusive() {
        let range = DateRange::new(d("2025-04-01"), d("2026-03-31")).unwrap();
        assert!(range.contains(d("2025-04-01")));
        assert!(range.contains(d("2026-03-31")));
        assert!(!range.contains(d("2025-03-31")));
        assert!(!range.contains(d("2026-04-01")));
    }

    #[test]
    fn encloses_allows_equal_bounds() {
        let session = DateRange::new(d("2025-04-01"), d("2026-03-31")).unwrap();
        let term = DateRange::new(d("2025-04-01"), d("2026-03-31")).unwrap();
        assert!(session.encloses(&term));

        let spill = DateRange::new(d("2025-03-01"), d("2025-06-01")).unwrap();
        assert!(!session.encloses(&spill));
    }
}
