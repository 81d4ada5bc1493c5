use chrono::NaiveDate;
use thiserror::Error;

use super::date_range::DateRange;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid range: start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Out of session bounds: {start}..{end} does not fit within session {session}")]
    OutOfSessionBounds {
        start: NaiveDate,
        end: NaiveDate,
        session: DateRange,
    },
}
