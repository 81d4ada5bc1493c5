use chrono::NaiveDate;

use super::date_range::DateRange;
use super::error::CalendarError;

/// Term or holiday submitted against a parent academic session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubPeriod {
    Term { start: NaiveDate, end: NaiveDate },
    Holiday { date: NaiveDate },
}

/// Check that a sub-period nests entirely within the parent session range.
/// Boundary dates are accepted; a term must also be well-formed on its own.
pub fn validate_sub_period(candidate: SubPeriod, session: &DateRange) -> Result<(), CalendarError> {
    match candidate {
        SubPeriod::Term { start, end } => {
            let term = DateRange::new(start, end)?;
            if !session.encloses(&term) {
                return Err(CalendarError::OutOfSessionBounds {
                    start,
                    end,
                    session: *session,
                });
            }
            Ok(())
        }
        SubPeriod::Holiday { date } => {
            if !session.contains(date) {
                return Err(CalendarError::OutOfSessionBounds {
                    start: date,
                    end: date,
                    session: *session,
                });
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn session() -> DateRange {
        DateRange::new(d("2025-04-01"), d("2026-03-31")).unwrap()
    }

    #[test]
    fn term_spilling_before_session_start_is_rejected() {
        let term = SubPeriod::Term { start: d("2025-03-01"), end: d("2025-06-01") };
        let err = validate_sub_period(term, &session()).unwrap_err();
        assert!(matches!(err, CalendarError::OutOfSessionBounds { .. }));
    }

    #[test]
    fn term_matching_session_bounds_is_accepted() {
        let term = SubPeriod::Term { start: d("2025-04-01"), end: d("2026-03-31") };
        assert!(validate_sub_period(term, &session()).is_ok());
    }

    #[test]
    fn inverted_term_is_invalid_range_not_bounds() {
        let term = SubPeriod::Term { start: d("2025-09-01"), end: d("2025-08-01") };
        let err = validate_sub_period(term, &session()).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidRange { .. }));
    }

    #[test]
    fn overlapping_terms_are_not_this_checkers_concern() {
        // Disjointness between sibling terms is deliberately unenforced.
        let first = SubPeriod::Term { start: d("2025-04-01"), end: d("2025-09-30") };
        let second = SubPeriod::Term { start: d("2025-09-01"), end: d("2026-03-31") };
        assert!(validate_sub_period(first, &session()).is_ok());
        assert!(validate_sub_period(second, &session()).is_ok());
    }

    #[test]
    fn holiday_inside_session_is_accepted() {
        let holiday = SubPeriod::Holiday { date: d("2025-12-25") };
        assert!(validate_sub_period(holiday, &session()).is_ok());
    }

    #[test]
    fn holiday_on_session_boundary_is_accepted() {
        assert!(validate_sub_period(SubPeriod::Holiday { date: d("2025-04-01") }, &session()).is_ok());
        assert!(validate_sub_period(SubPeriod::Holiday { date: d("2026-03-31") }, &session()).is_ok());
    }

    #[test]
    fn holiday_outside_session_is_rejected() {
        let holiday = SubPeriod::Holiday { date: d("2026-04-01") };
        let err = validate_sub_period(holiday, &session()).unwrap_err();
        assert!(matches!(err, CalendarError::OutOfSessionBounds { .. }));
    }
}
