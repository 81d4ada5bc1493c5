use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::date_range::DateRange;
use super::error::CalendarError;

/// Candidate academic session submitted for a tenant.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionCandidate {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
}

/// Sibling session as currently stored for the same tenant.
#[derive(Debug, Clone)]
pub struct ExistingSession {
    pub id: Uuid,
    pub is_active: bool,
}

/// Writes the storage layer must perform alongside admitting an accepted
/// candidate. `deactivate` and the new session's own activation are issued
/// as a single transaction so there is never an observable window with zero
/// or two active sessions for the tenant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActivationPlan {
    pub deactivate: Vec<Uuid>,
}

impl ActivationPlan {
    pub fn is_empty(&self) -> bool {
        self.deactivate.is_empty()
    }
}

/// Validate a candidate session against its tenant's existing sessions.
///
/// Accepts any well-formed range. When the candidate is flagged active, the
/// returned plan names every sibling whose active flag must be cleared.
pub fn validate_session_period(
    candidate: &SessionCandidate,
    existing: &[ExistingSession],
) -> Result<ActivationPlan, CalendarError> {
    DateRange::new(candidate.start_date, candidate.end_date)?;

    if !candidate.is_active {
        return Ok(ActivationPlan::default());
    }

    Ok(ActivationPlan {
        deactivate: existing.iter().filter(|s| s.is_active).map(|s| s.id).collect(),
    })
}

/// Plan for activating an already-stored session: clear every other active
/// sibling, leaving exactly one active session for the tenant.
pub fn plan_activation(session_id: Uuid, existing: &[ExistingSession]) -> ActivationPlan {
    ActivationPlan {
        deactivate: existing
            .iter()
            .filter(|s| s.is_active && s.id != session_id)
            .map(|s| s.id)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn candidate(start: &str, end: &str, is_active: bool) -> SessionCandidate {
        SessionCandidate {
            name: "AY".to_string(),
            start_date: d(start),
            end_date: d(end),
            is_active,
        }
    }

    #[test]
    fn rejects_start_after_end() {
        let err = validate_session_period(&candidate("2026-04-01", "2025-04-01", false), &[]).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidRange { .. }));
    }

    #[test]
    fn inactive_candidate_needs_no_writes_on_siblings() {
        let existing = vec![ExistingSession { id: Uuid::new_v4(), is_active: true }];
        let plan = validate_session_period(&candidate("2025-04-01", "2026-03-31", false), &existing).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn active_candidate_deactivates_active_siblings_only() {
        let active = Uuid::new_v4();
        let dormant = Uuid::new_v4();
        let existing = vec![
            ExistingSession { id: active, is_active: true },
            ExistingSession { id: dormant, is_active: false },
        ];

        // Next school year submitted while the previous one is still active
        let plan = validate_session_period(&candidate("2026-04-01", "2027-03-31", true), &existing).unwrap();
        assert_eq!(plan.deactivate, vec![active]);
    }

    #[test]
    fn activation_plan_excludes_the_target_itself() {
        let target = Uuid::new_v4();
        let other = Uuid::new_v4();
        let existing = vec![
            ExistingSession { id: target, is_active: true },
            ExistingSession { id: other, is_active: true },
        ];
        let plan = plan_activation(target, &existing);
        assert_eq!(plan.deactivate, vec![other]);
    }
}
