use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::TransitionError;

/// Lifecycle of a student admission. Pending is the only state with
/// outgoing transitions; approved and rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl AdmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdmissionStatus::Pending => "pending",
            AdmissionStatus::Approved => "approved",
            AdmissionStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, AdmissionStatus::Pending)
    }
}

impl fmt::Display for AdmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdmissionStatus {
    type Err = TransitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AdmissionStatus::Pending),
            "approved" => Ok(AdmissionStatus::Approved),
            "rejected" => Ok(AdmissionStatus::Rejected),
            other => Err(TransitionError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdmissionAction {
    Approve,
    Reject,
}

impl fmt::Display for AdmissionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AdmissionAction::Approve => "approve",
            AdmissionAction::Reject => "reject",
        })
    }
}

/// Approval assigns the student to the admitting school. The storage layer
/// executes this in the same transaction as the status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionSideEffect {
    SetStudentSchool,
}

/// Outcome of an accepted admission transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionTransition {
    pub status: AdmissionStatus,
    pub side_effect: Option<AdmissionSideEffect>,
}

impl AdmissionStatus {
    /// Explicit transition table. Any (state, action) pair not listed here
    /// is rejected, with no side effect.
    pub fn apply(self, action: AdmissionAction) -> Result<AdmissionTransition, TransitionError> {
        match (self, action) {
            (AdmissionStatus::Pending, AdmissionAction::Approve) => Ok(AdmissionTransition {
                status: AdmissionStatus::Approved,
                side_effect: Some(AdmissionSideEffect::SetStudentSchool),
            }),
            (AdmissionStatus::Pending, AdmissionAction::Reject) => Ok(AdmissionTransition {
                status: AdmissionStatus::Rejected,
                side_effect: None,
            }),
            (from, action) => Err(TransitionError::InvalidTransition {
                from: from.to_string(),
                action: action.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approve_from_pending_sets_student_school() {
        let t = AdmissionStatus::Pending.apply(AdmissionAction::Approve).unwrap();
        assert_eq!(t.status, AdmissionStatus::Approved);
        assert_eq!(t.side_effect, Some(AdmissionSideEffect::SetStudentSchool));
    }

    #[test]
    fn reject_from_pending_has_no_side_effect() {
        let t = AdmissionStatus::Pending.apply(AdmissionAction::Reject).unwrap();
        assert_eq!(t.status, AdmissionStatus::Rejected);
        assert_eq!(t.side_effect, None);
    }

    #[test]
    fn approved_is_terminal() {
        let err = AdmissionStatus::Approved.apply(AdmissionAction::Reject).unwrap_err();
        assert!(matches!(err, TransitionError::InvalidTransition { .. }));
        assert!(AdmissionStatus::Approved.apply(AdmissionAction::Approve).is_err());
    }

    #[test]
    fn rejected_is_terminal() {
        assert!(AdmissionStatus::Rejected.apply(AdmissionAction::Approve).is_err());
        assert!(AdmissionStatus::Rejected.apply(AdmissionAction::Reject).is_err());
    }

    #[test]
    fn status_round_trips_through_storage_strings() {
        for status in [AdmissionStatus::Pending, AdmissionStatus::Approved, AdmissionStatus::Rejected] {
            assert_eq!(status.as_str().parse::<AdmissionStatus>().unwrap(), status);
        }
        assert!(matches!(
            "cancelled".parse::<AdmissionStatus>().unwrap_err(),
            TransitionError::UnknownStatus(_)
        ));
    }
}
