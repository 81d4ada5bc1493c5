use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::TransitionError;

/// Lifecycle of a section-level enrollment. Created active; withdrawn and
/// transferred are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Transferred,
    Withdrawn,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::Transferred => "transferred",
            EnrollmentStatus::Withdrawn => "withdrawn",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, EnrollmentStatus::Active)
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = TransitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(EnrollmentStatus::Active),
            "transferred" => Ok(EnrollmentStatus::Transferred),
            "withdrawn" => Ok(EnrollmentStatus::Withdrawn),
            other => Err(TransitionError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentAction {
    Withdraw,
    Transfer,
}

impl fmt::Display for EnrollmentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EnrollmentAction::Withdraw => "withdraw",
            EnrollmentAction::Transfer => "transfer",
        })
    }
}

impl EnrollmentStatus {
    /// Explicit transition table: active may be withdrawn or transferred,
    /// nothing else moves.
    pub fn apply(self, action: EnrollmentAction) -> Result<EnrollmentStatus, TransitionError> {
        match (self, action) {
            (EnrollmentStatus::Active, EnrollmentAction::Withdraw) => Ok(EnrollmentStatus::Withdrawn),
            (EnrollmentStatus::Active, EnrollmentAction::Transfer) => Ok(EnrollmentStatus::Transferred),
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
    fn active_can_withdraw_then_nothing_further() {
        let withdrawn = EnrollmentStatus::Active.apply(EnrollmentAction::Withdraw).unwrap();
        assert_eq!(withdrawn, EnrollmentStatus::Withdrawn);

        let err = withdrawn.apply(EnrollmentAction::Transfer).unwrap_err();
        assert!(matches!(err, TransitionError::InvalidTransition { .. }));
    }

    #[test]
    fn active_can_transfer() {
        assert_eq!(
            EnrollmentStatus::Active.apply(EnrollmentAction::Transfer).unwrap(),
            EnrollmentStatus::Transferred
        );
    }

    #[test]
    fn terminal_states_reject_all_actions() {
        for status in [EnrollmentStatus::Withdrawn, EnrollmentStatus::Transferred] {
            assert!(status.is_terminal());
            assert!(status.apply(EnrollmentAction::Withdraw).is_err());
            assert!(status.apply(EnrollmentAction::Transfer).is_err());
        }
    }

    #[test]
    fn status_round_trips_through_storage_strings() {
        for status in [EnrollmentStatus::Active, EnrollmentStatus::Transferred, EnrollmentStatus::Withdrawn] {
            assert_eq!(status.as_str().parse::<EnrollmentStatus>().unwrap(), status);
        }
    }
}
