use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid transition: cannot {action} from status '{from}'")]
    InvalidTransition { from: String, action: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unknown status value: {0}")]
    UnknownStatus(String),
}
