pub mod admission;
pub mod error;
pub mod section;

pub use admission::{AdmissionAction, AdmissionSideEffect, AdmissionStatus, AdmissionTransition};
pub use error::TransitionError;
pub use section::{EnrollmentAction, EnrollmentStatus};
