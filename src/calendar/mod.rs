pub mod date_range;
pub mod error;
pub mod session;
pub mod subperiod;

pub use date_range::DateRange;
pub use error::CalendarError;
pub use session::{plan_activation, validate_session_period, ActivationPlan, ExistingSession, SessionCandidate};
pub use subperiod::{validate_sub_period, SubPeriod};
