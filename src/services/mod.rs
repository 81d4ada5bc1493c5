pub mod calendar_service;
pub mod enrollment_service;
pub mod school_service;
pub mod tenant_service;

pub use calendar_service::{CalendarService, CalendarServiceError};
pub use enrollment_service::{EnrollmentService, EnrollmentServiceError};
pub use school_service::{SchoolService, SchoolServiceError};
pub use tenant_service::{TenantError, TenantService};
