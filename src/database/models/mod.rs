pub mod academic_session;
pub mod admission;
pub mod enrollment;
pub mod fee_structure;
pub mod grade;
pub mod holiday;
pub mod school;
pub mod section;
pub mod student;
pub mod tenant;
pub mod term;
pub mod transport_route;
pub mod user;

pub use academic_session::AcademicSession;
pub use admission::Admission;
pub use enrollment::Enrollment;
pub use fee_structure::FeeStructure;
pub use grade::Grade;
pub use holiday::Holiday;
pub use school::School;
pub use section::Section;
pub use student::Student;
pub use tenant::Tenant;
pub use term::Term;
pub use transport_route::TransportRoute;
pub use user::User;
