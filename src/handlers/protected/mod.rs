pub mod admissions;
pub mod enrollments;
pub mod fees;
pub mod grades;
pub mod holidays;
pub mod schools;
pub mod sections;
pub mod sessions;
pub mod students;
pub mod terms;
pub mod transport;
