//! sea-orm entities for the portal database.

pub mod class_schedules;
pub mod courses;
pub mod enrollments;
pub mod teachers;
