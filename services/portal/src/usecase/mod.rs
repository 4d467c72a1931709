pub mod course;
pub mod enrollment;
pub mod schedule;
pub mod teacher;
pub mod timetable;
