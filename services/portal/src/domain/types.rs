use chrono::{DateTime, NaiveTime, Utc};

use portal_domain::weekday::DayOfWeek;

/// Hard cap on the number of courses one student may hold.
pub const MAX_ENROLLMENTS_PER_STUDENT: usize = 6;

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub faculty: String,
    pub duration: String,
}

/// Editable course fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseFields {
    pub code: String,
    pub name: String,
    pub faculty: String,
    pub duration: String,
}

/// A catalog row annotated for the calling student.
#[derive(Debug, Clone)]
pub struct CatalogCourse {
    pub course: Course,
    pub is_enrolled: bool,
}

/// A registration about to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollment {
    pub student_id: String,
    pub course_id: i32,
    pub enrolled_at: DateTime<Utc>,
}

/// A persisted enrollment joined with its course.
#[derive(Debug, Clone)]
pub struct EnrolledCourse {
    pub enrollment_id: i32,
    pub course: Course,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub id: i32,
    pub name: String,
}

/// Editable class schedule fields. `day_of_week` is kept raw so it can be
/// validated together with the other fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleFields {
    pub course_id: i32,
    pub teacher_id: i32,
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: Option<String>,
}

/// A weekly class slot with its course and teacher resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub id: i32,
    pub course_id: i32,
    pub course_code: String,
    pub course_name: String,
    pub teacher_id: i32,
    pub teacher_name: String,
    pub day: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: Option<String>,
}
