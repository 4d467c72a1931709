#![allow(async_fn_in_trait)]

use std::collections::HashMap;

use portal_domain::pagination::PageRequest;

use crate::domain::types::{
    Course, CourseFields, EnrolledCourse, NewEnrollment, ScheduleEntry, ScheduleFields, Teacher,
};
use crate::error::PortalError;

/// Repository for student enrollments.
pub trait EnrollmentRepository: Send + Sync {
    /// Course ids the student is currently enrolled in.
    async fn find_enrolled_course_ids(&self, student_id: &str) -> Result<Vec<i32>, PortalError>;

    /// Persist every row or none. All rows belong to the same student.
    async fn insert_all(&self, enrollments: &[NewEnrollment]) -> Result<(), PortalError>;

    /// The student's enrollments joined with course data, oldest first.
    async fn list_for_student(&self, student_id: &str)
    -> Result<Vec<EnrolledCourse>, PortalError>;
}

/// Repository for the course catalog.
pub trait CourseRepository: Send + Sync {
    /// Display names for the given ids. Unknown ids are absent from the map.
    async fn find_names(&self, ids: &[i32]) -> Result<HashMap<i32, String>, PortalError>;

    async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Course>, PortalError>;

    async fn get(&self, id: i32) -> Result<Option<Course>, PortalError>;

    async fn create(&self, fields: &CourseFields) -> Result<Course, PortalError>;

    /// Returns `None` if the course does not exist.
    async fn update(&self, id: i32, fields: &CourseFields)
    -> Result<Option<Course>, PortalError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, PortalError>;

    /// Whether any enrollment or class schedule points at the course.
    async fn is_referenced(&self, id: i32) -> Result<bool, PortalError>;
}

/// Repository for weekly class schedules.
pub trait ScheduleRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<ScheduleEntry>, PortalError>;

    async fn list_for_courses(&self, course_ids: &[i32])
    -> Result<Vec<ScheduleEntry>, PortalError>;

    async fn get(&self, id: i32) -> Result<Option<ScheduleEntry>, PortalError>;

    /// Returns the id of the new slot.
    async fn create(&self, fields: &ScheduleFields) -> Result<i32, PortalError>;

    /// Returns `false` if the slot does not exist.
    async fn update(&self, id: i32, fields: &ScheduleFields) -> Result<bool, PortalError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, PortalError>;
}

/// Repository for teachers.
pub trait TeacherRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Teacher>, PortalError>;

    async fn get(&self, id: i32) -> Result<Option<Teacher>, PortalError>;

    async fn create(&self, name: &str) -> Result<Teacher, PortalError>;
}
