use std::collections::HashSet;

use portal_domain::pagination::PageRequest;

use crate::domain::repository::{CourseRepository, EnrollmentRepository};
use crate::domain::types::{CatalogCourse, Course, CourseFields};
use crate::error::PortalError;

const CODE_MAX: usize = 10;
const NAME_MAX: usize = 150;
const FACULTY_MAX: usize = 100;
const DURATION_MAX: usize = 50;

/// Trim every field and check it against the column limits.
pub fn validate_course(fields: CourseFields) -> Result<CourseFields, PortalError> {
    Ok(CourseFields {
        code: required("code", &fields.code, CODE_MAX)?,
        name: required("name", &fields.name, NAME_MAX)?,
        faculty: required("faculty", &fields.faculty, FACULTY_MAX)?,
        duration: required("duration", &fields.duration, DURATION_MAX)?,
    })
}

fn required(field: &str, value: &str, max: usize) -> Result<String, PortalError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PortalError::InvalidCourse(format!("{field} is required")));
    }
    if value.chars().count() > max {
        return Err(PortalError::InvalidCourse(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(value.to_owned())
}

// ── ListCourses ──────────────────────────────────────────────────────────────

pub struct ListCoursesUseCase<C: CourseRepository, E: EnrollmentRepository> {
    pub courses: C,
    pub enrollments: E,
}

impl<C: CourseRepository, E: EnrollmentRepository> ListCoursesUseCase<C, E> {
    pub async fn execute(
        &self,
        student_id: &str,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<CatalogCourse>, PortalError> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let courses = self.courses.list(search, page.clamped()).await?;
        let enrolled: HashSet<i32> = self
            .enrollments
            .find_enrolled_course_ids(student_id)
            .await?
            .into_iter()
            .collect();
        Ok(courses
            .into_iter()
            .map(|course| CatalogCourse {
                is_enrolled: enrolled.contains(&course.id),
                course,
            })
            .collect())
    }
}

// ── GetCourse ────────────────────────────────────────────────────────────────

pub struct GetCourseUseCase<C: CourseRepository> {
    pub courses: C,
}

impl<C: CourseRepository> GetCourseUseCase<C> {
    pub async fn execute(&self, id: i32) -> Result<Course, PortalError> {
        self.courses
            .get(id)
            .await?
            .ok_or(PortalError::CourseNotFound)
    }
}

// ── CreateCourse ─────────────────────────────────────────────────────────────

pub struct CreateCourseUseCase<C: CourseRepository> {
    pub courses: C,
}

impl<C: CourseRepository> CreateCourseUseCase<C> {
    pub async fn execute(&self, fields: CourseFields) -> Result<Course, PortalError> {
        let fields = validate_course(fields)?;
        let course = self.courses.create(&fields).await?;
        tracing::info!(course_id = course.id, code = %course.code, "course created");
        Ok(course)
    }
}

// ── UpdateCourse ─────────────────────────────────────────────────────────────

pub struct UpdateCourseUseCase<C: CourseRepository> {
    pub courses: C,
}

impl<C: CourseRepository> UpdateCourseUseCase<C> {
    pub async fn execute(&self, id: i32, fields: CourseFields) -> Result<Course, PortalError> {
        let fields = validate_course(fields)?;
        self.courses
            .update(id, &fields)
            .await?
            .ok_or(PortalError::CourseNotFound)
    }
}

// ── DeleteCourse ─────────────────────────────────────────────────────────────

pub struct DeleteCourseUseCase<C: CourseRepository> {
    pub courses: C,
}

impl<C: CourseRepository> DeleteCourseUseCase<C> {
    pub async fn execute(&self, id: i32) -> Result<(), PortalError> {
        if self.courses.get(id).await?.is_none() {
            return Err(PortalError::CourseNotFound);
        }
        if self.courses.is_referenced(id).await? {
            return Err(PortalError::CourseInUse);
        }
        if !self.courses.delete(id).await? {
            return Err(PortalError::CourseNotFound);
        }
        tracing::info!(course_id = id, "course deleted");
        Ok(())
    }
}
