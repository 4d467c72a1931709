use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Portal service error variants.
///
/// Per-course admission outcomes (duplicate, over capacity) are not errors;
/// they are reported inside the admission report.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("invalid course: {0}")]
    InvalidCourse(String),
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),
    #[error("invalid teacher: {0}")]
    InvalidTeacher(String),
    #[error("course not found")]
    CourseNotFound,
    #[error("schedule not found")]
    ScheduleNotFound,
    #[error("teacher not found")]
    TeacherNotFound,
    #[error("course is still referenced by enrollments or schedules")]
    CourseInUse,
    #[error("forbidden")]
    Forbidden,
    #[error("persistence failure")]
    PersistenceFailure(#[from] anyhow::Error),
}

impl PortalError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::InvalidCourse(_) => "INVALID_COURSE",
            Self::InvalidSchedule(_) => "INVALID_SCHEDULE",
            Self::InvalidTeacher(_) => "INVALID_TEACHER",
            Self::CourseNotFound => "COURSE_NOT_FOUND",
            Self::ScheduleNotFound => "SCHEDULE_NOT_FOUND",
            Self::TeacherNotFound => "TEACHER_NOT_FOUND",
            Self::CourseInUse => "COURSE_IN_USE",
            Self::Forbidden => "FORBIDDEN",
            Self::PersistenceFailure(_) => "PERSISTENCE_FAILURE",
        }
    }
}

impl From<JsonRejection> for PortalError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidRequest(_)
            | Self::InvalidCourse(_)
            | Self::InvalidSchedule(_)
            | Self::InvalidTeacher(_) => StatusCode::BAD_REQUEST,
            Self::CourseNotFound | Self::ScheduleNotFound | Self::TeacherNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::CourseInUse => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::PersistenceFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        if let Self::PersistenceFailure(ref e) = self {
            tracing::error!(error = ?e, kind = "PERSISTENCE_FAILURE", "persistence failure");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
